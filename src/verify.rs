/// Index of the single whitespace token in which `a` and `b` differ.
///
/// Returns `None` when either side is blank, when the token counts differ,
/// when the strings tokenize identically, or when two or more tokens differ.
pub fn single_token_difference(a: &str, b: &str) -> Option<usize> {
    let ta: Vec<&str> = a.split_whitespace().collect();
    let tb: Vec<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() || ta.len() != tb.len() {
        return None;
    }
    let mut found = None;
    for (i, (x, y)) in ta.iter().zip(tb.iter()).enumerate() {
        if x != y {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

pub fn is_one_token_different(a: &str, b: &str) -> bool {
    single_token_difference(a, b).is_some()
}

/// Absent values never match.
pub fn is_one_token_different_opt(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => is_one_token_different(a, b),
        _ => false,
    }
}
