use neardup::aggregate::{GroupKey, GroupOrder};
use neardup::engine::{analyze_lines, SimilarityEngine};
use neardup::record::FieldKind;

const EXAMPLE: &[&str] = &[
    "01-01-2012 19:45:00 Naomi is getting into the car",
    "01-01-2012 20:12:39 Naomi is eating at a restaurant",
    "02-01-2012 09:13:15 George is getting into the car",
    "02-01-2012 10:14:00 George is eating at a diner",
    "03-01-2012 10:14:00 Naomi is eating at a diner",
];

fn positions(a: &neardup::engine::Analysis, i: usize) -> Vec<usize> {
    a.groups[i].positions.iter().copied().collect()
}

#[test]
fn example_produces_three_groups_in_first_match_order() {
    let a = analyze_lines(EXAMPLE);
    assert_eq!(a.records.len(), 5);
    assert_eq!(a.groups.len(), 3);

    assert_eq!(a.groups[0].kind(), FieldKind::Subject);
    assert_eq!((a.groups[0].key.first.as_str(), a.groups[0].key.second.as_str()), ("getting", "into the car"));
    assert_eq!(positions(&a, 0), vec![0, 2]);
    assert_eq!(a.groups[0].changing_values(&a.records), vec!["Naomi", "George"]);

    assert_eq!(a.groups[1].kind(), FieldKind::Rest);
    assert_eq!(positions(&a, 1), vec![1, 4]);
    assert_eq!(a.groups[1].changing_values(&a.records), vec!["at a restaurant", "at a diner"]);

    assert_eq!(a.groups[2].kind(), FieldKind::Subject);
    assert_eq!(positions(&a, 2), vec![3, 4]);
    assert_eq!(a.groups[2].changing_values(&a.records), vec!["George", "Naomi"]);
}

#[test]
fn one_record_can_join_two_groups() {
    let a = analyze_lines(&[
        "01-01-2012 19:45:00 Naomi is getting into the car",
        "01-01-2012 20:12:39 George is getting into the restaurant",
        "01-01-2012 20:12:39 George is getting into the car",
    ]);
    assert_eq!(a.groups.len(), 2);
    assert_eq!(a.groups[0].kind(), FieldKind::Rest);
    assert_eq!(positions(&a, 0), vec![1, 2]);
    assert_eq!(a.groups[1].kind(), FieldKind::Subject);
    assert_eq!(positions(&a, 1), vec![0, 2]);
}

#[test]
fn action_can_be_the_varying_field() {
    let a = analyze_lines(&[
        "01-01-2012 19:45:00 Naomi is eating an apple",
        "01-01-2012 19:46:00 Naomi is peeling an apple",
    ]);
    assert_eq!(a.groups.len(), 1);
    assert_eq!(a.groups[0].kind(), FieldKind::Action);
    assert_eq!(a.groups[0].changing_values(&a.records), vec!["eating", "peeling"]);
}

#[test]
fn pairs_sharing_a_key_accumulate_into_one_group() {
    let a = analyze_lines(&[
        "01-01-2012 19:45:00 Naomi is eating an apple",
        "01-01-2012 19:46:00 Naomi is eating an orange",
        "01-01-2012 19:47:00 Naomi is eating an apple",
        "01-01-2012 19:48:00 Naomi is eating a pear",
    ]);
    // record 2 repeats record 0 exactly and is matched only against record 1
    assert_eq!(a.groups.len(), 1);
    assert_eq!(positions(&a, 0), vec![0, 1, 2]);
}

#[test]
fn identical_rest_is_never_a_match() {
    let a = analyze_lines(&[
        "01-01-2012 19:45:00 Naomi is eating an apple",
        "05-01-2012 08:00:00 Naomi is eating an apple",
    ]);
    assert!(a.groups.is_empty());
}

#[test]
fn two_token_or_length_difference_is_not_matched() {
    let a = analyze_lines(&[
        "01-01-2012 19:45:00 Naomi is getting into the car",
        "01-01-2012 20:12:39 George is eating apple",
        "01-01-2012 20:12:39 George is getting into the church",
        "01-01-2012 20:12:39 George is getting into a red bus",
    ]);
    assert!(a.groups.is_empty());
    assert!(!a.has_matches());
}

#[test]
fn single_record_produces_no_groups() {
    let a = analyze_lines(&["01-01-2012 19:45:00 Naomi is getting into the car"]);
    assert_eq!(a.records.len(), 1);
    assert!(a.groups.is_empty());
    assert!(!a.is_empty_input());
}

#[test]
fn empty_input_is_not_an_error() {
    let a = analyze_lines(&[]);
    assert!(a.is_empty_input());
    assert!(a.groups.is_empty());
    assert!(a.unparsable.is_empty());
}

#[test]
fn unparsable_lines_are_collected_in_order_and_skipped() {
    let a = analyze_lines(&[
        "01-01-2012 19:45:00 Naomi is getting into the car",
        "garbage one",
        "01-01-2012 20:12:39 George is getting into the restaurant",
        "01-01-2012 20:12:40 George and Neomi are getting into the restaurant",
        "01-01-2012 20:12:39 George is getting into the car",
    ]);
    assert_eq!(a.total_lines, 5);
    assert_eq!(a.records.len(), 3);
    let bad: Vec<(usize, &str)> = a.unparsable.iter().map(|u| (u.line_number, u.text.as_str())).collect();
    assert_eq!(bad, vec![
        (2, "garbage one"),
        (4, "01-01-2012 20:12:40 George and Neomi are getting into the restaurant"),
    ]);
    assert_eq!(a.groups.len(), 2);
    for g in &a.groups {
        for r in g.records(&a.records) {
            assert!(!r.text().contains("garbage"));
            assert!(!r.text().contains("Neomi"));
        }
    }
    // line numbers follow the input, positions follow parsed records
    assert_eq!(a.records[2].line_number, 5);
}

#[test]
fn push_line_reports_positions() {
    let mut engine = SimilarityEngine::new();
    assert_eq!(engine.push_line("01-01-2012 19:45:00 Naomi is eating an apple"), Some(0));
    assert_eq!(engine.push_line("not a record"), None);
    assert_eq!(engine.push_line("01-01-2012 19:46:00 Naomi is eating an orange"), Some(1));
    let a = engine.finish();
    assert_eq!(a.groups.len(), 1);
}

#[test]
fn key_order_sorts_by_fixed_pair_then_kind() {
    let a = analyze_lines(EXAMPLE);
    let ordered = a.ordered_groups(GroupOrder::Key);
    let keys: Vec<&GroupKey> = ordered.iter().map(|g| &g.key).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys[0].first, "Naomi");
    assert_eq!(keys[0].kind, FieldKind::Rest);
    assert_eq!(a.ordered_groups(GroupOrder::FirstMatch)[0].key.first, "getting");
}
