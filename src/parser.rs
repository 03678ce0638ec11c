use crate::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `[timestamp] [subject] is [action] [remainder]`, searched anywhere in the
/// line so a leading tag (syslog header, `[app]`) is skipped.
pub const PATTERN: &str = r"([0-9]{2}-[0-9]{2}-[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2}) (\S+) is (\S+) (.+)$";

static RE_RECORD: Lazy<Regex> = Lazy::new(|| Regex::new(PATTERN).unwrap());

/// A line that did not match [`PATTERN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unparsable {
    pub line_number: usize,
    pub text: String,
}

pub fn parse_line(line: &str, line_number: usize) -> Result<Record, Unparsable> {
    let trimmed = line.trim();
    match RE_RECORD.captures(trimmed) {
        Some(caps) => Ok(Record {
            line_number,
            timestamp: caps[1].to_string(),
            subject: caps[2].to_string(),
            action: caps[3].to_string(),
            rest: caps[4].to_string(),
        }),
        None => Err(Unparsable { line_number, text: line.to_string() }),
    }
}
