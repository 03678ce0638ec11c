use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Layout of the timestamp captured by the parser, day first.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line_number: usize,
    pub timestamp: String,
    pub subject: String,
    pub action: String,
    pub rest: String,
}

impl Record {
    pub fn text(&self) -> String {
        format!("{} {} is {} {}", self.timestamp, self.subject, self.action, self.rest)
    }

    /// Interprets the timestamp; `None` when the digits do not form a real date.
    pub fn time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// The field that varies between the two records of a match. The other two
/// fields form the fixed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Subject,
    Action,
    Rest,
}

impl FieldKind {
    /// Evaluation order used by the candidate generator.
    pub const ALL: [FieldKind; 3] = [FieldKind::Rest, FieldKind::Subject, FieldKind::Action];

    pub fn value_of<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            FieldKind::Subject => record.subject.as_str(),
            FieldKind::Action => record.action.as_str(),
            FieldKind::Rest => record.rest.as_str(),
        }
    }

    pub fn fixed_pair<'a>(&self, record: &'a Record) -> (&'a str, &'a str) {
        match self {
            FieldKind::Subject => (record.action.as_str(), record.rest.as_str()),
            FieldKind::Action => (record.subject.as_str(), record.rest.as_str()),
            FieldKind::Rest => (record.subject.as_str(), record.action.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Subject => "subject",
            FieldKind::Action => "action",
            FieldKind::Rest => "rest",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
