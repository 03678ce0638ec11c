use crate::aggregate::{Aggregator, GroupOrder, MatchGroup};
use crate::index::FieldIndices;
use crate::parser::{self, Unparsable};
use crate::record::{FieldKind, Record};
use crate::verify;

/// Single processing pass over an ordered batch of lines.
///
/// Each record is compared only against records that arrived before it: the
/// indices are consulted first and updated afterwards, so every qualifying
/// pair is found exactly once, by its later member.
#[derive(Debug, Default)]
pub struct SimilarityEngine {
    records: Vec<Record>,
    indices: FieldIndices,
    aggregator: Aggregator,
    unparsable: Vec<Unparsable>,
    total_lines: usize,
}

impl SimilarityEngine {
    pub fn new() -> Self { Self::default() }

    /// Parses and processes one line. Returns the record position, or `None`
    /// when the line was collected as unparsable.
    pub fn push_line(&mut self, line: &str) -> Option<usize> {
        self.total_lines += 1;
        match parser::parse_line(line, self.total_lines) {
            Ok(record) => Some(self.push_record(record)),
            Err(bad) => {
                tracing::warn!(line_number = bad.line_number, line = %bad.text, "line does not match pattern");
                self.unparsable.push(bad);
                None
            }
        }
    }

    pub fn push_record(&mut self, record: Record) -> usize {
        let position = self.records.len();
        for kind in FieldKind::ALL {
            self.match_against_prior(&record, position, kind);
        }
        self.indices.insert(&record, position);
        self.records.push(record);
        position
    }

    pub fn ingest<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push_line(line.as_ref());
        }
    }

    fn match_against_prior(&mut self, record: &Record, position: usize, kind: FieldKind) {
        let Some(candidates) = self.indices.candidates(record, kind) else {
            return;
        };
        let value = kind.value_of(record);
        for candidate in candidates {
            let other = kind.value_of(&self.records[candidate]);
            // exact duplicates are not a one-token variant
            if value == other {
                continue;
            }
            if verify::is_one_token_different(value, other)
                && self.aggregator.record_match(kind, record, position, candidate)
            {
                let (first, second) = kind.fixed_pair(record);
                tracing::debug!(kind = %kind, first, second, position, candidate, "new match group");
            }
        }
    }

    pub fn finish(self) -> Analysis {
        let analysis = Analysis {
            total_lines: self.total_lines,
            records: self.records,
            groups: self.aggregator.into_groups(),
            unparsable: self.unparsable,
        };
        if analysis.is_empty_input() {
            tracing::warn!("input is empty, no records exist");
        } else {
            tracing::debug!(
                lines = analysis.total_lines,
                records = analysis.records.len(),
                unparsable = analysis.unparsable.len(),
                groups = analysis.groups.len(),
                "finished processing lines"
            );
        }
        analysis
    }
}

/// Everything a finished pass produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub total_lines: usize,
    pub records: Vec<Record>,
    /// In first-match order.
    pub groups: Vec<MatchGroup>,
    pub unparsable: Vec<Unparsable>,
}

impl Analysis {
    pub fn is_empty_input(&self) -> bool { self.total_lines == 0 }

    pub fn has_matches(&self) -> bool { !self.groups.is_empty() }

    pub fn ordered_groups(&self, order: GroupOrder) -> Vec<&MatchGroup> {
        let mut groups: Vec<&MatchGroup> = self.groups.iter().collect();
        if order == GroupOrder::Key {
            groups.sort_by(|a, b| a.key.cmp(&b.key));
        }
        groups
    }
}

pub fn analyze_lines(lines: &[&str]) -> Analysis {
    let mut engine = SimilarityEngine::new();
    engine.ingest(lines.iter().copied());
    engine.finish()
}
