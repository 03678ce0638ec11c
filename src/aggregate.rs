use crate::record::{FieldKind, Record};
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Identifies a group: the two fixed field values plus the varying kind.
/// Ordering is by fixed pair first, then kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub first: String,
    pub second: String,
    pub kind: FieldKind,
}

impl GroupKey {
    pub fn new(kind: FieldKind, record: &Record) -> Self {
        let (first, second) = kind.fixed_pair(record);
        Self { first: first.to_string(), second: second.to_string(), kind }
    }
}

/// Order in which groups are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    /// Order in which each group was first matched.
    #[default]
    FirstMatch,
    /// Canonical [`GroupKey`] order.
    Key,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub key: GroupKey,
    pub positions: BTreeSet<usize>,
}

impl MatchGroup {
    pub fn kind(&self) -> FieldKind { self.key.kind }

    pub fn records<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        self.positions.iter().filter_map(move |&p| records.get(p))
    }

    /// Varying-field value of each member, ascending by position.
    pub fn changing_values<'a>(&'a self, records: &'a [Record]) -> Vec<&'a str> {
        let kind = self.key.kind;
        self.records(records).map(|r| kind.value_of(r)).collect()
    }
}

/// Accumulates verified pairs into groups, remembering creation order.
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: Vec<MatchGroup>,
    by_key: AHashMap<GroupKey, usize>,
}

impl Aggregator {
    pub fn new() -> Self { Self::default() }

    /// Adds `current` and `candidate` to the group for `kind` keyed on the
    /// current record's fixed pair. Returns true when the group was created.
    pub fn record_match(&mut self, kind: FieldKind, record: &Record, current: usize, candidate: usize) -> bool {
        let key = GroupKey::new(kind, record);
        let (slot, created) = match self.by_key.get(&key) {
            Some(&slot) => (slot, false),
            None => {
                let slot = self.groups.len();
                self.by_key.insert(key.clone(), slot);
                self.groups.push(MatchGroup { key, positions: BTreeSet::new() });
                (slot, true)
            }
        };
        let group = &mut self.groups[slot];
        group.positions.insert(current);
        group.positions.insert(candidate);
        created
    }

    pub fn get(&self, key: &GroupKey) -> Option<&MatchGroup> {
        self.by_key.get(key).map(|&slot| &self.groups[slot])
    }

    pub fn into_groups(self) -> Vec<MatchGroup> { self.groups }
}
