use crate::record::{FieldKind, Record};
use ahash::{AHashMap, AHashSet};

pub type PositionSet = AHashSet<usize>;

/// Inverted index from one field's value to the positions of the records
/// carrying that value.
#[derive(Debug, Default)]
pub struct FieldIndex {
    map: AHashMap<String, PositionSet>,
}

impl FieldIndex {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, value: &str, position: usize) {
        if let Some(set) = self.map.get_mut(value) {
            set.insert(position);
        } else {
            let mut set = PositionSet::default();
            set.insert(position);
            self.map.insert(value.to_string(), set);
        }
    }

    pub fn lookup(&self, value: &str) -> Option<&PositionSet> {
        self.map.get(value)
    }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }
}

/// Positions present in both sets, ascending.
pub fn intersect(a: &PositionSet, b: &PositionSet) -> Vec<usize> {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut out: Vec<usize> = small.iter().copied().filter(|p| large.contains(p)).collect();
    out.sort_unstable();
    out
}

/// The subject, action and rest indices of one processing pass.
#[derive(Debug, Default)]
pub struct FieldIndices {
    subject: FieldIndex,
    action: FieldIndex,
    rest: FieldIndex,
}

impl FieldIndices {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, kind: FieldKind) -> &FieldIndex {
        match kind {
            FieldKind::Subject => &self.subject,
            FieldKind::Action => &self.action,
            FieldKind::Rest => &self.rest,
        }
    }

    /// Prior positions sharing both fixed fields of `record` for `varying`.
    /// `None` when either fixed value has never been seen.
    pub fn candidates(&self, record: &Record, varying: FieldKind) -> Option<Vec<usize>> {
        let (first_kind, second_kind) = fixed_kinds(varying);
        let first = self.get(first_kind).lookup(first_kind.value_of(record))?;
        let second = self.get(second_kind).lookup(second_kind.value_of(record))?;
        Some(intersect(first, second))
    }

    pub fn insert(&mut self, record: &Record, position: usize) {
        self.subject.insert(&record.subject, position);
        self.action.insert(&record.action, position);
        self.rest.insert(&record.rest, position);
    }
}

fn fixed_kinds(varying: FieldKind) -> (FieldKind, FieldKind) {
    match varying {
        FieldKind::Rest => (FieldKind::Subject, FieldKind::Action),
        FieldKind::Subject => (FieldKind::Action, FieldKind::Rest),
        FieldKind::Action => (FieldKind::Subject, FieldKind::Rest),
    }
}
