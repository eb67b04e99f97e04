//! GroupAggregator — non-owning membership over store-owned records.
//!
//! Members are record-id handles, not references: a group never allocates,
//! copies, or destroys a record, and a handle left behind after the record
//! was removed from its store resolves to a `MemberNotFound` error rather
//! than a dangling reference.

use crate::errors::{GradebookError, Result};
use crate::record::StudentRecord;
use crate::store::RecordStore;

/// An ordered roster of record-id handles with aggregate queries.
///
/// Duplicate handles are permitted and count multiple times in aggregates;
/// this is plain list semantics, not a set.
#[derive(Debug, Clone)]
pub struct GroupAggregator {
    name: String,
    members: Vec<u32>,
}

impl GroupAggregator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[u32] {
        &self.members
    }

    /// Append a member handle. No deduplication, no ownership taken.
    pub fn add_member(&mut self, id: u32) {
        self.members.push(id);
    }

    /// Remove the first matching handle. The record itself is unaffected.
    /// Returns whether a match was found.
    pub fn remove_member(&mut self, id: u32) -> bool {
        match self.members.iter().position(|&m| m == id) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop all handles. Referenced records are unaffected.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Linear-scan membership test.
    pub fn contains(&self, id: u32) -> bool {
        self.members.contains(&id)
    }

    /// Mean of member averages; 0.0 for an empty group. Fails with
    /// `MemberNotFound` if any handle no longer resolves in `store`.
    pub fn group_average(&self, store: &RecordStore) -> Result<f64> {
        if self.members.is_empty() {
            return Ok(0.0);
        }
        let mut sum = 0.0;
        for &id in &self.members {
            let record = store
                .get(id)
                .ok_or(GradebookError::MemberNotFound(id))?;
            sum += record.average();
        }
        Ok(sum / self.members.len() as f64)
    }

    /// Member with the strictly greatest average; ties go to the
    /// earliest-added member. `None` for an empty group.
    pub fn best_member<'a>(&self, store: &'a RecordStore) -> Result<Option<&'a StudentRecord>> {
        let mut best: Option<&StudentRecord> = None;
        for &id in &self.members {
            let record = store
                .get(id)
                .ok_or(GradebookError::MemberNotFound(id))?;
            match best {
                Some(b) if record.average() > b.average() => best = Some(record),
                None => best = Some(record),
                _ => {}
            }
        }
        Ok(best)
    }
}
