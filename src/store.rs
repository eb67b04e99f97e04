//! RecordStore — the owning collection of student records.
//!
//! The store fixes a `subject_count` for its matrix semantics: every record
//! it persists must carry exactly that many grades. The GRD1 blob stores the
//! count once for the whole store, never per record.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::errors::{GradebookError, Result};
use crate::record::StudentRecord;
use crate::wire::{encode_grade, encode_header, WireReader};

/// Thresholds for the statistics summary.
const EXCELLENT_THRESHOLD: f64 = 4.5;
const AT_RISK_THRESHOLD: f64 = 3.0;

/// Summary statistics over a whole store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoreStatistics {
    pub record_count: usize,
    /// Mean of the per-record averages; 0.0 for an empty store.
    pub overall_average: f64,
    /// Records with average >= 4.5.
    pub excellent: usize,
    /// Records with average < 3.0.
    pub at_risk: usize,
}

/// Owning, insertion-ordered collection of student records with GRD1
/// persistence.
#[derive(Debug, Clone, Serialize)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    subject_count: i32,
}

impl RecordStore {
    /// Create an empty store expecting `subject_count` grades per record.
    pub fn new(subject_count: i32) -> Self {
        Self {
            records: Vec::new(),
            subject_count,
        }
    }

    pub fn subject_count(&self) -> i32 {
        self.subject_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    /// Append a new record. Out-of-range grades are skipped individually;
    /// returns how many were rejected. Never fails on rejection.
    pub fn add(&mut self, id: u32, grades: &[f64]) -> usize {
        let (record, rejected) = StudentRecord::with_grades(id, grades);
        if rejected > 0 {
            debug!(id, rejected, "grades rejected during add");
        }
        self.records.push(record);
        rejected
    }

    /// First record with the given id.
    pub fn get(&self, id: u32) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut StudentRecord> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Remove the first record with the given id, returning it.
    pub fn remove(&mut self, id: u32) -> Result<StudentRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(GradebookError::MemberNotFound(id))?;
        Ok(self.records.remove(pos))
    }

    /// Serialize to the GRD1 wire format. Fails if `subject_count` is
    /// negative or any record's grade count differs from it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        // Mirrors the reader's header check: a negative count would produce
        // a blob our own from_bytes refuses.
        if self.subject_count < 0 {
            return Err(GradebookError::Format(format!(
                "negative subject count: {}",
                self.subject_count
            )));
        }
        let expected = self.subject_count as usize;
        for record in &self.records {
            if record.grade_count() != expected {
                return Err(GradebookError::Format(format!(
                    "record {} has {} grades, store expects {}",
                    record.id(),
                    record.grade_count(),
                    expected
                )));
            }
        }

        let mut buf = Vec::with_capacity(16 + self.records.len() * expected * 8);
        encode_header(&mut buf, self.records.len() as u32, self.subject_count);
        for record in &self.records {
            for &grade in record.grades() {
                encode_grade(&mut buf, grade);
            }
        }
        Ok(buf)
    }

    /// Deserialize a GRD1 blob into a fresh store. Record ids are assigned
    /// sequentially from 1 in stream order.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(data);
        let (record_count, subject_count) = reader.read_header()?;

        // The header's counts are untrusted: verify the stream actually
        // carries the promised grade bytes before allocating anything.
        if subject_count == 0 && record_count > 0 {
            return Err(GradebookError::Format(format!(
                "header promises {record_count} records with no subjects"
            )));
        }
        let promised = (record_count as u64)
            .checked_mul(subject_count as u64)
            .and_then(|n| n.checked_mul(8))
            .ok_or_else(|| {
                GradebookError::Format(format!(
                    "grade matrix size overflows: {record_count} x {subject_count}"
                ))
            })?;
        if (reader.remaining() as u64) < promised {
            return Err(GradebookError::Format(format!(
                "truncated stream: header promises {promised} grade bytes, {} available",
                reader.remaining()
            )));
        }

        let mut records = Vec::with_capacity(record_count as usize);
        for i in 0..record_count {
            let mut record = StudentRecord::new(i + 1);
            for _ in 0..subject_count {
                let grade = reader.read_f64()?;
                record
                    .add_grade(grade)
                    .map_err(|_| GradebookError::Format(format!("grade {grade} out of range")))?;
            }
            records.push(record);
        }

        Ok(Self {
            records,
            subject_count,
        })
    }

    /// Replace this store's contents from a GRD1 blob. On any failure the
    /// prior state is left untouched.
    pub fn reload(&mut self, data: &[u8]) -> Result<()> {
        *self = Self::from_bytes(data)?;
        Ok(())
    }

    /// Write the store to a file. No partial file is considered valid:
    /// serialization happens fully in memory before any write.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        debug!(
            path = %path.as_ref().display(),
            bytes = bytes.len(),
            records = self.records.len(),
            "store saved"
        );
        Ok(())
    }

    /// Read a store from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        let store = Self::from_bytes(&bytes)?;
        debug!(
            path = %path.as_ref().display(),
            bytes = bytes.len(),
            records = store.records.len(),
            "store loaded"
        );
        Ok(store)
    }

    /// Summary statistics. Pure read.
    pub fn statistics(&self) -> StoreStatistics {
        let record_count = self.records.len();
        if record_count == 0 {
            return StoreStatistics {
                record_count: 0,
                overall_average: 0.0,
                excellent: 0,
                at_risk: 0,
            };
        }

        let mut sum = 0.0;
        let mut excellent = 0;
        let mut at_risk = 0;
        for record in &self.records {
            let avg = record.average();
            sum += avg;
            if avg >= EXCELLENT_THRESHOLD {
                excellent += 1;
            }
            if avg < AT_RISK_THRESHOLD {
                at_risk += 1;
            }
        }

        StoreStatistics {
            record_count,
            overall_average: sum / record_count as f64,
            excellent,
            at_risk,
        }
    }

    /// Records as (id, average) pairs, sorted by average descending.
    /// Ties keep insertion order.
    pub fn ranking(&self) -> Vec<(u32, f64)> {
        let mut ranked: Vec<(u32, f64)> = self
            .records
            .iter()
            .map(|r| (r.id(), r.average()))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Drop every record with average below `threshold`. Returns how many
    /// were removed.
    pub fn retain_above(&mut self, threshold: f64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.average() >= threshold);
        before - self.records.len()
    }
}
