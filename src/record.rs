//! StudentRecord — one student's id, grade sequence, and derived average.
//!
//! The average is recomputed after every mutation; it is never lazily
//! refreshed, so readers always see a value consistent with the grades.

use serde::Serialize;

use crate::errors::{GradebookError, Result};

pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 5.0;

/// A single student's grades and derived average.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    id: u32,
    grades: Vec<f64>,
    average: f64,
}

impl StudentRecord {
    /// Create an empty record. Average starts at 0.0.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            grades: Vec::new(),
            average: 0.0,
        }
    }

    /// Create a record from initial grades. Out-of-range grades are skipped,
    /// valid ones kept; returns the record and how many were rejected.
    pub fn with_grades(id: u32, grades: &[f64]) -> (Self, usize) {
        let mut record = Self::new(id);
        let rejected = record.add_grades(grades);
        (record, rejected)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    pub fn grade_count(&self) -> usize {
        self.grades.len()
    }

    /// Arithmetic mean of the current grades; 0.0 when empty.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Append one grade. Rejects values outside [0, 5] without touching
    /// the grade list.
    pub fn add_grade(&mut self, grade: f64) -> Result<()> {
        if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
            return Err(GradebookError::Validation(format!(
                "grade {grade} outside [{GRADE_MIN}, {GRADE_MAX}]"
            )));
        }
        self.grades.push(grade);
        self.recompute_average();
        Ok(())
    }

    /// Append a batch of grades, skipping out-of-range values individually.
    /// Returns the number rejected; accepted grades are still appended.
    pub fn add_grades(&mut self, grades: &[f64]) -> usize {
        let mut rejected = 0;
        for &grade in grades {
            if (GRADE_MIN..=GRADE_MAX).contains(&grade) {
                self.grades.push(grade);
            } else {
                rejected += 1;
            }
        }
        self.recompute_average();
        rejected
    }

    /// Remove the grade at `index`, returning it if present.
    pub fn remove_grade(&mut self, index: usize) -> Option<f64> {
        if index >= self.grades.len() {
            return None;
        }
        let grade = self.grades.remove(index);
        self.recompute_average();
        Some(grade)
    }

    pub fn highest_grade(&self) -> Option<f64> {
        self.grades.iter().copied().fold(None, |best, g| match best {
            Some(b) if b >= g => Some(b),
            _ => Some(g),
        })
    }

    pub fn lowest_grade(&self) -> Option<f64> {
        self.grades.iter().copied().fold(None, |best, g| match best {
            Some(b) if b <= g => Some(b),
            _ => Some(g),
        })
    }

    /// Number of grades strictly above `bar`.
    pub fn count_above(&self, bar: f64) -> usize {
        self.grades.iter().filter(|&&g| g > bar).count()
    }

    fn recompute_average(&mut self) {
        if self.grades.is_empty() {
            self.average = 0.0;
            return;
        }
        let sum: f64 = self.grades.iter().sum();
        self.average = sum / self.grades.len() as f64;
    }
}
