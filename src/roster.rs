//! Person variants sharing a display/classification contract.
//!
//! Students carry a grade record (composition: the record lives and dies
//! with the person); teachers carry subject and experience. Both answer
//! `classify` and format themselves for display.

use std::fmt;

use serde::Serialize;

use crate::record::StudentRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Person {
    Student {
        name: String,
        record: StudentRecord,
    },
    Teacher {
        name: String,
        subject: String,
        years_experience: u32,
    },
}

impl Person {
    pub fn student(name: impl Into<String>, record: StudentRecord) -> Self {
        Self::Student {
            name: name.into(),
            record,
        }
    }

    pub fn teacher(
        name: impl Into<String>,
        subject: impl Into<String>,
        years_experience: u32,
    ) -> Self {
        Self::Teacher {
            name: name.into(),
            subject: subject.into(),
            years_experience,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Student { name, .. } | Self::Teacher { name, .. } => name,
        }
    }

    pub fn classify(&self) -> &'static str {
        match self {
            Self::Student { .. } => "Student",
            Self::Teacher { .. } => "Teacher",
        }
    }

    /// Grade average for students; teachers have none and report 0.0.
    pub fn average(&self) -> f64 {
        match self {
            Self::Student { record, .. } => record.average(),
            Self::Teacher { .. } => 0.0,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student { name, record } => write!(
                f,
                "Student: {} (record {}, avg {:.2})",
                name,
                record.id(),
                record.average()
            ),
            Self::Teacher {
                name,
                subject,
                years_experience,
            } => write!(f, "Teacher: {name}, {subject} ({years_experience} years)"),
        }
    }
}
