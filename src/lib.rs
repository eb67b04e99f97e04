//! gradebook — student grade records with binary persistence and group views.
//!
//! Two components make up the crate:
//!
//! - [`RecordStore`]: owns a collection of [`StudentRecord`]s, computes
//!   per-record and store-wide statistics, and round-trips the whole
//!   collection through the GRD1 binary format (see [`wire`]).
//! - [`GroupAggregator`]: a non-owning roster of record-id handles over a
//!   store, with aggregate queries and explicit stale-handle detection.
//!
//! The two never call each other; a caller wires them together and may point
//! any number of groups at the same store.

pub mod errors;
pub mod group;
pub mod record;
pub mod roster;
pub mod store;
pub mod wire;

pub use errors::{GradebookError, Result};
pub use group::GroupAggregator;
pub use record::{StudentRecord, GRADE_MAX, GRADE_MIN};
pub use roster::Person;
pub use store::{RecordStore, StoreStatistics};
