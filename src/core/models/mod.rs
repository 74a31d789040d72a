//! Data models for the study form

pub mod breaks;
pub mod rating;
pub mod subject;
pub mod time;

pub use breaks::{BreakFrequency, DEFAULT_BREAK_DURATION};
pub use rating::{Rating, WeightBand};
pub use subject::{sample_subjects, EntryWeight, SubjectEntry};
pub use time::TimeOfDay;
