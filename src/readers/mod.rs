// src/readers/mod.rs

//! "Readers" for _jcllib_.
//!
//! * A [`LineClassifier`] classifies lines into [`LogEvent`]s and keeps a
//!   [`SummaryLineClassifier`] of what it saw.
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`LineClassifier`]: crate::readers::lineclassifier::LineClassifier
//! [`LogEvent`]: crate::data::event::LogEvent
//! [`SummaryLineClassifier`]: crate::readers::summary::SummaryLineClassifier

pub mod lineclassifier;
pub mod summary;
