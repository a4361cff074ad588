// src/data/mod.rs

//! The `data` module is the line taxonomy of a JVM fatal error report
//! (`hs_err_pid*.log`) and the typed values extracted from those lines.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is one line of a fatal error report with the line terminator
//! removed. Leading and trailing blanks are significant.
//!
//! ### Event kind
//!
//! An [`EventKind`] is the shape of a line, e.g. `timezone: UTC` is of kind
//! `timezone`. Every known shape is declared in the [`EVENT_PARSE_DATAS`]
//! catalog. A line matching no shape is of kind `unrecognized`.
//!
//! Some kinds are "discardable"; they are recognized so they are not
//! mistaken for something else, but they are never surfaced in a final
//! report.
//!
//! ### Event
//!
//! A [`LogEvent`] is one classified line: the kind, the untouched raw line,
//! and, for some kinds, typed [`EventFields`] pulled out by the
//! [field extractors].
//!
//! ### Release
//!
//! A [`Release`] is the build metadata of the crashed JVM. Its build date is
//! normalized from one of several textual forms by the
//! [date normalizer].
//!
//! [`EventKind`]: crate::data::catalog::EventKind
//! [`EVENT_PARSE_DATAS`]: crate::data::catalog::EVENT_PARSE_DATAS
//! [`LogEvent`]: crate::data::event::LogEvent
//! [`EventFields`]: crate::data::event::EventFields
//! [field extractors]: crate::data::fields
//! [`Release`]: crate::data::release::Release
//! [date normalizer]: crate::data::datetime

pub mod catalog;
pub mod datetime;
pub mod event;
pub mod fields;
pub mod release;
