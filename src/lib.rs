// src/lib.rs

//! _jcllib_ classifies the lines of a JVM fatal error report
//! (`hs_err_pid*.log`) into a closed taxonomy of [`EventKind`]s and extracts
//! typed fields from the lines that carry them.
//!
//! The most relevant function is [`classify_line`].
//!
//! Also see [_Definitions of data_].
//!
//! [`EventKind`]: crate::data::catalog::EventKind
//! [`classify_line`]: crate::readers::lineclassifier::classify_line
//! [_Definitions of data_]: crate::data

pub mod common;
pub mod data;
pub mod debug;
pub mod readers;
#[cfg(test)]
pub mod tests;
