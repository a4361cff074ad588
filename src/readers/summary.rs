// src/readers/summary.rs

//! Implements `Summary` statistics tracking structs.

#![allow(non_snake_case)]

use crate::common::{Count, FPath};
use crate::data::catalog::{EventKind, EVENT_KINDS_ALL, EVENT_KINDS_LEN};

use std::fmt;

use ::more_asserts::debug_assert_le;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SummaryLineClassifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accumulated statistics of a [`LineClassifier`].
///
/// Statistics only; never consulted during classification.
///
/// [`LineClassifier`]: crate::readers::lineclassifier::LineClassifier
#[derive(Clone, Default, Eq, PartialEq)]
pub struct SummaryLineClassifier {
    /// Lines passed to the classifier.
    pub lineclassifier_lines: Count,
    /// Lines classified, per [`EventKind`], indexed by `EventKind as usize`.
    pub lineclassifier_kinds: [Count; EVENT_KINDS_LEN],
    /// Lines of a discardable kind.
    pub lineclassifier_discardable: Count,
    /// Lines of [`EventKind::Unrecognized`].
    pub lineclassifier_unrecognized: Count,
    /// Lines that are the header line of their kind.
    pub lineclassifier_headers: Count,
    /// Lines with extracted fields.
    pub lineclassifier_fields: Count,
    /// Lines whose field extraction failed.
    pub lineclassifier_extract_errors: Count,
}

impl SummaryLineClassifier {
    /// Count of lines classified as `kind`.
    pub fn count_kind(
        &self,
        kind: EventKind,
    ) -> Count {
        self.lineclassifier_kinds[kind as usize]
    }

    /// Count of lines of a recognized kind.
    pub fn count_recognized(&self) -> Count {
        self.lineclassifier_lines - self.lineclassifier_unrecognized - self.lineclassifier_extract_errors
    }

    /// Add the counts of `other` to `self`.
    pub fn merge(
        &mut self,
        other: &SummaryLineClassifier,
    ) {
        self.lineclassifier_lines += other.lineclassifier_lines;
        for (count, count_other) in self
            .lineclassifier_kinds
            .iter_mut()
            .zip(other.lineclassifier_kinds.iter())
        {
            *count += count_other;
        }
        self.lineclassifier_discardable += other.lineclassifier_discardable;
        self.lineclassifier_unrecognized += other.lineclassifier_unrecognized;
        self.lineclassifier_headers += other.lineclassifier_headers;
        self.lineclassifier_fields += other.lineclassifier_fields;
        self.lineclassifier_extract_errors += other.lineclassifier_extract_errors;
        debug_assert_le!(self.lineclassifier_fields, self.lineclassifier_lines);
    }

    /// Return maximum value among the counters.
    ///
    /// Helpful to format terminal column widths.
    pub fn max_count(&self) -> Count {
        self.lineclassifier_kinds
            .iter()
            .copied()
            .chain([self.lineclassifier_lines])
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Debug for SummaryLineClassifier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("")
            .field("lines", &self.lineclassifier_lines)
            .field("discardable", &self.lineclassifier_discardable)
            .field("unrecognized", &self.lineclassifier_unrecognized)
            .field("headers", &self.lineclassifier_headers)
            .field("fields", &self.lineclassifier_fields)
            .field("extract errors", &self.lineclassifier_extract_errors)
            .finish()
    }
}

/// One line per counter, then one line per [`EventKind`] seen, widths
/// aligned.
impl fmt::Display for SummaryLineClassifier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        let width: usize = self.max_count().to_string().len();
        writeln!(f, "  lines        : {:width$}", self.lineclassifier_lines, width = width)?;
        writeln!(f, "  discardable  : {:width$}", self.lineclassifier_discardable, width = width)?;
        writeln!(f, "  unrecognized : {:width$}", self.lineclassifier_unrecognized, width = width)?;
        writeln!(f, "  headers      : {:width$}", self.lineclassifier_headers, width = width)?;
        writeln!(f, "  fields       : {:width$}", self.lineclassifier_fields, width = width)?;
        writeln!(f, "  errors       : {:width$}", self.lineclassifier_extract_errors, width = width)?;
        for kind in EVENT_KINDS_ALL.iter() {
            let count = self.count_kind(*kind);
            if count == 0 {
                continue;
            }
            writeln!(f, "    {:<24}: {:width$}", kind.as_str(), count, width = width)?;
        }

        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Summary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accumulated statistics about processing of a single path.
///
/// For CLI option `--summary`.
#[derive(Clone, Default)]
pub struct Summary {
    /// the `FPath` of the processed file
    pub path: FPath,
    /// the `Count` of bytes read
    pub bytes: Count,
    pub summarylineclassifier: SummaryLineClassifier,
    /// The first encountered [`Error`], if any, as a `String`.
    ///
    /// [`Error`]: std::io::Error
    pub error: Option<String>,
}

impl Summary {
    pub fn new(
        path: FPath,
        bytes: Count,
        summarylineclassifier: SummaryLineClassifier,
        error: Option<String>,
    ) -> Summary {
        Summary {
            path,
            bytes,
            summarylineclassifier,
            error,
        }
    }

    /// Summary of a path that could not be read.
    pub fn new_failed(
        path: FPath,
        error: String,
    ) -> Summary {
        Summary {
            path,
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some() || self.summarylineclassifier.lineclassifier_extract_errors != 0
    }
}

impl fmt::Debug for Summary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("")
            .field("path", &self.path)
            .field("bytes", &self.bytes)
            .field("lines", &self.summarylineclassifier.lineclassifier_lines)
            .field("error", &self.error)
            .finish()
    }
}

