// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// TODO: use `std::path::Path` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;

/// Path `"-"` signifies the report is read from STDIN.
pub const FPATH_STDIN: &str = "-";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// General purpose counting type, used for summary statistics.
pub type Count = u64;

/// Zero-based position of a line within the report it was read from.
///
/// The classifier itself never tags events with a position; callers that
/// reorder work (e.g. [`classify_lines_parallel`]) pair results with a
/// `LineNumber` and re-sort.
///
/// [`classify_lines_parallel`]: crate::readers::lineclassifier::classify_lines_parallel
pub type LineNumber = usize;

/// NewLine as char
#[allow(dead_code, non_upper_case_globals)]
pub const NLc: char = '\n';
/// Carriage Return as char
#[allow(dead_code, non_upper_case_globals)]
pub const CRc: char = '\r';

/// Remove one trailing `"\n"` or `"\r\n"` from `line`.
///
/// Only the line terminator is removed, all other whitespace is preserved;
/// a `LogEvent` must hold the untrimmed line.
pub fn strip_line_terminator(line: &str) -> &str {
    match line.strip_suffix(NLc) {
        Some(line_) => line_.strip_suffix(CRc).unwrap_or(line_),
        None => line,
    }
}
