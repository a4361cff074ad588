// src/data/datetime.rs

//! Normalize the build-date text a JVM reports about itself into one chrono
//! [`DateTime<FixedOffset>`] plus an "is estimate" flag.
//!
//! The JVM changed its self-reported build-timestamp format between major
//! releases. Four textual forms are known, declared in
//! [`BUILD_DATE_PARSE_DATAS`] and tried in that order, first match wins:
//!
//! | form                                  | example                  | estimate |
//! |---------------------------------------|--------------------------|----------|
//! | [`BuildDateForm::LegacyDate`]         | `2023-05-01`             | yes      |
//! | [`BuildDateForm::LegacyDateTime`]     | `2023-05-01 10:20:30`    | no       |
//! | [`BuildDateForm::ModernDate`]         | `2023-05-01`             | yes      |
//! | [`BuildDateForm::ModernDateTime`]     | `2023-05-01T10:20:30Z`   | no       |
//!
//! Legacy forms carry no offset; they are interpreted at a fallback offset
//! (UTC unless the caller says otherwise). `ModernDate` has the same shape as
//! `LegacyDate` so [`normalize_build_date`] never selects it; a caller that
//! knows the report is from a modern JVM reaches it with
//! [`parse_build_date_as`].
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//! - `regex` crate [Regular Expression syntax].
//!
//! [`DateTime<FixedOffset>`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
//! [Regular Expression syntax]: https://docs.rs/regex/1.11.1/regex/index.html#syntax

#![allow(non_camel_case_types)]

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

pub use ::chrono::{
    DateTime,
    FixedOffset,
    NaiveDateTime,
    Offset,
    SecondsFormat,
    TimeZone,
    Utc,
};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [chrono strftime] pattern.
///
/// [chrono strftime]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
pub type DateTimePattern_str = str;

/// Regular expression pattern matching one whole build-date text.
pub type DateTimeRegex_str = str;

/// The one internal representation of a build date.
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// A normalized build date and whether it is an estimate (no time of day was
/// supplied).
pub type BuildDate = (DateTimeL, bool);

/// The four known build-date textual forms.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BuildDateForm {
    /// `YYYY-MM-DD`
    LegacyDate,
    /// `YYYY-MM-DD HH:MM:SS`
    LegacyDateTime,
    /// `YYYY-MM-DD` written by JDK 21 and later
    ModernDate,
    /// RFC 3339, e.g. `YYYY-MM-DDTHH:MM:SSZ` or `YYYY-MM-DDTHH:MM:SS+02:00`
    ModernDateTime,
}

impl BuildDateForm {
    pub fn parse_instr(&self) -> &'static BuildDateParseInstr<'static> {
        match self {
            BuildDateForm::LegacyDate => &BUILD_DATE_PARSE_DATAS[0],
            BuildDateForm::LegacyDateTime => &BUILD_DATE_PARSE_DATAS[1],
            BuildDateForm::ModernDate => &BUILD_DATE_PARSE_DATAS[2],
            BuildDateForm::ModernDateTime => &BUILD_DATE_PARSE_DATAS[3],
        }
    }

    /// Does this form carry a time of day?
    pub fn has_time(&self) -> bool {
        self.parse_instr().has_time
    }

    /// Render `dt` back into this form, at this form's precision, in the
    /// offset of `dt`.
    pub fn render(
        &self,
        dt: &DateTimeL,
    ) -> String {
        match self {
            BuildDateForm::LegacyDate | BuildDateForm::ModernDate => dt.format(DTP_DATE).to_string(),
            BuildDateForm::LegacyDateTime => dt.format(DTP_LEGACY_DATETIME).to_string(),
            BuildDateForm::ModernDateTime => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl fmt::Display for BuildDateForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `Instr`uctions for `pars`ing one build-date form.
///
/// The text is matched against `regex_pattern`, then `suffix` is appended and
/// the result is parsed with `pattern`.
///
/// Tested in test `test_BUILD_DATE_PARSE_DATAS_builtin`.
#[derive(Hash)]
pub struct BuildDateParseInstr<'a> {
    pub form: BuildDateForm,
    /// Whole-text anchored regex pattern.
    pub regex_pattern: &'a DateTimeRegex_str,
    /// strftime pattern applied to the text plus `suffix`.
    pub pattern: &'a DateTimePattern_str,
    /// Appended to the text before parsing with `pattern`.
    pub suffix: &'a str,
    /// Does the text carry a time of day? If not the result is an estimate.
    pub has_time: bool,
    /// Does `pattern` carry an offset? If not the fallback offset is used.
    pub has_tz: bool,
    /// Hardcoded self-test cases.
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'a [&'a str],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

/// Declare a [`BuildDateParseInstr`] more easily.
#[macro_export]
macro_rules! BDPD {
    (
        $form:expr,
        $regex_pattern:expr,
        $pattern:expr,
        $suffix:expr,
        $has_time:literal,
        $has_tz:literal,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        $crate::data::datetime::BuildDateParseInstr {
            form: $form,
            regex_pattern: $regex_pattern,
            pattern: $pattern,
            suffix: $suffix,
            has_time: $has_time,
            has_tz: $has_tz,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
pub use BDPD;

impl fmt::Debug for BuildDateParseInstr<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        let mut f_ = f.debug_struct("BuildDateParseInstr:");
        f_.field("form", &self.form)
            .field("regex_pattern", &self.regex_pattern)
            .field("pattern", &self.pattern)
            .field("suffix", &self.suffix)
            .field("has_time", &self.has_time)
            .field("has_tz", &self.has_tz);
        f_.field("line", &self._line_num);

        f_.finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// build-date forms
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const RP_YMD: &DateTimeRegex_str = r"\d{4}-\d{2}-\d{2}";
const RP_HMS: &DateTimeRegex_str = r"\d{2}:\d{2}:\d{2}";
const RP_FRACTION: &DateTimeRegex_str = r"(?:\.\d{1,9})?";
const RP_OFFSET: &DateTimeRegex_str = r"(?:[Zz]|[+-]\d{2}:\d{2})";

const RP_DATE: &DateTimeRegex_str = concatcp!("^", RP_YMD, "$");
const RP_LEGACY_DATETIME: &DateTimeRegex_str = concatcp!("^", RP_YMD, " ", RP_HMS, "$");
const RP_MODERN_DATETIME: &DateTimeRegex_str = concatcp!("^", RP_YMD, "[Tt]", RP_HMS, RP_FRACTION, RP_OFFSET, "$");

const DTP_DATE: &DateTimePattern_str = "%Y-%m-%d";
const DTP_LEGACY_DATETIME: &DateTimePattern_str = "%Y-%m-%d %H:%M:%S";
/// RFC 3339, accepts `Z` or a numeric offset
const DTP_RFC3339: &DateTimePattern_str = "%+";

/// Midnight appended to a legacy date-only text.
const SUFFIX_LEGACY_MIDNIGHT: &str = " 00:00:00";
/// Midnight UTC appended to a modern date-only text.
const SUFFIX_MODERN_MIDNIGHT: &str = "T00:00:00Z";

pub const BUILD_DATE_PARSE_DATAS_LEN: usize = 4;

/// Built-in build-date forms, in the fixed order they are tried.
pub static BUILD_DATE_PARSE_DATAS: [BuildDateParseInstr; BUILD_DATE_PARSE_DATAS_LEN] = [
    BDPD!(
        BuildDateForm::LegacyDate,
        RP_DATE,
        DTP_LEGACY_DATETIME,
        SUFFIX_LEGACY_MIDNIGHT,
        false,
        false,
        &["2023-05-01", "2010-12-31"],
        line!(),
    ),
    BDPD!(
        BuildDateForm::LegacyDateTime,
        RP_LEGACY_DATETIME,
        DTP_LEGACY_DATETIME,
        "",
        true,
        false,
        &["2023-05-01 10:20:30", "2010-12-31 23:59:59"],
        line!(),
    ),
    BDPD!(
        BuildDateForm::ModernDate,
        RP_DATE,
        DTP_RFC3339,
        SUFFIX_MODERN_MIDNIGHT,
        false,
        true,
        &["2023-09-19", "2024-01-16"],
        line!(),
    ),
    BDPD!(
        BuildDateForm::ModernDateTime,
        RP_MODERN_DATETIME,
        DTP_RFC3339,
        "",
        true,
        true,
        &[
            "2023-09-19T12:00:00Z",
            "2024-01-16T08:30:15+02:00",
            "2024-01-16T08:30:15.250-05:00",
        ],
        line!(),
    ),
];

lazy_static! {
    /// Compiled `regex_pattern` of each of [`BUILD_DATE_PARSE_DATAS`], same
    /// order.
    pub static ref BUILD_DATE_PARSE_DATAS_REGEX_VEC: Vec<Regex> = {
        BUILD_DATE_PARSE_DATAS
            .iter()
            .map(|bdpd| match Regex::new(bdpd.regex_pattern) {
                Ok(regex) => regex,
                Err(err) => panic!("bad regex_pattern at line {}: {}", bdpd._line_num, err),
            })
            .collect()
    };
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The fallback offset for forms that carry none.
pub fn fixedoffset_utc() -> FixedOffset {
    Utc.fix()
}

/// Convert a [`&str`] to a chrono [`Option<DateTime<FixedOffset>>`]
/// instance.
///
/// Compensate for a missing timezone.
///
/// - `data` to parse that has a datetime string
/// - strftime `pattern` to use for parsing
/// - `has_tz`, the `pattern` has a timezone (`%z`, `%+`, etc.)?
/// - `tz_offset` fallback timezone offset when `!has_tz`
///
/// [`&str`]: str
/// [`Option<DateTime<FixedOffset>>`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html#impl-DateTime%3CFixedOffset%3E
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
    has_tz: bool,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    dpfn!("(pattern {:?}, tz_offset {:?}, data {:?})", pattern, tz_offset, str_to_String_noraw(data));

    if has_tz {
        match DateTime::parse_from_str(data, pattern) {
            Ok(val) => {
                dpfx!("DateTime::parse_from_str({:?}, {:?}) return Some({:?})", data, pattern, val);

                Some(val)
            }
            Err(_err) => {
                dpfx!("DateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);

                None
            }
        }
    } else {
        // no timezone in `pattern` so first convert to a `NaiveDateTime` instance
        let dt_naive = match NaiveDateTime::parse_from_str(data, pattern) {
            Ok(val) => {
                dpfo!("NaiveDateTime.parse_from_str({:?}, {:?}) extrapolated NaiveDateTime {:?}", data, pattern, val);

                val
            }
            Err(_err) => {
                dpfx!("NaiveDateTime.parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);
                return None;
            }
        };
        // second convert the `NaiveDateTime` instance to `DateTime<FixedOffset>` instance
        match tz_offset
            .from_local_datetime(&dt_naive)
            .earliest()
        {
            Some(val) => {
                dpfx!("tz_offset.from_local_datetime({:?}).earliest() return Some({:?})", dt_naive, val);

                Some(val)
            }
            None => {
                dpfx!("tz_offset.from_local_datetime({:?}).earliest() return None", dt_naive);

                None
            }
        }
    }
}

/// Parse `text` with exactly the one build-date `form`.
///
/// Returns `None` if `text` is not of that form.
pub fn parse_build_date_as(
    text: &str,
    form: BuildDateForm,
    tz_offset: &FixedOffset,
) -> Option<BuildDate> {
    let index = BUILD_DATE_PARSE_DATAS
        .iter()
        .position(|bdpd| bdpd.form == form)?;
    parse_build_date_at(text, index, tz_offset)
}

fn parse_build_date_at(
    text: &str,
    index: usize,
    tz_offset: &FixedOffset,
) -> Option<BuildDate> {
    let bdpd: &BuildDateParseInstr = &BUILD_DATE_PARSE_DATAS[index];
    if !BUILD_DATE_PARSE_DATAS_REGEX_VEC[index].is_match(text) {
        return None;
    }
    let data: String = match bdpd.suffix {
        "" => String::from(text),
        suffix => [text, suffix].concat(),
    };
    let dt = datetime_parse_from_str(data.as_str(), bdpd.pattern, bdpd.has_tz, tz_offset)?;

    Some((dt, !bdpd.has_time))
}

/// Normalize build-date `text` to an instant and an estimate flag, using the
/// fallback `tz_offset` for forms without an offset.
///
/// Tries each of [`BUILD_DATE_PARSE_DATAS`] in order, first match wins.
/// Returns `None` if no form matches; an unknown build date is not an error.
pub fn normalize_build_date_tz(
    text: &str,
    tz_offset: &FixedOffset,
) -> Option<BuildDate> {
    dpfn!("({:?}, {:?})", str_to_String_noraw(text), tz_offset);
    for index in 0..BUILD_DATE_PARSE_DATAS_LEN {
        if let Some(build_date) = parse_build_date_at(text, index, tz_offset) {
            dpfx!("return {:?} form {:?}", build_date, BUILD_DATE_PARSE_DATAS[index].form);
            return Some(build_date);
        }
    }
    dpfx!("return None");

    None
}

/// [`normalize_build_date_tz`] with fallback offset UTC.
pub fn normalize_build_date(text: &str) -> Option<BuildDate> {
    normalize_build_date_tz(text, &fixedoffset_utc())
}
