// src/data/release.rs

//! Implement [`Release`], the build metadata a JVM reports about itself.

use crate::data::datetime::{normalize_build_date_tz, fixedoffset_utc, DateTimeLOpt, FixedOffset};

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// Build metadata of the crashed JVM.
///
/// `build_date` is `None` when the source text matched no known build-date
/// form; callers treat that as "unknown", not as a failure.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Release {
    pub build_date: DateTimeLOpt,
    /// `true` iff the build-date text had no time of day.
    pub is_build_date_estimate: bool,
    pub number: u32,
    pub version: String,
}

impl Release {
    /// Create a `Release`, normalizing `build_date_text` with fallback offset
    /// UTC.
    pub fn new(
        build_date_text: &str,
        number: u32,
        version: String,
    ) -> Release {
        Self::new_tz(build_date_text, number, version, &fixedoffset_utc())
    }

    /// Create a `Release`, normalizing `build_date_text` with fallback offset
    /// `tz_offset` for build-date forms that carry no offset.
    pub fn new_tz(
        build_date_text: &str,
        number: u32,
        version: String,
        tz_offset: &FixedOffset,
    ) -> Release {
        dpfn!("({:?}, {}, {:?}, {:?})", build_date_text, number, version, tz_offset);
        let (build_date, is_build_date_estimate) = match normalize_build_date_tz(build_date_text, tz_offset) {
            Some((dt, estimate)) => (Some(dt), estimate),
            None => (None, false),
        };
        let release = Release {
            build_date,
            is_build_date_estimate,
            number,
            version,
        };
        dpfx!("return {:?}", release);

        release
    }

    pub fn has_build_date(&self) -> bool {
        self.build_date.is_some()
    }
}

impl fmt::Display for Release {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.number)?;
        match self.build_date {
            Some(dt) if self.is_build_date_estimate => write!(f, " built ~{}", dt.format("%Y-%m-%d")),
            Some(dt) => write!(f, " built {}", dt.to_rfc3339()),
            None => write!(f, " built unknown"),
        }
    }
}
