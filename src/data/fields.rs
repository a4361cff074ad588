// src/data/fields.rs

//! Field extractors: pull the typed [`EventFields`] out of a line already
//! known to be of some [`EventKind`].
//!
//! Extractors trust the caller; [`extract_fields`] must only be passed a
//! `line` for which [`lookup`] returned `kind`. Each extractor takes the
//! named capture groups of the catalog regular expression for `kind`. A
//! missing capture means the catalog and the extractor disagree, which is a
//! defect in this crate and not bad input, so it is returned as an
//! [`ExtractError`] and never defaulted.
//!
//! [`lookup`]: crate::data::catalog::lookup

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::data::catalog::{
    event_regex,
    EventKind,
    CaptureGroupName,
    RLIMIT_UNKNOWN,
    CGN_BARRIER_SET,
    CGN_CATEGORY,
    CGN_COMMITTED,
    CGN_LIMITS,
    CGN_LIMITS_SOFTHARD,
    CGN_MODE,
    CGN_OPERATION,
    CGN_STATE,
    CGN_STATE_SEP,
    CGN_TIMEZONE,
    CGN_TOTAL,
    CGN_TOTAL_COMMITTED,
};
use crate::data::event::{
    EventFields,
    FormatEra,
    NativeMemoryTrackingSummary,
    Rlimit,
    RlimitValue,
    VmOperation,
};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};

use ::regex::Captures;
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

/// An extractor could not find what the catalog promised.
#[derive(Clone, Debug, Eq, PartialEq, ::thiserror::Error)]
pub enum ExtractError {
    /// The line does not have the expected capture region.
    #[error("{kind} line is missing capture {group:?}: {line:?}")]
    MissingCapture {
        kind: EventKind,
        group: &'static CaptureGroupName,
        line: String,
    },
    /// A captured number does not fit the field type.
    #[error("{kind} line has a number that does not fit: {value:?}")]
    BadNumber {
        kind: EventKind,
        value: String,
    },
    /// An rlimit entry is not `NAME value` or `NAME soft/hard`.
    #[error("{kind} line has a malformed resource limit: {item:?}")]
    BadRlimit {
        kind: EventKind,
        item: String,
    },
}

/// Result of [`extract_fields`]. `Ok(None)` for kinds without an extractor.
pub type ExtractResult = Result<Option<EventFields>, ExtractError>;

/// Extract the [`EventFields`] of `line`, presuming `line` is of `kind`.
///
/// Dispatches to the extractor for `kind`. Kinds without an extractor return
/// `Ok(None)`.
pub fn extract_fields(
    kind: EventKind,
    line: &str,
) -> ExtractResult {
    dpfn!("({:?}, {:?})", kind, str_to_String_noraw(line));
    let result: ExtractResult = match kind {
        EventKind::Timezone => extract_timezone(line).map(Some),
        EventKind::VmState => extract_vm_state(line).map(Some),
        EventKind::Rlimit => extract_rlimit(line).map(Some),
        EventKind::NativeMemoryTracking => extract_native_memory_tracking(line).map(Some),
        EventKind::VmOperation => extract_vm_operation(line).map(Some),
        EventKind::BarrierSet => extract_barrier_set(line).map(Some),
        EventKind::Heading
        | EventKind::LoadAverage
        | EventKind::Pid
        | EventKind::CdsArchive
        | EventKind::CompressedClassSpace
        | EventKind::JvmtiAgents
        | EventKind::LdPreloadFile
        | EventKind::ExceptionCounts
        | EventKind::NativeDecoderState
        | EventKind::TransparentHugepage
        | EventKind::Timeout
        | EventKind::DecodingCodeBlob
        | EventKind::Uptime
        | EventKind::Unrecognized => Ok(None),
    };
    if let Err(ref _err) = result {
        de_err!("{}", _err);
    }
    dpfx!("return {:?}", result);

    result
}

/// Run the catalog regex of `kind` on `line`.
fn captures<'a>(
    kind: EventKind,
    group: &'static CaptureGroupName,
    line: &'a str,
) -> Result<Captures<'a>, ExtractError> {
    let missing = || ExtractError::MissingCapture {
        kind,
        group,
        line: line.to_string(),
    };
    let regex = event_regex(kind).ok_or_else(missing)?;

    regex.captures(line).ok_or_else(missing)
}

/// Get the named capture `group`, which must have participated in the match.
fn capture_str<'a>(
    captures: &Captures<'a>,
    kind: EventKind,
    group: &'static CaptureGroupName,
    line: &str,
) -> Result<&'a str, ExtractError> {
    match captures.name(group) {
        Some(match_) => Ok(match_.as_str()),
        None => Err(ExtractError::MissingCapture {
            kind,
            group,
            line: line.to_string(),
        }),
    }
}

fn parse_u64(
    kind: EventKind,
    value: &str,
) -> Result<u64, ExtractError> {
    value
        .parse::<u64>()
        .map_err(|_| ExtractError::BadNumber {
            kind,
            value: value.to_string(),
        })
}

/// `timezone: UTC` → `"UTC"`
pub fn extract_timezone(line: &str) -> Result<EventFields, ExtractError> {
    const KIND: EventKind = EventKind::Timezone;
    let captures = captures(KIND, CGN_TIMEZONE, line)?;
    let timezone = capture_str(&captures, KIND, CGN_TIMEZONE, line)?;

    Ok(EventFields::Timezone {
        timezone: timezone.to_string(),
    })
}

/// `VM state:at safepoint (normal execution)` →
/// `"at safepoint (normal execution)"`, [`FormatEra::Legacy`]
///
/// A blank after the colon means [`FormatEra::Modern`].
pub fn extract_vm_state(line: &str) -> Result<EventFields, ExtractError> {
    const KIND: EventKind = EventKind::VmState;
    let captures = captures(KIND, CGN_STATE, line)?;
    let state = capture_str(&captures, KIND, CGN_STATE, line)?;
    let era = match capture_str(&captures, KIND, CGN_STATE_SEP, line)? {
        "" => FormatEra::Legacy,
        _ => FormatEra::Modern,
    };

    Ok(EventFields::VmState {
        state: state.to_string(),
        era,
    })
}

/// Parse one rlimit value, `infinity`, `8192k`, `4096`, or
/// `could not obtain value`.
pub fn parse_rlimit_value(
    kind: EventKind,
    value: &str,
) -> Result<RlimitValue, ExtractError> {
    match value {
        "infinity" => return Ok(RlimitValue::Infinity),
        RLIMIT_UNKNOWN => return Ok(RlimitValue::Unknown),
        _ => {}
    }
    match value.strip_suffix('k') {
        Some(kb) => Ok(RlimitValue::Kilobytes(parse_u64(kind, kb)?)),
        None => Ok(RlimitValue::Count(parse_u64(kind, value)?)),
    }
}

/// `rlimit: STACK 8192k, CORE infinity` →
/// `[STACK 8192k, CORE infinity]`
///
/// `rlimit (soft/hard): STACK 8192k/infinity , CORE 0k/infinity` →
/// `[STACK 8192k/infinity, CORE 0k/infinity]`
///
/// A resource written as `could not obtain value` is
/// [`RlimitValue::Unknown`], for both limits in the soft/hard form.
pub fn extract_rlimit(line: &str) -> Result<EventFields, ExtractError> {
    const KIND: EventKind = EventKind::Rlimit;
    let captures = captures(KIND, CGN_LIMITS, line)?;
    let (limits_str, softhard): (&str, bool) = match captures.name(CGN_LIMITS) {
        Some(limits) => (limits.as_str(), false),
        None => (capture_str(&captures, KIND, CGN_LIMITS_SOFTHARD, line)?, true),
    };
    dpfo!("softhard {}, limits {:?}", softhard, limits_str);

    let bad_rlimit = |item: &str| ExtractError::BadRlimit {
        kind: KIND,
        item: item.to_string(),
    };
    let mut limits: Vec<Rlimit> = Vec::with_capacity(10);
    for item in limits_str.split(',') {
        let item = item.trim();
        let (resource, value) = match item.split_once(' ') {
            Some(val) => val,
            None => return Err(bad_rlimit(item)),
        };
        let (soft, hard) = match (softhard, value.split_once('/')) {
            (true, Some((soft, hard))) => (
                parse_rlimit_value(KIND, soft)?,
                Some(parse_rlimit_value(KIND, hard)?),
            ),
            (true, None) if value == RLIMIT_UNKNOWN => (RlimitValue::Unknown, Some(RlimitValue::Unknown)),
            (false, None) => (parse_rlimit_value(KIND, value)?, None),
            (true, None) | (false, Some(_)) => return Err(bad_rlimit(item)),
        };
        limits.push(Rlimit {
            resource: resource.to_string(),
            soft,
            hard,
        });
    }

    Ok(EventFields::Rlimit { limits })
}

/// `-                 Java Heap (reserved=4194304KB, committed=262144KB)` →
/// `("Java Heap", 262144)`
///
/// `Total: reserved=5799365KB, committed=492261KB` → `("Total", 492261)`
pub fn extract_native_memory_tracking(line: &str) -> Result<EventFields, ExtractError> {
    const KIND: EventKind = EventKind::NativeMemoryTracking;
    let captures = captures(KIND, CGN_CATEGORY, line)?;
    let (category, committed) = match captures.name(CGN_CATEGORY) {
        Some(category) => (category.as_str(), capture_str(&captures, KIND, CGN_COMMITTED, line)?),
        None => (
            capture_str(&captures, KIND, CGN_TOTAL, line)?,
            capture_str(&captures, KIND, CGN_TOTAL_COMMITTED, line)?,
        ),
    };

    Ok(EventFields::NativeMemoryTracking(NativeMemoryTrackingSummary {
        category: category.to_string(),
        committed_kb: parse_u64(KIND, committed)?,
    }))
}

/// `VM_Operation (0x...): G1CollectFull, mode: safepoint, requested by thread 0x...`
/// → `("G1CollectFull", "safepoint")`
pub fn extract_vm_operation(line: &str) -> Result<EventFields, ExtractError> {
    const KIND: EventKind = EventKind::VmOperation;
    let captures = captures(KIND, CGN_OPERATION, line)?;
    let operation = capture_str(&captures, KIND, CGN_OPERATION, line)?;
    let mode = capture_str(&captures, KIND, CGN_MODE, line)?;

    Ok(EventFields::VmOperation(VmOperation {
        operation: operation.to_string(),
        mode: mode.to_string(),
    }))
}

/// `Barrier set: G1BarrierSet` → `"G1BarrierSet"`
pub fn extract_barrier_set(line: &str) -> Result<EventFields, ExtractError> {
    const KIND: EventKind = EventKind::BarrierSet;
    let captures = captures(KIND, CGN_BARRIER_SET, line)?;
    let barrier_set = capture_str(&captures, KIND, CGN_BARRIER_SET, line)?;

    Ok(EventFields::BarrierSet {
        barrier_set: barrier_set.to_string(),
    })
}
