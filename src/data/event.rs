// src/data/event.rs

//! Implement [`LogEvent`], one classified line of a fatal error report, and
//! the typed [`EventFields`] extracted from it.

use crate::data::catalog::{is_header, EventKind};

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// fields
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Which generation of JVM wrote a line shape that changed over time.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FormatEra {
    /// Older JVMs, e.g. `VM state:at safepoint` (no blank after the colon).
    #[default]
    Legacy,
    /// Newer JVMs, e.g. `VM state: at safepoint`.
    Modern,
}

/// One value of a resource limit, e.g. `8192k`, `4096`, `infinity`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RlimitValue {
    Infinity,
    /// Value written with a `k` suffix.
    Kilobytes(u64),
    /// Value without a suffix, e.g. a count of processes or files.
    Count(u64),
    /// The JVM wrote `could not obtain value`.
    Unknown,
}

impl fmt::Display for RlimitValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            RlimitValue::Infinity => write!(f, "infinity"),
            RlimitValue::Kilobytes(kb) => write!(f, "{}k", kb),
            RlimitValue::Count(count) => write!(f, "{}", count),
            RlimitValue::Unknown => write!(f, "unknown"),
        }
    }
}

/// One resource limit of an `rlimit:` line, e.g. `NOFILE 65536` or
/// `NOFILE 65536/65536`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rlimit {
    /// Resource name, e.g. `"STACK"`, `"NOFILE"`.
    pub resource: String,
    pub soft: RlimitValue,
    /// Only present for the `rlimit (soft/hard):` form.
    pub hard: Option<RlimitValue>,
}

/// One row of a native memory tracking summary.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NativeMemoryTrackingSummary {
    /// Memory category, e.g. `"Java Heap"`, `"Class"`, or `"Total"`.
    pub category: String,
    /// Committed memory in kilobytes.
    pub committed_kb: u64,
}

/// The VM operation in progress when the JVM crashed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VmOperation {
    /// e.g. `"G1CollectFull"`
    pub operation: String,
    /// e.g. `"safepoint"`
    pub mode: String,
}

/// The typed data extracted from a line, one variant per [`EventKind`] that
/// has an extractor.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum EventFields {
    Timezone {
        timezone: String,
    },
    VmState {
        state: String,
        era: FormatEra,
    },
    Rlimit {
        limits: Vec<Rlimit>,
    },
    NativeMemoryTracking(NativeMemoryTrackingSummary),
    VmOperation(VmOperation),
    BarrierSet {
        barrier_set: String,
    },
}

impl EventFields {
    /// The [`EventKind`] these fields are extracted from.
    pub const fn kind(&self) -> EventKind {
        match self {
            EventFields::Timezone { .. } => EventKind::Timezone,
            EventFields::VmState { .. } => EventKind::VmState,
            EventFields::Rlimit { .. } => EventKind::Rlimit,
            EventFields::NativeMemoryTracking(_) => EventKind::NativeMemoryTracking,
            EventFields::VmOperation(_) => EventKind::VmOperation,
            EventFields::BarrierSet { .. } => EventKind::BarrierSet,
        }
    }
}

impl fmt::Display for EventFields {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            EventFields::Timezone { timezone } => write!(f, "timezone={:?}", timezone),
            EventFields::VmState { state, era } => write!(f, "state={:?} era={:?}", state, era),
            EventFields::Rlimit { limits } => {
                for (i, limit) in limits.iter().enumerate() {
                    if i != 0 {
                        write!(f, " ")?;
                    }
                    match limit.hard {
                        Some(hard) => write!(f, "{}={}/{}", limit.resource, limit.soft, hard)?,
                        None => write!(f, "{}={}", limit.resource, limit.soft)?,
                    }
                }
                Ok(())
            }
            EventFields::NativeMemoryTracking(nmt) => {
                write!(f, "category={:?} committed_kb={}", nmt.category, nmt.committed_kb)
            }
            EventFields::VmOperation(op) => write!(f, "operation={:?} mode={:?}", op.operation, op.mode),
            EventFields::BarrierSet { barrier_set } => write!(f, "barrier_set={:?}", barrier_set),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogEvent
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One classified line of a fatal error report.
///
/// `raw` is always the original untrimmed line. `fields` is `Some` only for
/// kinds that have an extractor.
///
/// Created by [`classify_line`].
///
/// [`classify_line`]: crate::readers::lineclassifier::classify_line
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LogEvent {
    pub kind: EventKind,
    pub raw: String,
    pub fields: Option<EventFields>,
}

impl LogEvent {
    pub fn new(
        kind: EventKind,
        raw: String,
        fields: Option<EventFields>,
    ) -> LogEvent {
        debug_assert!(
            match &fields {
                Some(fields_) => fields_.kind() == kind,
                None => true,
            },
            "fields {:?} do not belong to kind {:?}",
            fields,
            kind,
        );

        LogEvent { kind, raw, fields }
    }

    /// See [`EventKind::is_discardable`].
    pub fn is_discardable(&self) -> bool {
        self.kind.is_discardable()
    }

    /// Is this the introductory line of its kind (e.g.
    /// `OutOfMemory and StackOverflow Exception counts:`) rather than a data
    /// line?
    pub fn is_header(&self) -> bool {
        is_header(self.kind, self.raw.as_str())
    }

    pub fn is_unrecognized(&self) -> bool {
        self.kind.is_unrecognized()
    }

    /// The timezone of a [`EventKind::Timezone`] event.
    pub fn timezone(&self) -> Option<&str> {
        match &self.fields {
            Some(EventFields::Timezone { timezone }) => Some(timezone.as_str()),
            _ => None,
        }
    }

    /// The state phrase of a [`EventKind::VmState`] event.
    pub fn vm_state(&self) -> Option<&str> {
        match &self.fields {
            Some(EventFields::VmState { state, .. }) => Some(state.as_str()),
            _ => None,
        }
    }

    /// The row of a [`EventKind::NativeMemoryTracking`] event.
    pub fn native_memory_tracking(&self) -> Option<&NativeMemoryTrackingSummary> {
        match &self.fields {
            Some(EventFields::NativeMemoryTracking(nmt)) => Some(nmt),
            _ => None,
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}\t{}", self.kind, self.raw)
    }
}
