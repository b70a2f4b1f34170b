//! Per-bundle outcomes and the run report.

use ratedata_types::BundleKey;
use serde::Serialize;
use std::path::PathBuf;

/// Why a bundle produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The bundle does not exist at the source.
    Missing,
    /// The bundle could not be retrieved.
    Transport,
    /// The archive is corrupt or does not hold exactly one file.
    Archive,
    /// The bundle contents could not be parsed.
    Malformed,
    /// Output could not be written.
    Store,
}

impl SkipReason {
    /// All reasons, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Missing,
        Self::Transport,
        Self::Archive,
        Self::Malformed,
        Self::Store,
    ];

    /// Returns the reason's short name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Transport => "transport",
            Self::Archive => "archive",
            Self::Malformed => "malformed",
            Self::Store => "store",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum UnitStatus {
    /// The bundle was partitioned and its day files written.
    Written {
        /// Number of day segments.
        segments: usize,
        /// Number of ticks across all segments.
        ticks: usize,
        /// Files written, in date order.
        files: Vec<PathBuf>,
    },
    /// The bundle produced no output.
    Skipped {
        /// Category of the failure.
        reason: SkipReason,
        /// Error message, absent for missing bundles.
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

/// Outcome of one unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitOutcome {
    /// The bundle.
    pub key: BundleKey,
    /// What happened to it.
    #[serde(flatten)]
    pub status: UnitStatus,
}

impl UnitOutcome {
    /// Creates a written outcome.
    #[must_use]
    pub const fn written(
        key: BundleKey,
        segments: usize,
        ticks: usize,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            key,
            status: UnitStatus::Written {
                segments,
                ticks,
                files,
            },
        }
    }

    /// Creates a skipped outcome.
    #[must_use]
    pub const fn skipped(key: BundleKey, reason: SkipReason, detail: Option<String>) -> Self {
        Self {
            key,
            status: UnitStatus::Skipped { reason, detail },
        }
    }

    /// Returns true if the bundle was written.
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self.status, UnitStatus::Written { .. })
    }

    /// Returns the skip reason, if skipped.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        match &self.status {
            UnitStatus::Skipped { reason, .. } => Some(*reason),
            UnitStatus::Written { .. } => None,
        }
    }
}

impl std::fmt::Display for UnitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            UnitStatus::Written {
                segments, ticks, ..
            } => write!(f, "{}: {segments} days, {ticks} ticks", self.key),
            UnitStatus::Skipped {
                reason,
                detail: Some(detail),
            } => write!(f, "{}: skipped ({reason}: {detail})", self.key),
            UnitStatus::Skipped {
                reason,
                detail: None,
            } => write!(f, "{}: skipped ({reason})", self.key),
        }
    }
}

/// Outcomes of a run, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    outcomes: Vec<UnitOutcome>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: UnitOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns all outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    /// Returns the number of units.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if no units were processed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns the number of written units.
    #[must_use]
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    /// Returns the number of skipped units.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.len() - self.written()
    }

    /// Returns the number of units skipped for `reason`.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.skip_reason() == Some(reason))
            .count()
    }

    /// Returns the total number of day files written.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                UnitStatus::Written { segments, .. } => *segments,
                UnitStatus::Skipped { .. } => 0,
            })
            .sum()
    }

    /// Returns the total number of ticks written.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                UnitStatus::Written { ticks, .. } => *ticks,
                UnitStatus::Skipped { .. } => 0,
            })
            .sum()
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<UnitOutcome> for RunReport {
    fn from_iter<I: IntoIterator<Item = UnitOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}
