use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::Phase;

/// Every breathing-timer state change produces an Event.
/// The presentation layer polls snapshots; it never reads engine internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    BreathingStarted {
        phase: Phase,
        at: DateTime<Utc>,
    },
    /// The one-second tick crossed a phase boundary.
    PhaseAdvanced {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
    BreathingStopped {
        at: DateTime<Utc>,
    },
    /// Full state snapshot, emitted once per tick while running.
    BreathSnapshot {
        phase: Phase,
        /// Seconds elapsed within the current phase, always < `phase_secs`.
        elapsed_secs: u64,
        /// Duration of the current phase (0 while paused).
        phase_secs: u64,
        /// Derived guide-circle size for display.
        guide_size: f64,
        /// Guide label for the phase ("Breathe In", "Hold", ...).
        guide: String,
        running: bool,
        at: DateTime<Utc>,
    },
}
