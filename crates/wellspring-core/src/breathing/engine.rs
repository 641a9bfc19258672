//! Breathing-cycle state machine.
//!
//! The engine is a caller-driven state machine. It does not use internal
//! threads - the caller (or [`super::BreathingDriver`]) is responsible for
//! calling `tick()` once per second while running.
//!
//! ## State Transitions
//!
//! ```text
//! Paused -> Inhale -> Hold1 -> Exhale -> Hold2 -> Inhale -> ...
//! ```
//!
//! The cycle repeats indefinitely once started and only returns to `Paused`
//! via an explicit `stop()`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// One full 4-4-6-2 cycle in seconds.
pub const CYCLE_SECS: u64 = 16;

/// Guide-circle size while at rest (display units).
pub const GUIDE_BASE: f64 = 50.0;

/// Guide-circle size at full inhale (display units).
pub const GUIDE_PEAK: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Paused,
    Inhale,
    Hold1,
    Exhale,
    Hold2,
}

impl Phase {
    /// Fixed phase duration in whole seconds. `None` for `Paused`, which
    /// never auto-transitions.
    pub fn duration_secs(self) -> Option<u64> {
        match self {
            Phase::Paused => None,
            Phase::Inhale => Some(4),
            Phase::Hold1 => Some(4),
            Phase::Exhale => Some(6),
            Phase::Hold2 => Some(2),
        }
    }

    /// Next phase in cycle order. `Paused` only leaves via `start()`.
    pub fn next(self) -> Phase {
        match self {
            Phase::Paused => Phase::Paused,
            Phase::Inhale => Phase::Hold1,
            Phase::Hold1 => Phase::Exhale,
            Phase::Exhale => Phase::Hold2,
            Phase::Hold2 => Phase::Inhale,
        }
    }

    /// On-screen instruction for the phase.
    pub fn guide_label(self) -> &'static str {
        match self {
            Phase::Paused => "Press start when ready",
            Phase::Inhale => "Breathe In",
            Phase::Hold1 | Phase::Hold2 => "Hold",
            Phase::Exhale => "Breathe Out",
        }
    }
}

/// Cyclic breathing timer.
///
/// Operates on one-second ticks -- no internal thread. `elapsed_in_phase`
/// stays in `[0, duration)`; crossing the bound advances the phase and
/// resets the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingEngine {
    phase: Phase,
    elapsed_in_phase: u64,
    running: bool,
    #[serde(default = "default_guide_base")]
    guide_base: f64,
    #[serde(default = "default_guide_peak")]
    guide_peak: f64,
}

fn default_guide_base() -> f64 {
    GUIDE_BASE
}

fn default_guide_peak() -> f64 {
    GUIDE_PEAK
}

impl Default for BreathingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Paused,
            elapsed_in_phase: 0,
            running: false,
            guide_base: GUIDE_BASE,
            guide_peak: GUIDE_PEAK,
        }
    }

    /// Override the guide-circle rest/peak sizes (display units).
    pub fn with_guide(mut self, base: f64, peak: f64) -> Self {
        self.guide_base = base;
        self.guide_peak = peak;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_in_phase(&self) -> u64 {
        self.elapsed_in_phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Derived guide-circle size: grows linearly over an inhale, holds at
    /// peak, shrinks linearly over an exhale, holds at base.
    pub fn guide_size(&self) -> f64 {
        let span = self.guide_peak - self.guide_base;
        match self.phase {
            Phase::Paused | Phase::Hold2 => self.guide_base,
            Phase::Hold1 => self.guide_peak,
            Phase::Inhale => {
                let dur = 4.0;
                self.guide_base + (self.elapsed_in_phase as f64 / dur) * span
            }
            Phase::Exhale => {
                let dur = 6.0;
                self.guide_peak - (self.elapsed_in_phase as f64 / dur) * span
            }
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::BreathSnapshot {
            phase: self.phase,
            elapsed_secs: self.elapsed_in_phase,
            phase_secs: self.phase.duration_secs().unwrap_or(0),
            guide_size: self.guide_size(),
            guide: self.phase.guide_label().to_string(),
            running: self.running,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the cycle at `Inhale`. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.phase = Phase::Inhale;
        self.elapsed_in_phase = 0;
        self.running = true;
        Some(Event::BreathingStarted {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    /// Reset to `{Paused, 0, false}`. Idempotent.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.running && self.phase == Phase::Paused {
            return None;
        }
        self.phase = Phase::Paused;
        self.elapsed_in_phase = 0;
        self.running = false;
        Some(Event::BreathingStopped { at: Utc::now() })
    }

    /// Advance one second. Returns `Some(Event::PhaseAdvanced)` when the
    /// tick crosses a phase boundary, `None` otherwise (including while
    /// paused).
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        let duration = self.phase.duration_secs()?;
        self.elapsed_in_phase += 1;
        if self.elapsed_in_phase >= duration {
            let from = self.phase;
            self.phase = self.phase.next();
            self.elapsed_in_phase = 0;
            return Some(Event::PhaseAdvanced {
                from,
                to: self.phase,
                at: Utc::now(),
            });
        }
        None
    }
}
