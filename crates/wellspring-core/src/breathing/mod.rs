mod driver;
mod engine;

pub use driver::BreathingDriver;
pub use engine::{BreathingEngine, Phase, CYCLE_SECS, GUIDE_BASE, GUIDE_PEAK};
