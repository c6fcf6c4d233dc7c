//! Realistic dispatch scenario benchmarks.
//!
//! These scenarios simulate real-world emitter usage with representative channel counts,
//! priority mixes and handler lifetimes.
//!
//! # Scenarios
//!
//! - **Fan-out**: Many channels, many long-lived handlers, a share of events cancelled early
//! - **Churn**: Short-lived handlers registered and removed every frame alongside emission

pub mod churn;
pub mod fan_out;

pub use churn::{ChurnConfig, ChurnScenario};
pub use fan_out::{FanOutConfig, FanOutScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of handlers registered once the scenario is set up.
    fn handler_count(&self) -> usize;

    /// Set up the scenario (register handlers, seed state).
    fn setup(&mut self);

    /// Run one "frame" of the scenario.
    fn update(&mut self);

    /// Clean up the scenario.
    fn teardown(&mut self);
}
