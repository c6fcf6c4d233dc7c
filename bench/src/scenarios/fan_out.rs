//! Fan-out benchmark scenario.
//!
//! Simulates a busy application bus:
//! - 64 channels with 32 handlers each, priorities drawn at random
//! - Every frame emits on a random selection of channels
//! - A top priority guard cancels a fixed share of events before the rest run
//!
//! This scenario tests:
//! - Snapshot + stable sort cost with mixed priorities
//! - Early exit on cancellation
//! - Lookup across many channels

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_emitter::{Emitter, Priority};

use crate::events::{PriorityMix, Tick, cancel_every, populate};
use crate::scenarios::Scenario;

/// Configuration for the fan-out benchmark.
#[derive(Debug, Clone)]
pub struct FanOutConfig {
    /// Number of distinct channels.
    pub channels: usize,
    /// Handlers registered on each channel.
    pub handlers_per_channel: usize,
    /// Events emitted per frame.
    pub emits_per_frame: usize,
    /// Cancel every n-th frame's events at the guard (0 disables cancellation).
    pub cancel_every: u64,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            channels: 64,
            handlers_per_channel: 32,
            emits_per_frame: 256,
            cancel_every: 4,
            seed: 12345,
        }
    }
}

/// Many channels, many handlers, random emission targets.
pub struct FanOutScenario {
    config: FanOutConfig,
    emitter: Emitter<Tick>,
    channel_names: Vec<String>,
    rng: ChaCha8Rng,
    frame: u64,
    /// Handler invocations observed, kept so the work can't be optimized away.
    pub total_hits: u64,
}

impl FanOutScenario {
    /// Create the scenario with default configuration.
    pub fn new() -> Self {
        Self::with_config(FanOutConfig::default())
    }

    /// Create the scenario with custom configuration.
    pub fn with_config(config: FanOutConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            emitter: Emitter::new(),
            channel_names: Vec::new(),
            rng,
            frame: 0,
            total_hits: 0,
        }
    }

    /// Emit a single event on a random channel.
    pub fn emit_one(&mut self) {
        let index = self.rng.gen_range(0..self.channel_names.len());
        let mut tick = Tick::new(self.frame);
        if self
            .emitter
            .emit(&self.channel_names[index], &mut tick)
            .is_ok()
        {
            self.total_hits += u64::from(tick.hits);
        }
    }
}

impl Default for FanOutScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for FanOutScenario {
    fn name(&self) -> &'static str {
        "fan_out"
    }

    fn description(&self) -> &'static str {
        "Random emission across many channels with mixed priorities and partial cancellation"
    }

    fn handler_count(&self) -> usize {
        // Each channel also carries its cancellation guard.
        self.config.channels * (self.config.handlers_per_channel + 1)
    }

    fn setup(&mut self) {
        self.channel_names = (0..self.config.channels)
            .map(|i| format!("channel-{i}"))
            .collect();

        for name in &self.channel_names {
            self.emitter
                .on_with_priority(name.as_str(), cancel_every(self.config.cancel_every), Priority::Top);
            populate(
                &self.emitter,
                name,
                self.config.handlers_per_channel,
                PriorityMix::Random,
                &mut self.rng,
            );
        }
    }

    fn update(&mut self) {
        self.frame += 1;
        for _ in 0..self.config.emits_per_frame {
            self.emit_one();
        }
    }

    fn teardown(&mut self) {
        self.emitter.clear();
        self.channel_names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> FanOutScenario {
        FanOutScenario::with_config(FanOutConfig {
            channels: 4,
            handlers_per_channel: 3,
            emits_per_frame: 10,
            cancel_every: 0,
            seed: 1,
        })
    }

    #[test]
    fn setup_registers_all_handlers() {
        let mut scenario = small();

        scenario.setup();

        let registered: usize = scenario
            .emitter
            .channels()
            .iter()
            .map(|c| scenario.emitter.listener_count(c))
            .sum();
        assert_eq!(registered, scenario.handler_count());
    }

    #[test]
    fn update_without_cancellation_reaches_every_handler() {
        let mut scenario = small();
        scenario.setup();

        scenario.update();

        // Guard + 3 handlers per emit.
        assert_eq!(scenario.total_hits, 10 * 4);
    }

    #[test]
    fn teardown_clears_emitter() {
        let mut scenario = small();
        scenario.setup();

        scenario.teardown();

        assert!(scenario.emitter.is_empty());
    }
}
