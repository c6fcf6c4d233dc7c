//! Handler churn benchmark scenario.
//!
//! Simulates short-lived subscribers, such as UI widgets or request-scoped listeners:
//! - A stable base of handlers on one channel
//! - Every frame registers a batch of handlers, emits, then removes the batch again
//! - A share of the batch are one-shot handlers that remove themselves
//!
//! This scenario tests:
//! - Registration and removal throughput
//! - Removal scanning across channels
//! - One-shot claim overhead during dispatch

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_emitter::{Emitter, HandlerId, Priority};

use crate::events::{PriorityMix, Tick, count_hits, populate};
use crate::scenarios::Scenario;

/// Configuration for the churn benchmark.
#[derive(Debug, Clone)]
pub struct ChurnConfig {
    /// Long-lived handlers on the churned channel.
    pub base_handlers: usize,
    /// Handlers added and removed each frame.
    pub batch_size: usize,
    /// Fraction of the batch registered as one-shot handlers.
    pub once_ratio: f64,
    /// Idle channels that removal has to scan past.
    pub idle_channels: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            base_handlers: 64,
            batch_size: 128,
            once_ratio: 0.25,
            idle_channels: 32,
            seed: 12345,
        }
    }
}

const CHANNEL: &str = "churn";

/// Register, emit, remove; every frame.
pub struct ChurnScenario {
    config: ChurnConfig,
    emitter: Emitter<Tick>,
    rng: ChaCha8Rng,
    batch: Vec<HandlerId>,
    frame: u64,
    /// Handler invocations observed, kept so the work can't be optimized away.
    pub total_hits: u64,
}

impl ChurnScenario {
    /// Create the scenario with default configuration.
    pub fn new() -> Self {
        Self::with_config(ChurnConfig::default())
    }

    /// Create the scenario with custom configuration.
    pub fn with_config(config: ChurnConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let batch = Vec::with_capacity(config.batch_size);
        Self {
            config,
            emitter: Emitter::new(),
            rng,
            batch,
            frame: 0,
            total_hits: 0,
        }
    }

    fn register_batch(&mut self) {
        for _ in 0..self.config.batch_size {
            let priority = Priority::ALL[self.rng.gen_range(0..Priority::ALL.len())];
            let id = if self.rng.gen_bool(self.config.once_ratio) {
                self.emitter.once(CHANNEL, count_hits, priority)
            } else {
                self.emitter.on_with_priority(CHANNEL, count_hits, priority)
            };
            self.batch.push(id);
        }
    }

    fn remove_batch(&mut self) {
        // One-shot handlers that already fired are simply not found.
        for id in self.batch.drain(..) {
            self.emitter.off(id);
        }
    }
}

impl Default for ChurnScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ChurnScenario {
    fn name(&self) -> &'static str {
        "churn"
    }

    fn description(&self) -> &'static str {
        "Per-frame registration and removal of short-lived and one-shot handlers"
    }

    fn handler_count(&self) -> usize {
        self.config.base_handlers + self.config.idle_channels
    }

    fn setup(&mut self) {
        populate(
            &self.emitter,
            CHANNEL,
            self.config.base_handlers,
            PriorityMix::Uniform(Priority::Medium),
            &mut self.rng,
        );
        for i in 0..self.config.idle_channels {
            self.emitter.on(format!("idle-{i}"), count_hits);
        }
    }

    fn update(&mut self) {
        self.frame += 1;
        self.register_batch();

        let mut tick = Tick::new(self.frame);
        if self.emitter.emit(CHANNEL, &mut tick).is_ok() {
            self.total_hits += u64::from(tick.hits);
        }

        self.remove_batch();
    }

    fn teardown(&mut self) {
        self.remove_batch();
        self.emitter.clear();
    }
}
