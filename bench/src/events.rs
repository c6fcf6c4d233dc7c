//! Event types and handler helpers shared by the benchmarks.

use rand::Rng;
use rusty_emitter::{Cancellation, Emitter, Event, HandlerId, HandlerResult, Priority};

/// A small event, roughly the size of a typical game or UI notification.
#[derive(Event, Debug, Clone, Default)]
pub struct Tick {
    /// Frame the event was emitted in.
    pub frame: u64,
    /// Incremented by every handler that sees the event.
    pub hits: u32,
    cancellation: Cancellation,
}

impl Tick {
    /// Create an uncancelled tick for a frame.
    pub fn new(frame: u64) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }
}

/// How priorities are assigned when populating a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityMix {
    /// Every handler shares one priority, so the sort sees only ties.
    Uniform(Priority),
    /// Priorities drawn uniformly at random.
    Random,
}

/// Handler that counts how many times the event was seen.
pub fn count_hits(_: &str, tick: &mut Tick) -> HandlerResult {
    tick.hits += 1;
    Ok(())
}

/// Handler that cancels every `every`-th frame.
pub fn cancel_every(every: u64) -> impl Fn(&str, &mut Tick) -> HandlerResult + Send + Sync + 'static {
    move |_: &str, tick: &mut Tick| {
        tick.hits += 1;
        if every != 0 && tick.frame % every == 0 {
            tick.cancel();
        }
        Ok(())
    }
}

/// Register `count` counting handlers on `channel`.
pub fn populate<R: Rng>(
    emitter: &Emitter<Tick>,
    channel: &str,
    count: usize,
    mix: PriorityMix,
    rng: &mut R,
) -> Vec<HandlerId> {
    (0..count)
        .map(|_| {
            let priority = match mix {
                PriorityMix::Uniform(priority) => priority,
                PriorityMix::Random => Priority::ALL[rng.gen_range(0..Priority::ALL.len())],
            };
            emitter.on_with_priority(channel, count_hits, priority)
        })
        .collect()
}
