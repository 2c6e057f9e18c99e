use crate::{rng, AgentId, SplitMix64};

/// Per-tick context handed to every agent by the driver.
///
/// `tick` is the driver-owned monotonic counter; every cooldown in the engine is measured
/// against it so recomputation gating does not depend on wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub tick: u64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, seed: u64) -> Self {
        Self { tick, seed }
    }

    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}

/// A tick-based gate: "ready" once `ready_at` has been reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldown {
    ready_at: Option<u64>,
}

impl Cooldown {
    /// A cooldown that is ready immediately.
    pub fn ready() -> Self {
        Self { ready_at: None }
    }

    pub fn is_ready(&self, now: u64) -> bool {
        self.ready_at.map_or(true, |at| now >= at)
    }

    /// Arm the gate so it opens `ticks` after `now`.
    pub fn start(&mut self, now: u64, ticks: u64) {
        self.ready_at = Some(now.saturating_add(ticks));
    }

    pub fn reset(&mut self) {
        self.ready_at = None;
    }

    pub fn remaining(&self, now: u64) -> u64 {
        self.ready_at.map_or(0, |at| at.saturating_sub(now))
    }
}
