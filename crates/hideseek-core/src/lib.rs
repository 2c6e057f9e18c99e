//! Deterministic, engine-agnostic kernel primitives shared by the hide-and-seek crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod rng;
pub mod tick;

pub use agent::{AgentId, AgentKind};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{Cooldown, TickContext};
