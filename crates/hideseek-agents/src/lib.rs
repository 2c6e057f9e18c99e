//! Hider and Seeker agents.
//!
//! Both agents compose the same [`Body`] (continuous position, owned path, energy/speed model)
//! and differ only in their mode-transition logic, expressed through [`Behavior`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod body;
pub mod config;
pub mod energy;
pub mod hider;
pub mod seeker;

pub use behavior::Behavior;
pub use body::Body;
pub use config::{ConfigError, EnergyConfig, HiderConfig, SeekerConfig};
pub use energy::{EnergyEvent, EnergyState};
pub use hider::{Hider, HiderMode};
pub use seeker::{Seeker, SeekerMode};
