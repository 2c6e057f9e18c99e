//! Tick driver for the hide-and-seek engine.
//!
//! [`Simulation`] owns a [`hideseek_nav::TileGrid`] plus one Hider and one Seeker and steps them
//! in a fixed order. Everything observable about a run flows out through two seams: a
//! [`Renderer`] that receives per-tick [`Frame`] snapshots and a [`TraceSink`] that receives
//! mode transitions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod render;
pub mod sim;
pub mod trace;

pub use config::{ConfigError, SimConfig};
pub use render::{AgentView, AsciiRenderer, Frame, JsonLinesRenderer, NullRenderer, Renderer};
pub use sim::{Outcome, SimError, Simulation};
pub use trace::{NullTraceSink, TraceEvent, TraceSink, VecTraceSink};

/// Built-in map used when no layout file is given.
pub const DEFAULT_MAP: &str = "\
........................
..TTT.......~~~.....RR..
..TTT......~~~~~........
...T........~~~...TTT...
..........R.......TTT...
....RR....R.........T...
....RR..................
.............TT.........
..~~.........TTT....RRR.
..~~~.........T.........
...~....TT..............
........TTT.....~~......
.R.......T.....~~~~..TT.
.R..............~~...TT.
........................
";
