use std::borrow::Cow;

use hideseek_core::AgentKind;
use serde::{Deserialize, Serialize};

/// One notable thing that happened during a tick.
///
/// Plain data so it can be recorded during a run and dumped or asserted on afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: AgentKind,
    pub tag: Cow<'static, str>,
    pub from: Cow<'static, str>,
    pub to: Cow<'static, str>,
}

impl TraceEvent {
    pub fn new(tick: u64, agent: AgentKind, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            agent,
            tag: tag.into(),
            from: Cow::Borrowed(""),
            to: Cow::Borrowed(""),
        }
    }

    /// A mode change, e.g. `hiding -> panic`.
    pub fn transition(tick: u64, agent: AgentKind, from: &'static str, to: &'static str) -> Self {
        Self::new(tick, agent, "mode")
            .with_from(from)
            .with_to(to)
    }

    pub fn with_from(mut self, from: impl Into<Cow<'static, str>>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_to(mut self, to: impl Into<Cow<'static, str>>) -> Self {
        self.to = to.into();
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl VecTraceSink {
    /// Events recorded for one agent, in order.
    pub fn for_agent(&self, agent: AgentKind) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.agent == agent)
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
