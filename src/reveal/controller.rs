use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::core::{Axis, ItemId},
    host::{NodeStyle, ScrollHost},
    sync::synchronizer::SyncSnapshot,
};

/// How and when an element reveals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    /// Fraction of the viewport width the leading edge must reach.
    pub threshold: f64,
    /// Reveal animation length in milliseconds.
    pub duration_ms: u64,
    /// Reveal easing.
    pub ease: Ease,
    /// Style while hidden; the revealed style is [`NodeStyle::IDENTITY`].
    pub hidden: NodeStyle,
}

impl RevealSpec {
    /// Animation length.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Per-element reveal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Behind the threshold (or failed to load).
    Hidden,
    /// Past the threshold, animating in since `started`.
    Revealing {
        /// Host time the animation began.
        started: Duration,
    },
    /// Fully shown.
    Revealed,
}

#[derive(Debug)]
struct Trigger<N> {
    item: ItemId,
    node: N,
    spec: RevealSpec,
    state: RevealState,
    leading_edge: Option<f64>,
    failed: bool,
}

/// Scroll-linked reveal triggers measured in synchronized coordinates.
///
/// Triggers registered before the synchronizer attaches stay pending until
/// [`RevealController::on_ready`] delivers the first snapshot.
#[derive(Debug)]
pub struct RevealController<N> {
    triggers: Vec<Trigger<N>>,
    last: Option<SyncSnapshot>,
    enabled: bool,
}

impl<N: Clone + std::fmt::Debug> RevealController<N> {
    /// Controller with no triggers, waiting for the synchronizer.
    pub fn new() -> Self {
        Self {
            triggers: Vec::new(),
            last: None,
            enabled: true,
        }
    }

    /// Whether the ready signal has been received.
    pub fn is_ready(&self) -> bool {
        self.last.is_some()
    }

    /// Add (or replace) the trigger for `item`.
    pub fn register<H: ScrollHost<Node = N>>(
        &mut self,
        host: &mut H,
        item: ItemId,
        node: N,
        spec: RevealSpec,
    ) {
        self.triggers.retain(|t| t.item != item);
        let mut trigger = Trigger {
            item,
            node,
            spec,
            state: RevealState::Hidden,
            leading_edge: None,
            failed: false,
        };
        if !self.enabled {
            host.set_style(&trigger.node, NodeStyle::IDENTITY);
            trigger.state = RevealState::Revealed;
            self.triggers.push(trigger);
            return;
        }
        if let Some(snapshot) = self.last {
            trigger.leading_edge = leading_edge(&*host, &trigger.node);
            host.set_style(&trigger.node, trigger.spec.hidden);
            self.triggers.push(trigger);
            self.evaluate(host, &snapshot);
        } else {
            tracing::trace!(item = %trigger.item, "reveal trigger pending synchronizer");
            self.triggers.push(trigger);
        }
    }

    /// Ready signal: arm every pending trigger against the first snapshot.
    pub fn on_ready<H: ScrollHost<Node = N>>(&mut self, host: &mut H, snapshot: &SyncSnapshot) {
        self.last = Some(*snapshot);
        if !self.enabled {
            return;
        }
        for t in &mut self.triggers {
            t.leading_edge = leading_edge(&*host, &t.node);
            t.state = RevealState::Hidden;
            host.set_style(&t.node, t.spec.hidden);
        }
        tracing::debug!(triggers = self.triggers.len(), "reveal triggers armed");
        self.evaluate(host, snapshot);
    }

    /// The synchronizer went away; triggers wait for the next ready signal.
    pub fn on_detached(&mut self) {
        self.last = None;
    }

    /// Re-measure leading edges after a layout change.
    pub fn remeasure<H: ScrollHost<Node = N>>(&mut self, host: &H) {
        for t in &mut self.triggers {
            t.leading_edge = leading_edge(&*host, &t.node);
        }
    }

    /// Switch animation on (pinned) or off (flowing). Disabled triggers show immediately,
    /// except failed ones.
    pub fn set_enabled<H: ScrollHost<Node = N>>(&mut self, host: &mut H, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        for t in &mut self.triggers {
            if enabled {
                t.state = RevealState::Hidden;
                host.set_style(&t.node, t.spec.hidden);
            } else if t.failed {
                t.state = RevealState::Hidden;
                host.set_style(&t.node, t.spec.hidden);
            } else {
                t.state = RevealState::Revealed;
                host.set_style(&t.node, NodeStyle::IDENTITY);
            }
        }
    }

    /// Apply threshold crossings for a new sample. Crossing forward starts the reveal,
    /// falling back hides the element again.
    pub fn evaluate<H: ScrollHost<Node = N>>(&mut self, host: &mut H, snapshot: &SyncSnapshot) {
        if !self.enabled || self.last.is_none() {
            return;
        }
        self.last = Some(*snapshot);
        let now = host.now();
        for t in &mut self.triggers {
            let Some(edge) = t.leading_edge else {
                continue;
            };
            let past = !t.failed
                && edge + snapshot.offset_x <= t.spec.threshold * snapshot.viewport.width;
            match (t.state, past) {
                (RevealState::Hidden, true) => {
                    t.state = RevealState::Revealing { started: now };
                }
                (RevealState::Revealing { .. } | RevealState::Revealed, false) => {
                    t.state = RevealState::Hidden;
                    host.set_style(&t.node, t.spec.hidden);
                }
                _ => {}
            }
        }
    }

    /// Advance running reveal animations.
    pub fn tick<H: ScrollHost<Node = N>>(&mut self, host: &mut H) {
        let now = host.now();
        for t in &mut self.triggers {
            let RevealState::Revealing { started } = t.state else {
                continue;
            };
            let elapsed = now.saturating_sub(started).as_secs_f64();
            let total = t.spec.duration().as_secs_f64();
            let f = if total <= 0.0 { 1.0 } else { elapsed / total };
            if f >= 1.0 {
                host.set_style(&t.node, NodeStyle::IDENTITY);
                t.state = RevealState::Revealed;
            } else {
                let style = t.spec.hidden.mix(NodeStyle::IDENTITY, t.spec.ease.apply(f));
                host.set_style(&t.node, style);
            }
        }
    }

    /// Media for `item` failed: keep it hidden for good.
    pub fn mark_failed<H: ScrollHost<Node = N>>(&mut self, host: &mut H, item: &ItemId) {
        for t in self.triggers.iter_mut().filter(|t| &t.item == item) {
            t.failed = true;
            t.state = RevealState::Hidden;
            host.set_style(&t.node, t.spec.hidden);
        }
    }

    /// State of `item`'s trigger.
    pub fn state_of(&self, item: &ItemId) -> Option<RevealState> {
        self.triggers
            .iter()
            .find(|t| &t.item == item)
            .map(|t| t.state)
    }
}

impl<N: Clone + std::fmt::Debug> Default for RevealController<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn leading_edge<H: ScrollHost>(host: &H, node: &H::Node) -> Option<f64> {
    host.measure(node, Axis::Horizontal).map(|e| e.offset)
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/controller.rs"]
mod tests;
