//! Two-step delete confirmation
//!
//! Deleting a node or an edge takes two clicks: the first arms the
//! control, the second fires. One explicit state machine covers both
//! targets; clicking anywhere else or leaving the target's hover region
//! disarms it.

/// What an armed confirmation would delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmTarget {
    Node(String),
    Edge(String),
}

/// Events fed into the state machine by the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
    /// The delete control for `target` was clicked
    Click(ConfirmTarget),
    /// A click landed somewhere other than an armed control
    ClickElsewhere,
    /// The pointer left the armed target's hover region
    PointerLeft,
}

/// Armed-or-idle state of the single pending confirmation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    Armed(ConfirmTarget),
}

impl ConfirmState {
    /// Advances the machine; returns the target to delete when a
    /// confirmation fires.
    pub fn on_event(&mut self, event: ConfirmEvent) -> Option<ConfirmTarget> {
        match (std::mem::take(self), event) {
            (ConfirmState::Armed(armed), ConfirmEvent::Click(clicked)) if armed == clicked => {
                Some(clicked)
            }
            // Clicking a different delete control re-arms on that target.
            (_, ConfirmEvent::Click(clicked)) => {
                *self = ConfirmState::Armed(clicked);
                None
            }
            (_, ConfirmEvent::ClickElsewhere) | (_, ConfirmEvent::PointerLeft) => None,
        }
    }

    /// True when `target` is the armed target
    pub fn is_armed(&self, target: &ConfirmTarget) -> bool {
        matches!(self, ConfirmState::Armed(armed) if armed == target)
    }

    pub fn armed_target(&self) -> Option<&ConfirmTarget> {
        match self {
            ConfirmState::Armed(target) => Some(target),
            ConfirmState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> ConfirmTarget {
        ConfirmTarget::Node(id.to_string())
    }

    #[test]
    fn first_click_arms_second_fires() {
        let mut state = ConfirmState::default();

        assert_eq!(state.on_event(ConfirmEvent::Click(node("MathNode-1"))), None);
        assert!(state.is_armed(&node("MathNode-1")));

        let fired = state.on_event(ConfirmEvent::Click(node("MathNode-1")));
        assert_eq!(fired, Some(node("MathNode-1")));
        assert_eq!(state, ConfirmState::Idle);
    }

    #[test]
    fn click_elsewhere_disarms() {
        let mut state = ConfirmState::default();
        state.on_event(ConfirmEvent::Click(node("MathNode-1")));

        assert_eq!(state.on_event(ConfirmEvent::ClickElsewhere), None);
        assert_eq!(state, ConfirmState::Idle);

        // A later click starts a fresh arming cycle.
        assert_eq!(state.on_event(ConfirmEvent::Click(node("MathNode-1"))), None);
        assert!(state.is_armed(&node("MathNode-1")));
    }

    #[test]
    fn leaving_hover_disarms() {
        let mut state = ConfirmState::default();
        state.on_event(ConfirmEvent::Click(ConfirmTarget::Edge("e1".into())));

        assert_eq!(state.on_event(ConfirmEvent::PointerLeft), None);
        assert_eq!(state, ConfirmState::Idle);
    }

    #[test]
    fn clicking_another_target_rearms() {
        let mut state = ConfirmState::default();
        state.on_event(ConfirmEvent::Click(node("MathNode-1")));

        assert_eq!(state.on_event(ConfirmEvent::Click(node("LoggerNode-1"))), None);
        assert!(state.is_armed(&node("LoggerNode-1")));
        assert!(!state.is_armed(&node("MathNode-1")));
    }
}
