//! Process lifecycle state machine.

use std::fmt;

/// Where the process is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Starting,
    Serving,
    ShuttingDown,
    Stopped,
    Fatal,
}

impl LifecycleState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;

        matches!(
            (self, next),
            (Idle, Starting)
                | (Starting, Serving)
                | (Starting, Fatal)
                | (Serving, ShuttingDown)
                | (Serving, Fatal)
                | (ShuttingDown, Stopped)
                | (ShuttingDown, Fatal)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Starting => "starting",
            LifecycleState::Serving => "serving",
            LifecycleState::ShuttingDown => "shutting_down",
            LifecycleState::Stopped => "stopped",
            LifecycleState::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Tracks and logs state transitions.
#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Idle,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Move to `next`. Illegal transitions are logged and ignored.
    pub fn transition(&mut self, next: LifecycleState) {
        if !self.state.can_transition_to(next) {
            tracing::error!(from = %self.state, to = %next, "Illegal lifecycle transition");
            return;
        }

        tracing::debug!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::LifecycleState::*;

    #[test]
    fn test_happy_path() {
        let mut lifecycle = Lifecycle::new();
        for next in [Starting, Serving, ShuttingDown, Stopped] {
            lifecycle.transition(next);
            assert_eq!(lifecycle.state(), next);
        }
        assert_eq!(lifecycle.state(), Stopped);
    }

    #[test]
    fn test_illegal_transition_is_ignored() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.transition(Serving);
        assert_eq!(lifecycle.state(), Idle);

        lifecycle.transition(Starting);
        lifecycle.transition(Stopped);
        assert_eq!(lifecycle.state(), Starting);
    }

    #[test]
    fn test_fatal_reachable_from_active_states() {
        assert!(Starting.can_transition_to(Fatal));
        assert!(Serving.can_transition_to(Fatal));
        assert!(ShuttingDown.can_transition_to(Fatal));
        assert!(!Idle.can_transition_to(Fatal));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for next in [Idle, Starting, Serving, ShuttingDown, Stopped, Fatal] {
            assert!(!Stopped.can_transition_to(next));
            assert!(!Fatal.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(!Idle.can_transition_to(Serving));
        assert!(!Starting.can_transition_to(ShuttingDown));
        assert!(!Serving.can_transition_to(Stopped));
    }
}
