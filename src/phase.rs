//! Play-session state machine
//!
//! waiting → playing ⇄ paused → game over → (reset) → waiting.
//! Only `Playing` lets intents mutate simulation entities; every other state
//! accepts nothing but its own transition intent, so input cannot leak into
//! a frozen game. Illegal transitions are silent no-ops.

/// Current phase of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Attract screen, entities at their initial placement.
    #[default]
    Waiting,
    /// Active gameplay.
    Playing,
    /// Frozen mid-run; entities untouched until resume.
    Paused,
    /// Run ended. Not an error - a first-class state.
    GameOver,
}

impl Phase {
    /// Begin a run. Only valid from `Waiting`.
    pub fn start(&mut self) -> bool {
        self.transition(Phase::Waiting, Phase::Playing)
    }

    /// Toggle between `Playing` and `Paused`. No-op elsewhere.
    pub fn toggle_pause(&mut self) -> bool {
        match *self {
            Phase::Playing => {
                *self = Phase::Paused;
                true
            }
            Phase::Paused => {
                *self = Phase::Playing;
                true
            }
            _ => false,
        }
    }

    /// The loss condition fired. Only valid from `Playing`.
    pub fn end(&mut self) -> bool {
        self.transition(Phase::Playing, Phase::GameOver)
    }

    /// Back to the attract screen. Only valid from `GameOver`.
    pub fn reset(&mut self) -> bool {
        self.transition(Phase::GameOver, Phase::Waiting)
    }

    pub fn is_playing(&self) -> bool {
        *self == Phase::Playing
    }

    fn transition(&mut self, from: Phase, to: Phase) -> bool {
        if *self == from {
            *self = to;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_session_walk() {
        let mut phase = Phase::default();
        assert_eq!(phase, Phase::Waiting);
        assert!(phase.start());
        assert!(phase.toggle_pause());
        assert_eq!(phase, Phase::Paused);
        assert!(phase.toggle_pause());
        assert!(phase.end());
        assert_eq!(phase, Phase::GameOver);
        assert!(phase.reset());
        assert_eq!(phase, Phase::Waiting);
    }

    #[test]
    fn illegal_transitions_leave_state_unchanged() {
        let mut phase = Phase::Waiting;
        assert!(!phase.end());
        assert!(!phase.reset());
        assert!(!phase.toggle_pause());
        assert_eq!(phase, Phase::Waiting);

        let mut phase = Phase::GameOver;
        assert!(!phase.start());
        assert!(!phase.toggle_pause());
        assert!(!phase.end());
        assert_eq!(phase, Phase::GameOver);
    }

    #[test]
    fn only_playing_accepts_gameplay() {
        assert!(Phase::Playing.is_playing());
        assert!(!Phase::Waiting.is_playing());
        assert!(!Phase::Paused.is_playing());
        assert!(!Phase::GameOver.is_playing());
    }
}
