use std::fmt;

/// Progress of a refresh run. Transitions only move forward; `Done` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Fetching,
    Extracting,
    Done,
    Failed,
}

impl RunState {
    pub fn can_advance_to(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Start, RunState::Fetching)
                | (RunState::Fetching, RunState::Extracting)
                | (RunState::Fetching, RunState::Failed)
                | (RunState::Extracting, RunState::Done)
                | (RunState::Extracting, RunState::Failed)
        )
    }

    /// The next state, or `None` if the run cannot move from `self` to
    /// `next`.
    pub fn advance(self, next: RunState) -> Option<RunState> {
        self.can_advance_to(next).then_some(next)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Start => "start",
            RunState::Fetching => "fetching",
            RunState::Extracting => "extracting",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}
