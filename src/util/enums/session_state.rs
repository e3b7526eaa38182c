use std::fmt::{Display, Formatter};

/// Lifecycle of a mount setup session
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SessionState {
    Open,
    Configuring,
    Configured,
    Failed,
    Closed,
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionState::Open => "open",
            SessionState::Configuring => "configuring",
            SessionState::Configured => "configured",
            SessionState::Failed => "failed",
            SessionState::Closed => "closed",
        };
        f.write_str(s)
    }
}
