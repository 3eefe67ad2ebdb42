//! Request lifecycle.
//!
//! Full video path:
//!
//! ```text
//! Idle → Validating → Generating{1/N} → … → Generating{N/N} → Materializing → Assembling
//!      → Delivering → Done
//! ```
//!
//! Image and ask requests skip straight from `Generating{1/1}` to `Delivering`. Any
//! non-terminal state may move to `Failed(kind)`.

use std::fmt;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Validation,
    Generation,
    Io,
    Encoding,
    Delivery,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Validation => "validation",
            FailureKind::Generation => "generation",
            FailureKind::Io => "io",
            FailureKind::Encoding => "encoding",
            FailureKind::Delivery => "delivery",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Validating,
    /// Producing frame `frame` (1-based) of `total`.
    Generating { frame: usize, total: usize },
    Materializing,
    Assembling,
    Delivering,
    Done,
    Failed(FailureKind),
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Done | RequestState::Failed(_))
    }

    pub fn can_transition_to(&self, next: &RequestState) -> bool {
        use RequestState::*;
        match (*self, *next) {
            (from, Failed(_)) => !from.is_terminal(),
            (Idle, Validating) => true,
            (Validating, Generating { frame: 1, total }) => total >= 1,
            (Generating { frame, total }, Generating { frame: next, total: next_total }) => {
                next_total == total && next == frame + 1 && next <= total
            }
            (Generating { frame, total }, Materializing | Delivering) => frame == total,
            (Materializing, Assembling) => true,
            (Assembling, Delivering) => true,
            (Delivering, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Idle => f.write_str("idle"),
            RequestState::Validating => f.write_str("validating"),
            RequestState::Generating { frame, total } => {
                write!(f, "generating {}/{}", frame, total)
            }
            RequestState::Materializing => f.write_str("materializing"),
            RequestState::Assembling => f.write_str("assembling"),
            RequestState::Delivering => f.write_str("delivering"),
            RequestState::Done => f.write_str("done"),
            RequestState::Failed(kind) => write!(f, "failed({})", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal transition {from} -> {to}")]
pub struct TransitionError {
    pub from: RequestState,
    pub to: RequestState,
}

/// One command invocation's state, with every state it has passed through.
#[derive(Debug, Clone)]
pub struct RequestMachine {
    command: &'static str,
    state: RequestState,
    history: Vec<RequestState>,
}

impl RequestMachine {
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            state: RequestState::Idle,
            history: vec![RequestState::Idle],
        }
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// States visited so far, starting with `Idle`.
    pub fn history(&self) -> &[RequestState] {
        &self.history
    }

    pub fn transition(&mut self, next: RequestState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(&next) {
            warn!(command = self.command, from = %self.state, to = %next, "Rejected state transition");
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }
        debug!(command = self.command, from = %self.state, to = %next, "State transition");
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// [`transition`](Self::transition) for steps that are legal by construction. A rejected
    /// step is a bug in the caller: it panics in debug builds and is logged and skipped in
    /// release builds.
    pub fn advance(&mut self, next: RequestState) {
        if let Err(e) = self.transition(next) {
            debug_assert!(false, "{} step skipped: {}", self.command, e);
        }
    }

    /// Moves to `Failed(kind)`. A request that already finished stays where it is.
    pub fn fail(&mut self, kind: FailureKind) {
        if self.state.is_terminal() {
            debug!(command = self.command, state = %self.state, failure = %kind, "Request already finished; failure not recorded");
            return;
        }
        self.advance(RequestState::Failed(kind));
    }
}
