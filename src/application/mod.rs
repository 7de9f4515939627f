//! Application layer - session orchestration over the domain and ports.

mod coach_session;

pub use coach_session::{CoachSession, Exchange, SubmitError, FAILURE_PLACEHOLDER};
