//! Match-level state: session configuration, the turn orchestration model,
//! AI invocation and game-state monitoring.

mod ai;
mod match_model;
mod monitor;
mod session;

pub use ai::AiInvoker;
pub use match_model::{InputEvent, MatchModel, Outcome, TurnPhase};
pub use monitor::GameStateMonitor;
pub use session::{Player, Session, Skill, StartSource};
