//! Turn orchestration for a chess match driven by a 4-direction cursor,
//! one confirm button and one cancel button.
//!
//! Layering, bottom up:
//! - [`domain`]: pure match-domain types (squares, cursor, history log).
//! - [`render`]: the 1-bit framebuffer the board picture is drawn into.
//! - [`engine`]: the consumed chess-engine collaborator, as a trait plus a
//!   shakmaty-backed implementation.
//! - [`models`]: match configuration and the central turn state machine.
//!
//! The hosting platform feeds [`models::MatchModel`] one input event at a
//! time and redraws after each; a single [`models::Outcome::Exit`] signal
//! covers cancel input, explicit exit requests and natural game end.

pub mod domain;
pub mod engine;
pub mod models;
pub mod render;
