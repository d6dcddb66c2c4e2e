//! Search-effort resolution and invocation of the engine's move search.

use tracing::debug;

use super::session::Skill;
use crate::engine::{ChosenMove, Engine, SearchParams};

/// Plies during which opening randomness stays enabled. Past this point the
/// search is reproducible for a fixed seed and position.
const RANDOM_OPENING_PLIES: u32 = 2;

/// Derives effective search parameters from the configured skill level and
/// the optional time budget, then requests a move from the engine. The
/// call is synchronous and blocking; effort is bounded only by the depths
/// chosen here.
pub struct AiInvoker;

impl AiInvoker {
    /// Resolve search effort. The clock, when configured, takes precedence
    /// over the skill defaults.
    pub fn search_params(skill: Skill, clock_seconds: Option<u32>, ply: u32) -> SearchParams {
        let mut depth = skill.depth();
        let mut extra_depth = 3;
        let mut endgame_depth = 1;

        if let Some(t) = clock_seconds {
            if t <= 5 {
                depth = 1;
                extra_depth = 2;
                endgame_depth = 0;
            } else if t < 15 {
                depth = 2;
                extra_depth = 2;
            } else if t < 100 {
                depth = 2;
            } else if t < 5 * 60 {
                depth = 3;
            } else {
                depth = 3;
                extra_depth = 4;
            }
        }

        SearchParams {
            depth,
            extra_depth,
            endgame_depth,
            randomness: ply < RANDOM_OPENING_PLIES,
            avoid: None,
        }
    }

    /// Ask the engine for a move for the side on turn.
    pub fn choose_move<E: Engine>(
        engine: &mut E,
        skill: Skill,
        clock_seconds: Option<u32>,
    ) -> Option<ChosenMove> {
        let mut params = Self::search_params(skill, clock_seconds, engine.ply());
        params.avoid = engine.repetition_avoidance_hint();
        debug!(?params, "resolved search params");
        engine.search_move(params)
    }
}
