//! Per-match configuration, immutable once a match starts.

use serde::{Deserialize, Serialize};

use crate::domain::Side;
use crate::engine::{EngineError, ShakmatyEngine};

/// Skill of an automated player; drives search depth when no clock is set.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Skill {
    Level1,
    Level2,
    Level3,
}

impl Skill {
    /// Base search depth for this level.
    pub fn depth(self) -> u8 {
        match self {
            Skill::Level1 => 1,
            Skill::Level2 => 2,
            Skill::Level3 => 3,
        }
    }
}

/// Who controls one side of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Player {
    Human,
    Ai(Skill),
}

impl Player {
    pub fn is_human(self) -> bool {
        matches!(self, Player::Human)
    }
}

/// Where the initial position comes from.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum StartSource {
    #[default]
    Standard,
    /// Explicit position string (FEN). Not validated here; the engine
    /// rejects malformed input when the match starts.
    Fen(String),
    /// Replay a recorded game (SAN) from the standard start up to `ply`
    /// half-moves.
    Replay { moves: Vec<String>, ply: usize },
}

/// Everything a match needs to start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub white: Player,
    pub black: Player,
    /// Static time budget in seconds, consulted only to pick search effort.
    /// There is no live countdown.
    pub clock_seconds: Option<u32>,
    /// Draw the board from black's point of view.
    pub flip_board: bool,
    pub start: StartSource,
}

impl Session {
    /// A standard-start match with no clock.
    pub fn new(white: Player, black: Player) -> Self {
        Self {
            white,
            black,
            clock_seconds: None,
            flip_board: false,
            start: StartSource::Standard,
        }
    }

    pub fn player(&self, side: Side) -> Player {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// Build the bundled engine from this session's start source.
    pub fn start_engine(&self, seed: u64) -> Result<ShakmatyEngine, EngineError> {
        match &self.start {
            StartSource::Standard => Ok(ShakmatyEngine::standard(seed)),
            StartSource::Fen(fen) => ShakmatyEngine::from_fen(fen, seed),
            StartSource::Replay { moves, ply } => ShakmatyEngine::from_replay(moves, *ply, seed),
        }
    }
}
