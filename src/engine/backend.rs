//! shakmaty-backed implementation of the engine contract.
//!
//! Owns the position, the undo stack and the repetition history. The
//! orchestration layer only ever talks to it through [`Engine`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, KnownOutcome, Move, Position, Role};
use thiserror::Error;
use tracing::warn;

use super::{ChosenMove, Engine, SearchParams, search};
use crate::domain::{GameStatus, Piece, PieceKind, Promotion, Side, Square, SquareSet};
use crate::render::{Framebuffer, SQUARE_PIXELS, glyphs};

/// Failures while setting up the initial position.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid position string: {0}")]
    InvalidPosition(String),
    #[error("invalid replay move '{0}'")]
    InvalidReplayMove(String),
}

/// The bundled chess-rules and move-search collaborator.
pub struct ShakmatyEngine {
    position: Chess,
    /// Positions before each executed move, for single-ply rollback.
    undo_stack: Vec<Chess>,
    /// Zobrist keys of every position seen this session, current one last.
    seen: Vec<Zobrist64>,
    /// Endpoints of each executed move.
    record: Vec<(Square, Square)>,
    /// Sticky once a position occurs for the third time.
    repetition: bool,
    rng: StdRng,
}

impl ShakmatyEngine {
    /// Start from the standard initial position.
    pub fn standard(seed: u64) -> Self {
        Self::from_position(Chess::default(), seed)
    }

    /// Start from an explicit FEN position string.
    pub fn from_fen(fen: &str, seed: u64) -> Result<Self, EngineError> {
        let setup: Fen = fen
            .parse()
            .map_err(|_| EngineError::InvalidPosition(fen.to_string()))?;
        let position = setup
            .into_position(CastlingMode::Standard)
            .map_err(|_| EngineError::InvalidPosition(fen.to_string()))?;
        Ok(Self::from_position(position, seed))
    }

    /// Replay `moves` (SAN) from the standard start, stopping after `ply`
    /// half-moves.
    pub fn from_replay(moves: &[String], ply: usize, seed: u64) -> Result<Self, EngineError> {
        let mut position = Chess::default();
        for text in moves.iter().take(ply) {
            let san: San = text
                .parse()
                .map_err(|_| EngineError::InvalidReplayMove(text.clone()))?;
            let m = san
                .to_move(&position)
                .map_err(|_| EngineError::InvalidReplayMove(text.clone()))?;
            position = position
                .play(m)
                .map_err(|_| EngineError::InvalidReplayMove(text.clone()))?;
        }
        Ok(Self::from_position(position, seed))
    }

    fn from_position(position: Chess, seed: u64) -> Self {
        let seen = vec![zobrist(&position)];
        Self {
            position,
            undo_stack: Vec::new(),
            seen,
            record: Vec::new(),
            repetition: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Find the legal move matching the given endpoints. Castling is
    /// addressed by the king's two-square hop, and an unspecified promotion
    /// resolves to the requested piece.
    fn find_move(&self, from: Square, to: Square, promotion: Promotion) -> Option<Move> {
        for m in &self.position.legal_moves() {
            let Some((m_from, m_to)) = move_endpoints(m) else {
                continue;
            };
            if m_from != from || m_to != to {
                continue;
            }
            if let Move::Normal {
                promotion: Some(role),
                ..
            } = m
                && *role != promotion_role(promotion)
            {
                continue;
            }
            return Some(m.clone());
        }
        None
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_shakmaty(square))
            .map(|p| Piece {
                kind: kind_of(p.role),
                side: side_of(p.color),
            })
    }
}

impl Engine for ShakmatyEngine {
    fn side_to_move(&self) -> Side {
        side_of(self.position.turn())
    }

    fn piece_owner(&self, square: Square) -> Option<Side> {
        self.piece_at(square).map(|p| p.side)
    }

    fn legal_destinations(&self, square: Square) -> SquareSet {
        self.position
            .legal_moves()
            .iter()
            .filter_map(move_endpoints)
            .filter(|(from, _)| *from == square)
            .map(|(_, to)| to)
            .collect()
    }

    fn apply_move(&mut self, from: Square, to: Square, promotion: Promotion) {
        let Some(m) = self.find_move(from, to, promotion) else {
            warn!(%from, %to, "apply_move: no matching legal move, ignoring");
            return;
        };
        let previous = self.position.clone();
        let next = match previous.clone().play(m) {
            Ok(next) => next,
            Err(_) => return, // unreachable: the move came from legal_moves
        };
        self.undo_stack.push(previous);
        self.position = next;

        let key = zobrist(&self.position);
        self.seen.push(key);
        if self.seen.iter().filter(|k| **k == key).count() >= 3 {
            self.repetition = true;
        }
        self.record.push((from, to));
    }

    fn undo_move(&mut self) {
        let Some(previous) = self.undo_stack.pop() else {
            return;
        };
        self.position = previous;
        self.seen.pop();
        self.record.pop();
        self.repetition = has_triple(&self.seen);
    }

    fn repetition_avoidance_hint(&self) -> Option<(Square, Square)> {
        // reversing the side to move's own previous move is the immediate
        // way back into a past position
        if self.record.len() < 2 {
            return None;
        }
        let (prev_from, prev_to) = self.record[self.record.len() - 2];
        self.find_move(prev_to, prev_from, Promotion::Queen)
            .map(|_| (prev_to, prev_from))
    }

    fn search_move(&mut self, params: SearchParams) -> Option<ChosenMove> {
        let m = search::pick_move(&self.position, params, &mut self.rng)?;
        let (from, to) = move_endpoints(&m)?;
        let promotion = match m {
            Move::Normal {
                promotion: Some(role),
                ..
            } => promotion_of(role),
            _ => Promotion::Queen,
        };
        Some(ChosenMove {
            from,
            to,
            promotion,
        })
    }

    fn move_notation(&self, from: Square, to: Square, promotion: Promotion) -> String {
        match self.find_move(from, to, promotion) {
            Some(m) => San::from_move(&self.position, m).to_string(),
            None => format!("{from}{to}"),
        }
    }

    fn status(&self) -> GameStatus {
        if let Some(outcome) = self.position.outcome().known() {
            return match outcome {
                KnownOutcome::Decisive {
                    winner: Color::White,
                } => GameStatus::WhiteWin,
                KnownOutcome::Decisive {
                    winner: Color::Black,
                } => GameStatus::BlackWin,
                KnownOutcome::Draw => {
                    if self.position.is_stalemate() {
                        GameStatus::DrawStalemate
                    } else {
                        GameStatus::DrawDead
                    }
                }
            };
        }
        if self.repetition {
            return GameStatus::DrawRepetition;
        }
        if self.position.halfmoves() >= 100 {
            return GameStatus::Draw50;
        }
        GameStatus::Playing
    }

    fn ply(&self) -> u32 {
        self.record.len() as u32
    }

    fn render_board(
        &self,
        fb: &mut Framebuffer,
        selected: Option<Square>,
        highlight: SquareSet,
        flipped: bool,
    ) {
        fb.clear();
        for index in 0..Square::COUNT {
            let square = Square::from_index(index);
            let (x0, y0) = square_origin(square, flipped);

            match self.piece_at(square) {
                Some(piece) => draw_glyph(fb, x0, y0, glyphs::glyph(piece)),
                None => {
                    // sparse dither marks the dark squares
                    if (square.file() + square.rank()) % 2 == 0 {
                        for dy in (1..SQUARE_PIXELS).step_by(3) {
                            for dx in (1..SQUARE_PIXELS).step_by(3) {
                                fb.set(x0 + dx, y0 + dy);
                            }
                        }
                    }
                }
            }

            if highlight.contains(square) {
                draw_corner_ticks(fb, x0, y0);
            }
        }

        if let Some(square) = selected {
            let (x0, y0) = square_origin(square, flipped);
            draw_ring(fb, x0, y0);
        }
    }
}

/// Screen-cell origin of a square; white sits at the bottom unless flipped.
fn square_origin(square: Square, flipped: bool) -> (usize, usize) {
    let (col, row) = if flipped {
        (7 - square.file(), square.rank())
    } else {
        (square.file(), 7 - square.rank())
    };
    (col as usize * SQUARE_PIXELS, row as usize * SQUARE_PIXELS)
}

fn draw_glyph(fb: &mut Framebuffer, x0: usize, y0: usize, glyph: &glyphs::Glyph) {
    for (dy, row) in glyph.iter().enumerate() {
        for dx in 0..8 {
            if row & (0x80 >> dx) != 0 {
                fb.set(x0 + dx, y0 + dy);
            }
        }
    }
}

fn draw_ring(fb: &mut Framebuffer, x0: usize, y0: usize) {
    for d in 0..SQUARE_PIXELS {
        fb.set(x0 + d, y0);
        fb.set(x0 + d, y0 + SQUARE_PIXELS - 1);
        fb.set(x0, y0 + d);
        fb.set(x0 + SQUARE_PIXELS - 1, y0 + d);
    }
}

fn draw_corner_ticks(fb: &mut Framebuffer, x0: usize, y0: usize) {
    let far = SQUARE_PIXELS - 1;
    for (cx, cy) in [(0, 0), (far, 0), (0, far), (far, far)] {
        fb.set(x0 + cx, y0 + cy);
    }
}

/// Endpoints of a legal move as the cursor addresses them: castling is the
/// king's two-square hop, drops are skipped.
fn move_endpoints(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } | Move::EnPassant { from, to, .. } => {
            Some((from_shakmaty(*from), from_shakmaty(*to)))
        }
        Move::Castle { king, rook } => {
            let king_dest = if rook.file() == File::H {
                shakmaty::Square::from_coords(File::G, rook.rank())
            } else {
                shakmaty::Square::from_coords(File::C, rook.rank())
            };
            Some((from_shakmaty(*king), from_shakmaty(king_dest)))
        }
        Move::Put { .. } => None,
    }
}

fn has_triple(seen: &[Zobrist64]) -> bool {
    seen.iter()
        .any(|key| seen.iter().filter(|k| *k == key).count() >= 3)
}

fn zobrist(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square.index()))
}

fn from_shakmaty(square: shakmaty::Square) -> Square {
    Square::from_index(u32::from(square) as u8)
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn kind_of(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn promotion_role(promotion: Promotion) -> Role {
    match promotion {
        Promotion::Queen => Role::Queen,
        Promotion::Rook => Role::Rook,
        Promotion::Bishop => Role::Bishop,
        Promotion::Knight => Role::Knight,
    }
}

fn promotion_of(role: Role) -> Promotion {
    match role {
        Role::Rook => Promotion::Rook,
        Role::Bishop => Promotion::Bishop,
        Role::Knight => Promotion::Knight,
        _ => Promotion::Queen,
    }
}
