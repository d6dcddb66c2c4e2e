//! Move search over shakmaty positions.
//!
//! Plain negamax with alpha-beta pruning and a capture-only quiescence tail.
//! Effort is bounded entirely by the depths in [`SearchParams`]; there is no
//! clock and no cancellation, matching the synchronous invocation contract.

use rand::Rng;
use rand::rngs::StdRng;
use shakmaty::{Chess, KnownOutcome, Move, Position, Role};
use tracing::debug;

use super::SearchParams;
use crate::domain::Square;

const INFINITY: i32 = 1_000_000;
const MATE_SCORE: i32 = 100_000;
const PAWN_VALUE: i32 = 100;

/// Penalty applied to the repetition-avoidance move at the root.
const AVOID_PENALTY: i32 = PAWN_VALUE / 2;

/// Maximum root score jitter while randomness is enabled.
const JITTER: i32 = PAWN_VALUE / 2;

/// Pick a move for the side to move, or `None` if there is none.
pub(super) fn pick_move(pos: &Chess, params: SearchParams, rng: &mut StdRng) -> Option<Move> {
    let mut depth = i32::from(params.depth.max(1));
    if is_endgame(pos) {
        depth += i32::from(params.endgame_depth);
    }
    let extra = i32::from(params.extra_depth);
    debug!(depth, extra, randomness = params.randomness, "search start");

    let mut best: Option<(Move, i32)> = None;
    for m in &pos.legal_moves() {
        let Ok(next) = pos.clone().play(m.clone()) else {
            continue;
        };
        let mut score = -negamax(&next, depth - 1, extra, -INFINITY, INFINITY);
        if let Some((avoid_from, avoid_to)) = params.avoid
            && endpoints_match(m, avoid_from, avoid_to)
        {
            score -= AVOID_PENALTY;
        }
        if params.randomness {
            score += rng.random_range(0..=JITTER);
        }
        if best.as_ref().is_none_or(|(_, s)| score > *s) {
            best = Some((m.clone(), score));
        }
    }
    best.map(|(m, _)| m)
}

fn negamax(pos: &Chess, depth: i32, extra: i32, mut alpha: i32, beta: i32) -> i32 {
    if let Some(score) = terminal_score(pos, depth) {
        return score;
    }
    if depth <= 0 {
        return quiescence(pos, extra, alpha, beta);
    }

    for m in &pos.legal_moves() {
        let Ok(next) = pos.clone().play(m.clone()) else {
            continue;
        };
        let score = -negamax(&next, depth - 1, extra, -beta, -alpha);
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// Capture-only extension of the horizon, with stand-pat cutoff.
fn quiescence(pos: &Chess, depth: i32, mut alpha: i32, beta: i32) -> i32 {
    if let Some(score) = terminal_score(pos, depth) {
        return score;
    }

    let stand_pat = evaluate(pos);
    if depth <= 0 || stand_pat >= beta {
        return if stand_pat >= beta { beta } else { stand_pat };
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    for m in &pos.capture_moves() {
        let Ok(next) = pos.clone().play(m.clone()) else {
            continue;
        };
        let score = -quiescence(&next, depth - 1, -beta, -alpha);
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// Mate and draw scores from the side to move's perspective. Remaining depth
/// biases the score so nearer mates win.
fn terminal_score(pos: &Chess, depth: i32) -> Option<i32> {
    pos.outcome().known().map(|outcome| match outcome {
        // the side to move is the one that got mated
        KnownOutcome::Decisive { .. } => -(MATE_SCORE + depth),
        KnownOutcome::Draw => 0,
    })
}

/// Static evaluation: material plus a small centralization bonus, from the
/// side to move's perspective.
fn evaluate(pos: &Chess) -> i32 {
    let board = pos.board();
    let mut score = 0;
    for sq in board.occupied() {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        let value = role_value(piece.role) + centralization(sq);
        if piece.color == pos.turn() {
            score += value;
        } else {
            score -= value;
        }
    }
    score
}

fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

/// 0..=6 bonus, largest for the four center squares.
fn centralization(sq: shakmaty::Square) -> i32 {
    let file = u32::from(sq.file()) as i32;
    let rank = u32::from(sq.rank()) as i32;
    let df = (2 * file - 7).abs() / 2;
    let dr = (2 * rank - 7).abs() / 2;
    6 - 2 * df.max(dr)
}

/// Endgame heuristic: few non-pawn pieces left on the board.
fn is_endgame(pos: &Chess) -> bool {
    let board = pos.board();
    let heavy = board
        .occupied()
        .into_iter()
        .filter_map(|sq| board.piece_at(sq))
        .filter(|p| !matches!(p.role, Role::Pawn | Role::King))
        .count();
    heavy <= 4
}

fn endpoints_match(m: &Move, from: Square, to: Square) -> bool {
    match *m {
        Move::Normal { from: f, to: t, .. } | Move::EnPassant { from: f, to: t, .. } => {
            u32::from(f) == u32::from(from.index()) && u32::from(t) == u32::from(to.index())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use shakmaty::CastlingMode;
    use shakmaty::fen::Fen;

    fn position(fen: &str) -> Chess {
        let setup: Fen = fen.parse().unwrap();
        setup.into_position(CastlingMode::Standard).unwrap()
    }

    fn params(depth: u8) -> SearchParams {
        SearchParams {
            depth,
            extra_depth: 2,
            endgame_depth: 0,
            randomness: false,
            avoid: None,
        }
    }

    #[test]
    fn finds_some_move_from_the_start() {
        let pos = Chess::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_move(&pos, params(1), &mut rng).is_some());
    }

    #[test]
    fn no_move_when_mated() {
        // fool's mate final position, white to move and mated
        let pos = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_move(&pos, params(2), &mut rng).is_none());
    }

    #[test]
    fn takes_the_hanging_queen() {
        // white rook on a1 can capture an undefended queen on a8
        let pos = position("q3k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let mut rng = StdRng::seed_from_u64(7);
        let m = pick_move(&pos, params(2), &mut rng).unwrap();
        match m {
            Move::Normal { to, .. } => assert_eq!(u32::from(to), 56), // a8
            other => panic!("expected a normal capture, got {other:?}"),
        }
    }

    #[test]
    fn deterministic_without_randomness() {
        let pos = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(999);
        let first = pick_move(&pos, params(2), &mut a);
        let second = pick_move(&pos, params(2), &mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn avoid_pair_changes_nothing_else() {
        // the penalty only applies to the named pair, so an unrelated avoid
        // square leaves the deterministic choice untouched
        let pos = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let mut rng = StdRng::seed_from_u64(1);
        let baseline = pick_move(&pos, params(2), &mut rng);

        let mut with_avoid = params(2);
        with_avoid.avoid = Some((
            Square::new(0).unwrap(), // a1
            Square::new(7).unwrap(), // h1, not a legal rook move here
        ));
        let chosen = pick_move(&pos, with_avoid, &mut rng);
        assert_eq!(baseline, chosen);
    }

    #[test]
    fn promotion_is_reported() {
        let pos = position("8/P7/8/8/8/8/k7/4K3 w - - 0 1");
        let mut rng = StdRng::seed_from_u64(7);
        let m = pick_move(&pos, params(2), &mut rng).unwrap();
        match m {
            Move::Normal { promotion, .. } => assert_eq!(promotion, Some(Role::Queen)),
            other => panic!("expected promotion, got {other:?}"),
        }
    }

    #[test]
    fn centralization_peaks_in_the_middle() {
        assert_eq!(centralization(shakmaty::Square::new(28)), 6); // e4
        assert_eq!(centralization(shakmaty::Square::new(0)), 0); // a1
        assert_eq!(centralization(shakmaty::Square::new(63)), 0); // h8
    }
}
