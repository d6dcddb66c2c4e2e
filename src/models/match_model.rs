//! The central turn-orchestration state machine.
//!
//! One confirm press resolves at most one full turn for the local side and,
//! when the automated side is then on turn, its reply within the same press.
//! The model is the single owner of all per-match state: the hosting view
//! feeds it one input event at a time, redraws after each, and leaves the
//! match when it reports [`Outcome::Exit`]. A turn always resolves fully
//! before the next input is looked at; there is no reentrancy.

use tracing::info;

use super::ai::AiInvoker;
use super::monitor::GameStateMonitor;
use super::session::{Player, Session};
use crate::domain::{HistoryLog, Promotion, Square, SquareCursor, SquareSet};
use crate::engine::{ChosenMove, Engine};
use crate::render::Framebuffer;

/// Phase of the two-step from/to selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnPhase {
    Idle,
    FromSelected,
    /// Transient: entered and resolved within a single confirm press.
    ToSelected,
}

/// One input event from the hosting platform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

/// What the caller should do after an input was processed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Redraw and await the next input.
    Continue,
    /// Leave the match: cancel input, an exit request, or the game is over.
    Exit,
}

/// Turn controller and move executor for one match.
pub struct MatchModel<E: Engine> {
    session: Session,
    engine: E,
    cursor: SquareCursor,
    history: HistoryLog,
    phase: TurnPhase,
    pending_from: Option<Square>,
    pending_to: Option<Square>,
    /// Destinations of the pending from-square; non-empty only while the
    /// phase is `FromSelected`.
    legal_dests: SquareSet,
    /// The last executed move's {from, to}, kept visible until the next one.
    move_highlight: SquareSet,
    exit_requested: bool,
}

impl<E: Engine> MatchModel<E> {
    pub fn new(session: Session, engine: E) -> Self {
        Self {
            session,
            engine,
            cursor: SquareCursor::new(),
            history: HistoryLog::new(),
            phase: TurnPhase::Idle,
            pending_from: None,
            pending_to: None,
            legal_dests: SquareSet::EMPTY,
            move_highlight: SquareSet::EMPTY,
            exit_requested: false,
        }
    }

    /// Orchestration pass performed on scene entry. Lets an automated white
    /// play its first move without a keypress; reports `Exit` immediately
    /// when the position is already terminal.
    pub fn on_enter(&mut self) -> Outcome {
        self.history
            .set_head_message(GameStateMonitor::to_move_message(self.engine.side_to_move()));
        self.turn_pass()
    }

    /// Process one input event to completion.
    pub fn handle_input(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Up => {
                self.cursor.move_up();
                Outcome::Continue
            }
            InputEvent::Down => {
                self.cursor.move_down();
                Outcome::Continue
            }
            InputEvent::Left => {
                self.cursor.move_left();
                Outcome::Continue
            }
            InputEvent::Right => {
                self.cursor.move_right();
                Outcome::Continue
            }
            InputEvent::Confirm => self.confirm(),
            InputEvent::Cancel => self.cancel(),
        }
    }

    /// Mark the match for termination on the next orchestration pass.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Render the board into the caller's framebuffer. The destination set
    /// is shown while a from-square is pending; otherwise the last move.
    pub fn draw(&self, fb: &mut Framebuffer) {
        let highlight = if self.phase == TurnPhase::FromSelected {
            self.legal_dests
        } else {
            self.move_highlight
        };
        self.engine
            .render_board(fb, self.cursor.selected(), highlight, self.session.flip_board);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn cursor(&self) -> &SquareCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut SquareCursor {
        &mut self.cursor
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn legal_destinations(&self) -> SquareSet {
        self.legal_dests
    }

    pub fn last_move_highlight(&self) -> SquareSet {
        self.move_highlight
    }

    /// Cancel aborts any pending selection and leaves the match. The board
    /// is never touched; an in-progress selection is simply discarded.
    fn cancel(&mut self) -> Outcome {
        self.phase = TurnPhase::Idle;
        self.pending_from = None;
        self.pending_to = None;
        self.legal_dests.clear();
        Outcome::Exit
    }

    fn confirm(&mut self) -> Outcome {
        if self.turn_pass() == Outcome::Exit {
            return Outcome::Exit;
        }
        // if the local move handed the turn to the automated side, answer
        // within the same press
        if !self.is_local_turn() && self.turn_pass() == Outcome::Exit {
            return Outcome::Exit;
        }
        Outcome::Continue
    }

    fn is_local_turn(&self) -> bool {
        self.session.player(self.engine.side_to_move()).is_human()
    }

    /// One full orchestration pass: either advance the local selection or
    /// let the automated side move, then execute, log and re-evaluate.
    fn turn_pass(&mut self) -> Outcome {
        if GameStateMonitor::should_exit(self.engine.status(), self.exit_requested) {
            return Outcome::Exit;
        }

        let accepted = if self.is_local_turn() {
            self.advance_selection()
        } else {
            self.cursor.deselect();
            self.automated_move()
        };

        if let Some(mv) = accepted {
            self.execute(mv);
        }
        self.refresh_head_message();
        Outcome::Continue
    }

    /// One confirm step of the two-phase from/to capture. Returns the
    /// accepted move when this press completed one.
    fn advance_selection(&mut self) -> Option<ChosenMove> {
        match self.phase {
            TurnPhase::Idle => {
                if let Some(square) = self.cursor.selected() {
                    self.pending_from = Some(square);
                    self.phase = TurnPhase::FromSelected;
                    // only a piece of the side on turn gets destinations;
                    // anything else leaves the set empty and the attempt
                    // fizzles on the next press
                    if self.engine.piece_owner(square) == Some(self.engine.side_to_move()) {
                        self.legal_dests = self.engine.legal_destinations(square);
                    }
                }
                None
            }
            TurnPhase::FromSelected => {
                let square = self.cursor.selected()?;
                self.pending_to = Some(square);
                self.cursor.remember(square);
                self.phase = TurnPhase::ToSelected;
                self.resolve_selection()
            }
            // unreachable in practice: ToSelected resolves within the press
            TurnPhase::ToSelected => self.resolve_selection(),
        }
    }

    /// Accept or discard the pending move; either way the selection state
    /// returns to idle.
    fn resolve_selection(&mut self) -> Option<ChosenMove> {
        let accepted = match (self.pending_from, self.pending_to) {
            (Some(from), Some(to)) if self.legal_dests.contains(to) => Some(ChosenMove {
                from,
                to,
                promotion: Promotion::Queen,
            }),
            _ => None,
        };
        self.phase = TurnPhase::Idle;
        self.pending_from = None;
        self.pending_to = None;
        self.legal_dests.clear();
        accepted
    }

    /// Delegate the turn to the automated side. The selection machine is
    /// idle for the whole invocation.
    fn automated_move(&mut self) -> Option<ChosenMove> {
        let skill = match self.session.player(self.engine.side_to_move()) {
            Player::Ai(skill) => skill,
            Player::Human => return None,
        };
        self.phase = TurnPhase::Idle;
        AiInvoker::choose_move(&mut self.engine, skill, self.session.clock_seconds)
    }

    /// Submit a validated move to the engine and refresh the highlight to
    /// exactly {from, to}. Notation is derived before the move executes.
    fn execute(&mut self, mv: ChosenMove) {
        self.history.shift();
        let notation = self.engine.move_notation(mv.from, mv.to, mv.promotion);
        self.engine.apply_move(mv.from, mv.to, mv.promotion);
        self.move_highlight.clear();
        self.move_highlight.insert(mv.from);
        self.move_highlight.insert(mv.to);
        info!(from = %mv.from, to = %mv.to, %notation, "move executed");
        self.history.set_head_notation(notation);
    }

    /// Rewrite the head message after a pass: terminal text when the game
    /// ended, otherwise who played last.
    fn refresh_head_message(&mut self) {
        if let Some(message) = GameStateMonitor::terminal_message(self.engine.status()) {
            self.history.set_head_message(message);
        } else if self.engine.ply() > 0 {
            let mover = self.engine.side_to_move().opponent();
            self.history
                .set_head_message(GameStateMonitor::played_message(mover));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ShakmatyEngine;
    use crate::models::session::{Skill, StartSource};

    fn sq(name: &str) -> Square {
        let bytes = name.as_bytes();
        Square::new((bytes[1] - b'1') * 8 + (bytes[0] - b'a')).unwrap()
    }

    fn model(white: Player, black: Player) -> MatchModel<ShakmatyEngine> {
        let session = Session::new(white, black);
        let engine = session.start_engine(42).unwrap();
        MatchModel::new(session, engine)
    }

    fn confirm_at(game: &mut MatchModel<ShakmatyEngine>, square: &str) -> Outcome {
        game.cursor_mut().jump_to(sq(square));
        game.handle_input(InputEvent::Confirm)
    }

    fn play(game: &mut MatchModel<ShakmatyEngine>, from: &str, to: &str) -> Outcome {
        assert_eq!(confirm_at(game, from), Outcome::Continue);
        confirm_at(game, to)
    }

    #[test]
    fn enter_announces_side_to_move() {
        let mut game = model(Player::Human, Player::Human);
        assert_eq!(game.on_enter(), Outcome::Continue);
        assert_eq!(game.history().head().message, "white to move");
        assert_eq!(game.engine().ply(), 0);
    }

    #[test]
    fn human_move_through_two_phase_selection() {
        // Scenario A: own piece yields destinations, confirming one executes
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        assert_eq!(confirm_at(&mut game, "e2"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::FromSelected);
        assert!(!game.legal_destinations().is_empty());

        assert_eq!(confirm_at(&mut game, "e4"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.engine().ply(), 1);
        assert_eq!(game.history().head().message, "white played");
        assert_eq!(game.history().head().notation, "e4");
        assert!(game.legal_destinations().is_empty());
        assert!(game.last_move_highlight().contains(sq("e2")));
        assert!(game.last_move_highlight().contains(sq("e4")));
        assert_eq!(game.last_move_highlight().len(), 2);
    }

    #[test]
    fn selecting_wrong_side_fizzles() {
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        // black's pawn is not on turn: empty destination set, no move
        assert_eq!(confirm_at(&mut game, "e7"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::FromSelected);
        assert!(game.legal_destinations().is_empty());
        assert_eq!(confirm_at(&mut game, "e5"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.engine().ply(), 0);
    }

    #[test]
    fn illegal_destination_discards_the_attempt() {
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        assert_eq!(confirm_at(&mut game, "e2"), Outcome::Continue);
        assert_eq!(confirm_at(&mut game, "e6"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert_eq!(game.engine().ply(), 0);
        assert!(game.legal_destinations().is_empty());
    }

    #[test]
    fn ai_replies_within_the_same_press() {
        // Scenario B: the automated reply needs no extra input
        let mut game = model(Player::Human, Player::Ai(Skill::Level1));
        game.on_enter();

        assert_eq!(play(&mut game, "e2", "e4"), Outcome::Continue);
        assert_eq!(game.engine().ply(), 2);
        assert_eq!(game.engine().side_to_move(), crate::domain::Side::White);
        assert_eq!(game.history().head().message, "black played");
    }

    #[test]
    fn automated_white_moves_on_entry() {
        let mut game = model(Player::Ai(Skill::Level1), Player::Human);
        assert_eq!(game.on_enter(), Outcome::Continue);
        assert_eq!(game.engine().ply(), 1);
    }

    #[test]
    fn ai_not_invoked_during_local_selection() {
        let mut game = model(Player::Human, Player::Ai(Skill::Level1));
        game.on_enter();

        // a from-selection press never reaches the automated side
        assert_eq!(confirm_at(&mut game, "e2"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::FromSelected);
        assert_eq!(game.engine().ply(), 0);
    }

    #[test]
    fn checkmate_sets_message_then_exits() {
        // Scenario D: fool's mate
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        assert_eq!(play(&mut game, "d8", "h4"), Outcome::Continue);

        assert_eq!(game.history().head().message, "black wins");
        assert_eq!(game.history().head().notation, "Qh4");

        // the next confirm reports the terminal signal instead of moving
        assert_eq!(game.handle_input(InputEvent::Confirm), Outcome::Exit);
    }

    #[test]
    fn cancel_discards_pending_selection_without_moving() {
        // Scenario E
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        assert_eq!(confirm_at(&mut game, "e2"), Outcome::Continue);
        assert_eq!(game.phase(), TurnPhase::FromSelected);

        assert_eq!(game.handle_input(InputEvent::Cancel), Outcome::Exit);
        assert_eq!(game.phase(), TurnPhase::Idle);
        assert!(game.legal_destinations().is_empty());
        assert_eq!(game.engine().ply(), 0);
    }

    #[test]
    fn exit_request_terminates_next_pass() {
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();
        game.request_exit();
        assert_eq!(game.handle_input(InputEvent::Confirm), Outcome::Exit);
    }

    #[test]
    fn history_keeps_three_most_recent_moves() {
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        play(&mut game, "e2", "e4");
        play(&mut game, "e7", "e5");
        play(&mut game, "g1", "f3");
        play(&mut game, "b8", "c6");

        let pairs: Vec<_> = game
            .history()
            .entries()
            .iter()
            .map(|e| (e.message.as_str(), e.notation.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("black played", "Nc6"),
                ("white played", "Nf3"),
                ("black played", "e5"),
            ]
        );
    }

    #[test]
    fn directional_input_moves_the_cursor() {
        let mut game = model(Player::Human, Player::Human);
        game.on_enter();

        game.cursor_mut().jump_to(sq("e4"));
        assert_eq!(game.handle_input(InputEvent::Right), Outcome::Continue);
        assert_eq!(game.cursor().selected(), Some(sq("f4")));
        assert_eq!(game.handle_input(InputEvent::Down), Outcome::Continue);
        assert_eq!(game.cursor().selected(), Some(sq("f5")));
    }

    #[test]
    fn ai_choice_reproducible_past_the_opening() {
        // fixed position at ply 2, randomness off: seed must not matter
        let chosen: Vec<_> = [7u64, 1234]
            .iter()
            .map(|seed| {
                let session = Session::new(Player::Human, Player::Human);
                let mut engine = session.start_engine(*seed).unwrap();
                engine.apply_move(sq("e2"), sq("e4"), Promotion::Queen);
                engine.apply_move(sq("e7"), sq("e5"), Promotion::Queen);
                AiInvoker::choose_move(&mut engine, Skill::Level2, None).unwrap()
            })
            .collect();
        assert_eq!(chosen[0], chosen[1]);
    }

    #[test]
    fn terminal_position_exits_on_entry() {
        let mut session = Session::new(Player::Human, Player::Human);
        session.start = StartSource::Fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".into());
        let engine = session.start_engine(0).unwrap();
        let mut game = MatchModel::new(session, engine);
        assert_eq!(game.on_enter(), Outcome::Exit);
    }
}
