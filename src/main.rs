//! Terminal demo driving a match over stdin.
//!
//! Directions map to `h`/`j`/`k`/`l` (or `w`/`a`/`s`/`d`), an empty line
//! confirms, `q` cancels out of the match. The 64x64 board is printed as
//! ASCII after every input. Pass `human`, `ai1` or `ai3` as the first
//! argument to pick the opponent (default `ai2`).

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use padchess::engine::ShakmatyEngine;
use padchess::models::{InputEvent, MatchModel, Outcome, Player, Session, Skill};
use padchess::render::Framebuffer;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let black = match std::env::args().nth(1).as_deref() {
        Some("human") => Player::Human,
        Some("ai1") => Player::Ai(Skill::Level1),
        Some("ai3") => Player::Ai(Skill::Level3),
        _ => Player::Ai(Skill::Level2),
    };

    let session = Session::new(Player::Human, black);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let engine = session.start_engine(seed)?;
    let mut game = MatchModel::new(session, engine);

    if game.on_enter() == Outcome::Exit {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut fb = Framebuffer::new();
    loop {
        redraw(&game, &mut fb)?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(event) = key_event(&line) else {
            continue;
        };
        if game.handle_input(event) == Outcome::Exit {
            redraw(&game, &mut fb)?;
            break;
        }
    }
    Ok(())
}

/// Translate one input line into a model event. The picture puts rank 1 at
/// the bottom, so the key pressed downward maps to the rank-decreasing
/// event and vice versa.
fn key_event(line: &str) -> Option<InputEvent> {
    match line.trim().chars().next() {
        None => Some(InputEvent::Confirm),
        Some('h' | 'a') => Some(InputEvent::Left),
        Some('l' | 'd') => Some(InputEvent::Right),
        Some('k' | 'w') => Some(InputEvent::Down),
        Some('j' | 's') => Some(InputEvent::Up),
        Some('q') => Some(InputEvent::Cancel),
        Some(_) => None,
    }
}

fn redraw(game: &MatchModel<ShakmatyEngine>, fb: &mut Framebuffer) -> Result<()> {
    fb.clear();
    game.draw(fb);

    let mut out = io::stdout().lock();
    writeln!(out, "{}", fb.to_ascii())?;
    match game.cursor().selected() {
        Some(square) => writeln!(out, "cursor: {square}")?,
        None => writeln!(out, "cursor: -")?,
    }
    for entry in game.history().entries() {
        if !entry.message.is_empty() || !entry.notation.is_empty() {
            writeln!(out, "{:<14} {}", entry.message, entry.notation)?;
        }
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
