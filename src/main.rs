//! Terminal Tetris runner (default binary).
//!
//! The game runs as a session task on a tokio runtime; this thread only polls
//! keys, forwards actions and draws the latest snapshot with the
//! framebuffer renderer.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use term_tetris::input::handle_key_event;
use term_tetris::session::{SessionRuntime, SessionSummary};
use term_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use term_tetris::types::{GameAction, FRAME_MS};

fn main() -> Result<()> {
    let mut runtime = SessionRuntime::start_from_env()?;

    let mut term = TerminalRenderer::new();
    if let Err(e) = term.enter() {
        let _ = term.exit();
        let _ = runtime.shutdown();
        return Err(e);
    }

    let result = run(&mut term, &mut runtime);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = runtime.shutdown();
    result?;
    report(&summary?);
    Ok(())
}

fn run(term: &mut TerminalRenderer, runtime: &mut SessionRuntime) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = TerminalRenderer::viewport()?;
    let mut snap = runtime.snapshot();
    let mut dirty = true;
    let frame = Duration::from_millis(FRAME_MS as u64);

    loop {
        if let Some(next) = runtime.changed_snapshot() {
            snap = next;
            dirty = true;
        }
        if dirty {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if runtime.is_finished() {
            return Ok(());
        }

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = handle_key_event(key) {
                    // A full queue drops the key, like a missed keypress.
                    runtime.send(action);
                    if action == GameAction::Quit {
                        return Ok(());
                    }
                }
            }
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}

fn report(summary: &SessionSummary) {
    eprintln!(
        "[term-tetris] score {} (level {}, {} lines), high score {}{}",
        summary.score,
        summary.level,
        summary.lines,
        summary.high_score,
        if summary.new_record { " - new record!" } else { "" }
    );
}
