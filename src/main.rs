//! Terminal runner (default binary).
//!
//! Renders with the framebuffer renderer, reads keys and mouse clicks with
//! crossterm, and drives the session clock with real elapsed time.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use target_tetris::core::{GameConfig, GameSnapshot};
use target_tetris::engine::Session;
use target_tetris::input::{handle_key_event, should_quit, PointerMap};
use target_tetris::settings;
use target_tetris::term::{GameView, TerminalRenderer, Viewport};
use target_tetris::types::{GameEvent, FRAME_MS};

fn main() -> Result<()> {
    init_logging()?;
    let config = settings::load().context("loading settings")?;
    info!("starting with {config:?}");

    let mut term = TerminalRenderer::new(GameView::default());
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `TETRIS_LOG_FILE` only; the game owns the terminal.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("TETRIS_LOG_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
    else {
        return Ok(());
    };
    let file = std::fs::File::create(&path).with_context(|| format!("opening log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("TETRIS_LOG", "warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut session = Session::from_config(config);

    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.state().snapshot_into(&mut snap);
        let layout = term.draw(&snap, viewport)?;
        let pointer = PointerMap {
            origin_col: layout.origin_col,
            origin_row: layout.origin_row,
            cell_w: term.view().cell_w(),
            cell_h: term.view().cell_h(),
            board_width: snap.width,
            board_height: snap.height,
        };

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.post(GameEvent::Action(action));
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(hit) = pointer.handle_mouse_event(mouse) {
                        session.post(hit);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Timers.
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        if elapsed >= frame {
            last_frame = now;
            session.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);
        } else {
            session.pump();
        }
    }
}
