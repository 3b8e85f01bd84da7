//! Terminal blockfall runner (default binary).
//!
//! The host owns all timing: a fixed frame cadence for input repeats and the
//! gravity interval that drives `GameState::tick`. The core never re-arms a
//! timer; when the game is over the loop stops ticking, shows the final
//! score, and restarts after a short hold.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit, InputHandler, SwipeTracker};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Command, DROP_INTERVAL_MS, FRAME_MS, GAME_OVER_PAUSE_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1);

    let mut game = GameState::new(seed);
    game.start();

    let view = GameView::default();
    let mut input_handler = InputHandler::new();
    let mut swipe = SwipeTracker::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();
    let mut gravity_ms: u32 = 0;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // The game-over "alert": hold the final-score overlay, then restart
        // without waiting for confirmation.
        if game.game_over() {
            std::thread::sleep(Duration::from_millis(GAME_OVER_PAUSE_MS as u64));
            game.apply(Command::Restart);
            input_handler.reset();
            swipe.cancel();
            gravity_ms = 0;
            last_frame = Instant::now();
            continue;
        }

        // Input with timeout until next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(command) = input_handler.handle_key_press(key.code) {
                            game.apply(command);
                        } else if let Some(command) = handle_key_event(key) {
                            match command {
                                Command::MoveLeft | Command::MoveRight | Command::SoftDrop => {
                                    // Held-key repeats come from the DAS handler.
                                }
                                _ => {
                                    game.apply(command);
                                }
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        swipe.begin(mouse.column as i32, mouse.row as i32);
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        swipe.update(mouse.column as i32, mouse.row as i32);
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some(command) = swipe.finish() {
                            game.apply(command);
                        }
                    }
                    _ => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Frame tick: drain input repeats, then advance gravity.
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();

            for command in input_handler.update(FRAME_MS) {
                game.apply(command);
            }

            gravity_ms += FRAME_MS;
            if gravity_ms >= DROP_INTERVAL_MS {
                gravity_ms = 0;
                game.tick();
            }
        }
    }
}
