mod display;

use std::io::{stdout, BufWriter, Stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use dodger::compute::{handle_key_press, init_state, tick, Flow};
use dodger::config::FRAME;
use dodger::input::{GameKey, KeyTracker};

use display::Viewport;

// ── Terminal session ──────────────────────────────────────────────────────────

/// Set while keyboard-enhancement flags are pushed, so the panic hook
/// knows whether to pop them.
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

/// Undo everything `TerminalSession::acquire` set up.  Safe to run twice.
fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Restore the terminal before the panic message is printed, otherwise it
/// is written to the alternate screen and lost.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal(&mut stdout(), KEYBOARD_ENHANCED.load(Ordering::SeqCst));
        default_hook(info);
    }));
}

/// Owns the terminal while the game runs.  Dropping it restores the
/// terminal, which also happens on early returns and panics.
struct TerminalSession {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    fn acquire() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut session = TerminalSession {
            out: BufWriter::new(stdout()),
            keyboard_enhanced: false,
        };

        session
            .out
            .execute(terminal::EnterAlternateScreen)
            .context("failed to enter the alternate screen")?;
        session.out.execute(cursor::Hide)?;
        session.out.execute(terminal::SetTitle("Dodger"))?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back to
        // time-based expiry in `KeyTracker`.  Writing the flags succeeds
        // either way, so ask the terminal first.
        let supported = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        session.keyboard_enhanced = supported
            && session
                .out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        KEYBOARD_ENHANCED.store(session.keyboard_enhanced, Ordering::SeqCst);
        log::debug!("keyboard enhancement: {}", session.keyboard_enhanced);

        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal(&mut self.out, self.keyboard_enhanced);
        KEYBOARD_ENHANCED.store(false, Ordering::SeqCst);
    }
}

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Blocks until one frame period has passed since the previous call.
struct FrameLimiter {
    period: Duration,
    last: Option<Instant>,
}

impl FrameLimiter {
    fn new(period: Duration) -> Self {
        FrameLimiter { period, last: None }
    }

    fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each iteration: wait for the frame slot, drain pending terminal events
/// without blocking, advance the simulation once with the held movement
/// keys, then draw.
fn game_loop(session: &mut TerminalSession) -> Result<()> {
    let mut rng = thread_rng();
    let mut state = init_state(&mut rng);
    let mut keys = KeyTracker::new(session.keyboard_enhanced);
    let mut limiter = FrameLimiter::new(FRAME);
    let mut view = Viewport::current().context("failed to query terminal size")?;
    let mut frame: u64 = 0;

    loop {
        limiter.wait();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => {
                    if !keys.record(&key, frame) {
                        continue;
                    }
                    match handle_key_press(&state, GameKey::from_event(&key), &mut rng) {
                        Flow::Continue(next) => state = next,
                        Flow::Quit => {
                            log::info!("quit with score {}", state.score);
                            return Ok(());
                        }
                    }
                }
                Event::Resize(cols, rows) => {
                    log::debug!("terminal resized to {cols}x{rows}");
                    view = Viewport::new(cols, rows);
                }
                _ => {}
            }
        }
        keys.expire(frame);

        state = tick(&state, keys.controls(frame), &mut rng);

        display::render(&mut session.out, &state, view).context("failed to draw frame")?;
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("starting dodger");

    install_panic_hook();
    let mut session = TerminalSession::acquire()?;
    let result = game_loop(&mut session);

    // Restore the terminal before `main` reports the error
    drop(session);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restore_to_string(keyboard_enhanced: bool) -> String {
        let mut buf: Vec<u8> = Vec::new();
        restore_terminal(&mut buf, keyboard_enhanced);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn restore_leaves_alternate_screen_and_shows_cursor() {
        let out = restore_to_string(false);
        assert!(out.contains("\x1B[?1049l"));
        assert!(out.contains("\x1B[?25h"));
        assert!(!out.contains("\x1B[<1u"));
    }

    #[test]
    fn restore_pops_keyboard_flags_when_pushed() {
        assert!(restore_to_string(true).contains("\x1B[<1u"));
    }

    #[test]
    fn frame_limiter_spaces_calls_by_period() {
        let period = Duration::from_millis(20);
        let mut limiter = FrameLimiter::new(period);
        limiter.wait();
        let start = Instant::now();
        limiter.wait();
        assert!(start.elapsed() >= period - Duration::from_millis(1));
    }
}
