use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::phase::Phase;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const LIT: &str = "●";
const DARK: &str = "○";

/// Renders signal state. Implementations only consume state.
///
/// The presenter loop calls `show_phase` once per observed phase change; the
/// countdown reporter calls `show_remaining` once per tick.
pub trait Presenter: Send {
    fn show_phase(&mut self, phase: Phase);

    fn show_remaining(&mut self, phase: Phase, seconds: u64);

    /// Called once when the owning loop exits.
    fn finish(&mut self) {}
}

/// Draws a three-lamp panel and an in-place countdown line on a terminal.
///
/// Clones share the same writer so the panel and the countdown never
/// interleave mid-line.
pub struct ConsolePresenter<W> {
    out: Arc<Mutex<W>>,
    clear_screen: bool,
}

impl<W> Clone for ConsolePresenter<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
            clear_screen: self.clear_screen,
        }
    }
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(io::stdout(), clear_screen)
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            clear_screen,
        }
    }

    fn write_with(&self, what: &str, render: impl FnOnce(&mut W) -> io::Result<()>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = render(&mut *out).and_then(|()| out.flush()) {
            warn!(what, "console render failed: {err}");
        }
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn show_phase(&mut self, phase: Phase) {
        let clear_screen = self.clear_screen;
        self.write_with("phase", |out| {
            if clear_screen {
                out.write_all(CLEAR_SCREEN.as_bytes())?;
            } else {
                writeln!(out)?;
            }
            writeln!(out, "\n")?;
            for lamp in Phase::CYCLE {
                let marker = if lamp == phase { LIT } else { DARK };
                writeln!(out, "  {marker} {lamp}")?;
            }
            writeln!(out, "\n{}", phase.message())
        });
    }

    fn show_remaining(&mut self, _phase: Phase, seconds: u64) {
        self.write_with("countdown", |out| {
            write!(out, "\rTime remaining: {seconds} seconds ")
        });
    }

    fn finish(&mut self) {
        self.write_with("finish", |out| writeln!(out));
    }
}
