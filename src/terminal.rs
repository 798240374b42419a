// Terminal setup and teardown.
// Raw mode and the alternate screen are undone when the guard drops, on every exit path.

use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::error::Result;

/// Runs its restore action when dropped.
pub struct Restore<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Restore<F> {
    pub fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for Restore<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Best-effort teardown; also called from the panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Enter raw mode and the alternate screen.
///
/// The guard is armed as soon as raw mode is on, so a failure in the later
/// setup steps still leaves the terminal usable.
pub fn enter() -> Result<(Terminal<CrosstermBackend<Stdout>>, Restore<fn()>)> {
    enable_raw_mode()?;
    let guard = Restore::new(restore_terminal as fn());

    execute!(io::stdout(), EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    Ok((terminal, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use std::cell::Cell;

    fn staged_setup(restored: &Cell<u32>, fail: bool) -> Result<Restore<impl FnMut() + '_>> {
        let guard = Restore::new(|| restored.set(restored.get() + 1));
        if fail {
            return Err(ConsoleError::Other("alternate screen unavailable".to_string()));
        }
        Ok(guard)
    }

    #[test]
    fn test_restores_when_later_setup_fails() {
        let restored = Cell::new(0);
        assert!(staged_setup(&restored, true).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restores_once_on_normal_exit() {
        let restored = Cell::new(0);
        let guard = staged_setup(&restored, false).unwrap();
        assert_eq!(restored.get(), 0);
        drop(guard);
        assert_eq!(restored.get(), 1);
    }
}
