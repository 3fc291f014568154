//! Restores the terminal when the demo exits, errors out, or panics.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// RAII guard over raw mode and the alternate screen.
///
/// Mouse capture is only enabled on request; clicks on steps need it.
pub struct TerminalGuard {
    active: AtomicBool,
    mouse: bool,
}

impl TerminalGuard {
    pub fn new(mouse: bool) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        if mouse {
            execute!(io::stdout(), EnableMouseCapture).context("Failed to capture mouse")?;
        }
        tracing::debug!(mouse, "terminal switched to TUI mode");
        Ok(Self {
            active: AtomicBool::new(true),
            mouse,
        })
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse
    }

    /// Best-effort restore; safe to call from the panic hook
    pub fn cleanup() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            Self::cleanup();
            tracing::debug!("terminal restored");
        }
    }
}

/// Restore the terminal before the default hook prints the panic
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        TerminalGuard::cleanup();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inactive_guard(mouse: bool) -> TerminalGuard {
        TerminalGuard {
            active: AtomicBool::new(false),
            mouse,
        }
    }

    #[test]
    fn test_inactive_guard_drops_without_cleanup() {
        let guard = inactive_guard(false);
        assert!(!guard.active.load(Ordering::SeqCst));
        drop(guard);
    }

    #[test]
    fn test_mouse_flag_is_reported() {
        assert!(inactive_guard(true).mouse_enabled());
        assert!(!inactive_guard(false).mouse_enabled());
    }

    #[test]
    fn test_cleanup_outside_tui_does_not_panic() {
        TerminalGuard::cleanup();
    }
}
