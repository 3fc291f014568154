pub mod keybindings;
pub mod status_step;
pub mod stepper;
pub mod terminal_guard;

pub use status_step::StatusStep;
pub use stepper::Stepper;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
