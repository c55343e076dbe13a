pub mod calendar_screen;
pub mod customer_flows;
pub mod forms;
pub mod table;
pub mod training_flows;

/// Blocking yes/no prompt shown before destructive actions. Injected so
/// flows can be driven in tests without a terminal.
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool;
}

pub struct TerminalPrompt;

impl ConfirmationPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        inquire::Confirm::new(message)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}
