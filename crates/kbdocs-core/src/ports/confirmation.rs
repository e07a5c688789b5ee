//! Confirmation port (driving side prompt)
//!
//! Destructive use cases ask for explicit approval through this trait.
//! The CLI implements it with a y/N prompt on stdin.

/// Asks the operator to approve an action
pub trait IConfirmation: Send + Sync {
    /// Returns true only on explicit approval
    fn confirm(&self, prompt: &str) -> bool;
}

/// Approves every prompt, for non-interactive runs
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl IConfirmation for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
