//! Truncate-before-load confirmation
//!
//! Truncating target tables destroys data, so turning the option on asks the
//! host for confirmation. The prompt is skipped while the wizard window is
//! still being built, unless the option was already saved from an earlier
//! run.

use crate::TransferContext;

pub const TRUNCATE_CONFIRM_TITLE: &str = "Truncate target tables";

/// State of the window hosting the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostWindowState {
    /// No window (headless use)
    Absent,
    /// Window exists but is not shown yet
    Hidden,
    Visible,
}

/// Modal confirmation provided by the wizard shell
pub trait ConfirmationHost {
    fn window_state(&self) -> HostWindowState;

    /// Show a yes/no question and block until the user answers
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Question asked before truncating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateConfirmation {
    pub title: String,
    pub message: String,
}

impl TruncateConfirmation {
    pub fn for_context(context: &TransferContext) -> Self {
        Self {
            title: TRUNCATE_CONFIRM_TITLE.to_string(),
            message: format!(
                "Are you sure you want to truncate the data of the target table(s) {} before loading?",
                context.target_table_names()
            ),
        }
    }
}

/// Decides whether turning truncate on may proceed
pub struct TruncateGate;

impl TruncateGate {
    /// Returns true when truncation is accepted.
    ///
    /// `already_persisted` is the value loaded from settings before this
    /// page was shown.
    pub fn confirm(
        host: Option<&dyn ConfirmationHost>,
        context: &TransferContext,
        already_persisted: bool,
    ) -> bool {
        let Some(host) = host else {
            return true;
        };
        match host.window_state() {
            HostWindowState::Absent => true,
            HostWindowState::Hidden if !already_persisted => true,
            HostWindowState::Hidden | HostWindowState::Visible => {
                let confirmation = TruncateConfirmation::for_context(context);
                let accepted = host.confirm(&confirmation.title, &confirmation.message);
                tracing::debug!(
                    tables = %context.target_table_names(),
                    accepted,
                    "truncate confirmation answered"
                );
                accepted
            }
        }
    }
}
