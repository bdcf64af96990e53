//! Transfer target entities and the referential-integrity capability

use crate::{ProgressMonitor, Result};
use async_trait::async_trait;

/// A database object that receives rows during a transfer (usually a table)
pub trait TargetEntity: Send + Sync {
    /// Name shown to the user (e.g. `public.orders`)
    fn object_name(&self) -> &str;

    /// Get the referential-integrity interface if the target supports it
    fn as_referential_integrity_controller(&self) -> Option<&dyn ReferentialIntegrityController> {
        None
    }
}

/// Toggles foreign-key enforcement on a target for the duration of a load
#[async_trait]
pub trait ReferentialIntegrityController: Send + Sync {
    /// Whether this target can switch referential integrity on and off
    async fn supports_changing_referential_integrity(
        &self,
        monitor: &ProgressMonitor,
    ) -> Result<bool>;

    /// The statement that enables (`enable = true`) or disables referential integrity
    async fn change_referential_integrity_statement(
        &self,
        monitor: &ProgressMonitor,
        enable: bool,
    ) -> Result<String>;
}
