//! Target capabilities
//!
//! What the current target can do for a data load. Bulk load, statement
//! binding and insert methods are read directly from the data source and
//! its dialect; referential-integrity support needs a round-trip to every
//! target and is probed in a background task.

use indexmap::IndexSet;
use std::sync::Arc;
use zqlz_core::{DialectRegistry, ProgressMonitor, TargetEntity, ZqlzError};

use crate::{InsertMethodCatalog, TransferContext};

/// First line of the referential-integrity tooltip
pub const RI_TOOLTIP_HEADER: &str = "Disabling referential integrity will execute:";

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Outcome of the referential-integrity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeStatus {
    /// Not started or still running
    #[default]
    Pending,
    /// Every target was asked
    Complete,
    /// The host cancelled the probe
    Cancelled,
    /// The probe task itself could not run or crashed
    Failed,
}

/// Referential-integrity toggle support across all targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferentialIntegritySupport {
    pub status: ProbeStatus,
    /// At least one target can toggle referential integrity
    pub supported: bool,
    /// Unique statements the targets would execute, in first-seen order
    pub statements: Vec<String>,
}

impl ReferentialIntegritySupport {
    /// Probe finished and no target supports toggling
    pub fn unsupported() -> Self {
        Self {
            status: ProbeStatus::Complete,
            supported: false,
            statements: Vec::new(),
        }
    }

    /// Probe did not finish; nothing is assumed
    pub fn incomplete(status: ProbeStatus) -> Self {
        Self {
            status,
            supported: false,
            statements: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ProbeStatus::Complete
    }

    /// Whether the toggle may be offered to the user
    pub fn toggle_supported(&self) -> bool {
        self.is_complete() && self.supported
    }

    /// Tooltip listing every statement, or an empty string
    pub fn tooltip(&self) -> String {
        if self.statements.is_empty() {
            return String::new();
        }
        let mut tooltip = String::from(RI_TOOLTIP_HEADER);
        for statement in &self.statements {
            tooltip.push_str(LINE_SEPARATOR);
            tooltip.push_str(statement);
        }
        tooltip
    }
}

/// Everything the load-settings rules need to know about the target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    pub referential_integrity: ReferentialIntegritySupport,
    pub bulk_load_supported: bool,
    pub statement_binding_supported: bool,
    pub insert_methods: InsertMethodCatalog,
}

impl CapabilitySet {
    /// Nothing known: every capability assumed absent
    pub fn conservative() -> Self {
        Self::default()
    }

    /// Read the capabilities that need no round-trip to the database.
    ///
    /// Referential-integrity support stays pending.
    pub fn resolve_direct(context: &TransferContext, registry: &DialectRegistry) -> Self {
        let data_source = context.data_source();
        let bulk_loader = data_source.and_then(|ds| ds.bulk_loader());
        let bulk_load_supported = bulk_loader.is_some();
        let statement_binding_supported = data_source
            .map(|ds| ds.info().supports_statement_binding)
            .unwrap_or(false);
        let insert_methods =
            InsertMethodCatalog::resolve(data_source.map(|ds| &**ds), registry);

        tracing::debug!(
            data_source = ?data_source.map(|ds| ds.name()),
            bulk_loader = ?bulk_loader.as_ref().map(|loader| loader.loader_name()),
            statement_binding_supported,
            insert_methods = insert_methods.len(),
            "resolved direct load capabilities"
        );

        Self {
            referential_integrity: ReferentialIntegritySupport::default(),
            bulk_load_supported,
            statement_binding_supported,
            insert_methods,
        }
    }

    pub fn with_referential_integrity(mut self, support: ReferentialIntegritySupport) -> Self {
        self.referential_integrity = support;
        self
    }

    pub fn ri_toggle_supported(&self) -> bool {
        self.referential_integrity.toggle_supported()
    }

    pub fn ri_toggle_tooltip(&self) -> String {
        self.referential_integrity.tooltip()
    }
}

/// Ask every target whether it can toggle referential integrity.
///
/// A target that fails is logged and treated as unsupported; the remaining
/// targets are still asked. Cancellation is checked between targets and
/// discards everything learned so far.
pub async fn probe_referential_integrity(
    targets: Vec<Arc<dyn TargetEntity>>,
    monitor: ProgressMonitor,
) -> ReferentialIntegritySupport {
    let controllers: Vec<_> = targets
        .iter()
        .filter_map(|target| {
            target
                .as_referential_integrity_controller()
                .map(|controller| (target.object_name(), controller))
        })
        .collect();

    if controllers.is_empty() {
        return ReferentialIntegritySupport::unsupported();
    }

    monitor.begin_task(
        "Check referential integrity support",
        controllers.len() as u64,
    );

    let mut supported = false;
    let mut statements = IndexSet::new();

    for (name, controller) in controllers {
        if monitor.is_cancelled() {
            return ReferentialIntegritySupport::incomplete(ProbeStatus::Cancelled);
        }
        monitor.subtask(name);

        let result = async {
            if controller
                .supports_changing_referential_integrity(&monitor)
                .await?
            {
                supported = true;
                statements.insert(
                    controller
                        .change_referential_integrity_statement(&monitor, false)
                        .await?,
                );
                statements.insert(
                    controller
                        .change_referential_integrity_statement(&monitor, true)
                        .await?,
                );
            }
            Ok::<(), ZqlzError>(())
        }
        .await;

        match result {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {
                return ReferentialIntegritySupport::incomplete(ProbeStatus::Cancelled);
            }
            Err(e) => {
                tracing::debug!(
                    target_name = name,
                    error = %e,
                    "Unexpected error when calculating options for 'Disable referential integrity'"
                );
            }
        }
        monitor.worked(1);
    }

    if monitor.is_cancelled() {
        return ReferentialIntegritySupport::incomplete(ProbeStatus::Cancelled);
    }
    monitor.done();

    ReferentialIntegritySupport {
        status: ProbeStatus::Complete,
        supported,
        statements: statements.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_lists_statements_after_header() {
        let support = ReferentialIntegritySupport {
            status: ProbeStatus::Complete,
            supported: true,
            statements: vec!["SET session_replication_role = replica".into(), "SET session_replication_role = DEFAULT".into()],
        };
        let expected = format!(
            "{RI_TOOLTIP_HEADER}{LINE_SEPARATOR}SET session_replication_role = replica{LINE_SEPARATOR}SET session_replication_role = DEFAULT"
        );
        assert_eq!(support.tooltip(), expected);
    }

    #[test]
    fn test_tooltip_empty_without_statements() {
        assert_eq!(ReferentialIntegritySupport::unsupported().tooltip(), "");
    }

    #[test]
    fn test_toggle_requires_complete_probe() {
        let mut support = ReferentialIntegritySupport {
            status: ProbeStatus::Pending,
            supported: true,
            statements: Vec::new(),
        };
        assert!(!support.toggle_supported());
        support.status = ProbeStatus::Complete;
        assert!(support.toggle_supported());
    }

    #[test]
    fn test_conservative_capabilities() {
        let caps = CapabilitySet::conservative();
        assert!(!caps.ri_toggle_supported());
        assert!(!caps.bulk_load_supported);
        assert!(!caps.statement_binding_supported);
        assert!(caps.insert_methods.is_empty());
        assert_eq!(caps.referential_integrity.status, ProbeStatus::Pending);
    }

    #[tokio::test]
    async fn test_probe_without_controllers_is_complete_and_unsupported() {
        let support = probe_referential_integrity(Vec::new(), ProgressMonitor::new()).await;
        assert_eq!(support, ReferentialIntegritySupport::unsupported());
    }
}
