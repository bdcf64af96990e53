//! Option-compatibility rules
//!
//! `reduce` applies one user event to the page state and re-establishes
//! every compatibility rule; `Enablement` decides which inputs accept events.
//! Neither touches the view port or the capability probe.

use crate::{
    CapabilitySet, DatabaseLoadSettings, InsertMethodSelection, TransferWizardSettings,
    parse_lenient_u32,
};

/// Everything the load-settings page edits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSettingsState {
    pub settings: DatabaseLoadSettings,
    pub wizard: TransferWizardSettings,
}

impl LoadSettingsState {
    pub fn new(settings: DatabaseLoadSettings, wizard: TransferWizardSettings) -> Self {
        Self { settings, wizard }
    }
}

/// A user edit on the load-settings page.
///
/// Toggle events carry the new checked value, so repeating one is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSettingsEvent {
    TransferAutoGeneratedColumns(bool),
    TruncateBeforeLoad(bool),
    DisableReferentialIntegrity(bool),
    /// Drop-down index; 0 is the sentinel
    SelectInsertMethod(usize),
    OpenTableOnFinish(bool),
    OpenNewConnections(bool),
    UseTransactions(bool),
    CommitAfterRowsEdited(String),
    UseMultiRowInsert(bool),
    MultiRowInsertBatchEdited(String),
    SkipBindValues(bool),
    DisableUsingBatches(bool),
    IgnoreDuplicateRows(bool),
    UseBulkLoad(bool),
    ShowFinalMessage(bool),
}

/// Which capability-dependent inputs currently accept edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enablement {
    pub disable_referential_integrity: bool,
    pub insert_method: bool,
    pub use_multi_row_insert: bool,
    pub multi_row_insert_batch: bool,
    /// The skip-bind-values toggle exists only when binding is supported
    pub skip_bind_values_visible: bool,
    pub ignore_duplicate_rows: bool,
    pub use_bulk_load: bool,
}

impl Enablement {
    pub fn compute(settings: &DatabaseLoadSettings, caps: &CapabilitySet) -> Self {
        Self {
            disable_referential_integrity: caps.ri_toggle_supported(),
            insert_method: !caps.insert_methods.is_empty() && !settings.use_bulk_load,
            use_multi_row_insert: !settings.disable_using_batches,
            multi_row_insert_batch: settings.use_multi_row_insert,
            skip_bind_values_visible: caps.statement_binding_supported,
            ignore_duplicate_rows: ignore_duplicate_rows_enabled(settings),
            use_bulk_load: caps.bulk_load_supported,
        }
    }

    /// Whether the input the event originates from is enabled
    pub fn accepts(&self, event: &LoadSettingsEvent) -> bool {
        use LoadSettingsEvent::*;
        match event {
            DisableReferentialIntegrity(_) => self.disable_referential_integrity,
            SelectInsertMethod(_) => self.insert_method,
            UseMultiRowInsert(_) => self.use_multi_row_insert,
            MultiRowInsertBatchEdited(_) => self.multi_row_insert_batch,
            SkipBindValues(_) => self.skip_bind_values_visible,
            IgnoreDuplicateRows(_) => self.ignore_duplicate_rows,
            UseBulkLoad(_) => self.use_bulk_load,
            TransferAutoGeneratedColumns(_)
            | TruncateBeforeLoad(_)
            | OpenTableOnFinish(_)
            | OpenNewConnections(_)
            | UseTransactions(_)
            | CommitAfterRowsEdited(_)
            | DisableUsingBatches(_)
            | ShowFinalMessage(_) => true,
        }
    }
}

/// Ignoring duplicates needs row-by-row execution and a regular insert path
pub fn ignore_duplicate_rows_enabled(settings: &DatabaseLoadSettings) -> bool {
    settings.disable_using_batches && !settings.use_bulk_load
}

/// Apply one event and return the resulting state.
///
/// Events aimed at a disabled input leave the state unchanged. Truncate
/// confirmation is the caller's concern; this only records the value.
pub fn reduce(
    state: &LoadSettingsState,
    caps: &CapabilitySet,
    event: &LoadSettingsEvent,
) -> LoadSettingsState {
    if !Enablement::compute(&state.settings, caps).accepts(event) {
        tracing::trace!(?event, "ignoring event for disabled input");
        return state.clone();
    }

    let mut next = state.clone();
    let settings = &mut next.settings;

    match event {
        LoadSettingsEvent::TransferAutoGeneratedColumns(checked) => {
            settings.transfer_auto_generated_columns = *checked;
        }
        LoadSettingsEvent::TruncateBeforeLoad(checked) => {
            settings.truncate_before_load = *checked;
        }
        LoadSettingsEvent::DisableReferentialIntegrity(checked) => {
            settings.disable_referential_integrity = *checked;
        }
        LoadSettingsEvent::SelectInsertMethod(index) => {
            match caps.insert_methods.selection_at(*index) {
                InsertMethodSelection::Sentinel => {
                    settings.on_duplicate_key_insert_method_id = None;
                }
                InsertMethodSelection::Method(method) => {
                    settings.on_duplicate_key_insert_method_id = Some(method.id.to_string());
                }
                InsertMethodSelection::OutOfRange => {
                    tracing::debug!(index, "insert method index out of range");
                }
            }
        }
        LoadSettingsEvent::OpenTableOnFinish(checked) => {
            settings.open_table_on_finish = *checked;
        }
        LoadSettingsEvent::OpenNewConnections(checked) => {
            settings.open_new_connections = *checked;
        }
        LoadSettingsEvent::UseTransactions(checked) => {
            settings.use_transactions = *checked;
        }
        LoadSettingsEvent::CommitAfterRowsEdited(text) => {
            settings.commit_after_rows = parse_lenient_u32(text);
        }
        LoadSettingsEvent::UseMultiRowInsert(checked) => {
            settings.use_multi_row_insert = *checked;
        }
        LoadSettingsEvent::MultiRowInsertBatchEdited(text) => {
            settings.multi_row_insert_batch = parse_lenient_u32(text);
        }
        LoadSettingsEvent::SkipBindValues(checked) => {
            settings.skip_bind_values = *checked;
        }
        LoadSettingsEvent::DisableUsingBatches(checked) => {
            settings.disable_using_batches = *checked;
        }
        LoadSettingsEvent::IgnoreDuplicateRows(checked) => {
            settings.ignore_duplicate_rows = *checked;
        }
        LoadSettingsEvent::UseBulkLoad(checked) => {
            settings.use_bulk_load = *checked;
        }
        LoadSettingsEvent::ShowFinalMessage(checked) => {
            next.wizard.show_final_message = *checked;
        }
    }

    enforce_invariants(&mut next.settings, caps);
    next
}

/// Force the settings back into a compatible combination.
///
/// Referential integrity counts as unsupported until a probe has completed
/// and found support.
pub fn enforce_invariants(settings: &mut DatabaseLoadSettings, caps: &CapabilitySet) {
    if settings.disable_using_batches {
        settings.use_multi_row_insert = false;
    }
    if !caps.bulk_load_supported {
        settings.use_bulk_load = false;
    }
    if !ignore_duplicate_rows_enabled(settings) {
        settings.ignore_duplicate_rows = false;
    }
    if settings.use_bulk_load {
        settings.on_duplicate_key_insert_method_id = None;
    }
    if !caps.statement_binding_supported {
        settings.skip_bind_values = false;
    }
    if !caps.ri_toggle_supported() {
        settings.disable_referential_integrity = false;
    }
    caps.insert_methods.reconcile(settings);
}
