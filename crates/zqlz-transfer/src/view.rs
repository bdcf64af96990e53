//! View descriptor for the load-settings page
//!
//! A toolkit-independent description of every input: whether it exists,
//! whether it is enabled and what it shows. The host widget layer draws it.

use crate::{CapabilitySet, Enablement, INSERT_NONE_METHOD, LoadSettingsState};

/// Base URL of the external documentation
pub const DOCS_BASE_URL: &str = "https://github.com/yourorg/zqlz/wiki";

/// Help topic describing the insert/replace methods
pub const HELP_TOPIC_REPLACE_METHOD: &str = "Data-Import-and-Replace";

/// External reference for a help topic
pub fn help_url(topic: &str) -> String {
    format!("{}/{}", DOCS_BASE_URL, topic)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleState {
    pub enabled: bool,
    pub checked: bool,
    pub tooltip: Option<String>,
}

impl ToggleState {
    pub fn new(enabled: bool, checked: bool) -> Self {
        Self {
            enabled,
            checked,
            tooltip: None,
        }
    }

    pub fn enabled(checked: bool) -> Self {
        Self::new(true, checked)
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        let tooltip = tooltip.into();
        self.tooltip = (!tooltip.is_empty()).then_some(tooltip);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldState {
    pub enabled: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDownState {
    pub enabled: bool,
    pub items: Vec<String>,
    pub selected: usize,
}

impl DropDownState {
    pub fn selected_label(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    pub text: String,
    pub url: String,
}

/// Rendered state of the whole page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSettingsView {
    // Table mapping
    pub transfer_auto_generated_columns: ToggleState,
    pub truncate_before_load: ToggleState,
    pub disable_referential_integrity: ToggleState,
    pub insert_method: DropDownState,
    pub replace_method_help: LinkState,

    // General
    pub open_table_on_finish: ToggleState,
    pub show_final_message: ToggleState,

    // Performance
    pub open_new_connections: ToggleState,
    pub use_transactions: ToggleState,
    pub commit_after_rows: TextFieldState,
    pub use_multi_row_insert: ToggleState,
    pub multi_row_insert_batch: TextFieldState,
    /// Absent when the data source cannot bind statement parameters
    pub skip_bind_values: Option<ToggleState>,
    pub disable_using_batches: ToggleState,
    pub ignore_duplicate_rows: ToggleState,
    pub use_bulk_load: ToggleState,
}

/// Describe the page for the given state and capabilities
pub fn render(state: &LoadSettingsState, caps: &CapabilitySet) -> LoadSettingsView {
    let settings = &state.settings;
    let enablement = Enablement::compute(settings, caps);

    // bulk load offers the sentinel only
    let insert_method = if settings.use_bulk_load {
        DropDownState {
            enabled: false,
            items: vec![INSERT_NONE_METHOD.to_string()],
            selected: 0,
        }
    } else {
        DropDownState {
            enabled: enablement.insert_method,
            items: caps.insert_methods.items(),
            selected: caps.insert_methods.index_of(settings.insert_method_id()),
        }
    };

    LoadSettingsView {
        transfer_auto_generated_columns: ToggleState::enabled(
            settings.transfer_auto_generated_columns,
        ),
        truncate_before_load: ToggleState::enabled(settings.truncate_before_load),
        disable_referential_integrity: ToggleState::new(
            enablement.disable_referential_integrity,
            settings.disable_referential_integrity && enablement.disable_referential_integrity,
        )
        .with_tooltip(caps.ri_toggle_tooltip()),
        insert_method,
        replace_method_help: LinkState {
            text: "More about replace methods".to_string(),
            url: help_url(HELP_TOPIC_REPLACE_METHOD),
        },

        open_table_on_finish: ToggleState::enabled(settings.open_table_on_finish),
        show_final_message: ToggleState::enabled(state.wizard.show_final_message),

        open_new_connections: ToggleState::enabled(settings.open_new_connections),
        use_transactions: ToggleState::enabled(settings.use_transactions),
        commit_after_rows: TextFieldState {
            enabled: true,
            text: settings.commit_after_rows.to_string(),
        },
        use_multi_row_insert: ToggleState::new(
            enablement.use_multi_row_insert,
            settings.use_multi_row_insert,
        ),
        multi_row_insert_batch: TextFieldState {
            enabled: enablement.multi_row_insert_batch,
            text: settings.multi_row_insert_batch.to_string(),
        },
        skip_bind_values: enablement
            .skip_bind_values_visible
            .then(|| ToggleState::enabled(settings.skip_bind_values)),
        disable_using_batches: ToggleState::enabled(settings.disable_using_batches),
        ignore_duplicate_rows: ToggleState::new(
            enablement.ignore_duplicate_rows,
            settings.ignore_duplicate_rows,
        ),
        use_bulk_load: ToggleState::new(enablement.use_bulk_load, settings.use_bulk_load),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DatabaseLoadSettings, InsertMethodCatalog, ProbeStatus, ReferentialIntegritySupport,
        TransferWizardSettings,
    };
    use pretty_assertions::assert_eq;
    use zqlz_core::InsertReplaceMethod;

    fn state() -> LoadSettingsState {
        LoadSettingsState::new(DatabaseLoadSettings::all_disabled(), TransferWizardSettings::default())
    }

    #[test]
    fn test_conservative_view() {
        let view = render(&state(), &CapabilitySet::conservative());
        assert!(!view.disable_referential_integrity.enabled);
        assert_eq!(view.disable_referential_integrity.tooltip, None);
        assert!(!view.use_bulk_load.enabled);
        assert_eq!(view.skip_bind_values, None);
        assert!(!view.insert_method.enabled);
        assert_eq!(view.insert_method.items, vec!["<NONE>".to_string()]);
        assert_eq!(view.insert_method.selected_label(), Some("<NONE>"));
        assert!(view.show_final_message.checked);
    }

    #[test]
    fn test_multi_row_batch_field_tracks_multi_row_toggle() {
        let mut state = state();
        state.settings.use_multi_row_insert = true;
        let view = render(&state, &CapabilitySet::conservative());
        assert!(view.use_multi_row_insert.enabled);
        assert!(view.multi_row_insert_batch.enabled);
        assert_eq!(view.multi_row_insert_batch.text, "100");
    }

    #[test]
    fn test_referential_integrity_tooltip_and_pending_state() {
        let mut state = state();
        state.settings.disable_referential_integrity = true;

        let mut caps = CapabilitySet::conservative();
        caps.referential_integrity = ReferentialIntegritySupport {
            status: ProbeStatus::Pending,
            supported: true,
            statements: vec!["PRAGMA foreign_keys = OFF".into()],
        };
        let view = render(&state, &caps);
        assert_eq!(view.disable_referential_integrity.enabled, false);
        assert_eq!(view.disable_referential_integrity.checked, false);

        caps.referential_integrity.status = ProbeStatus::Complete;
        let view = render(&state, &caps);
        assert!(view.disable_referential_integrity.enabled);
        assert!(view.disable_referential_integrity.checked);
        assert!(
            view.disable_referential_integrity
                .tooltip
                .as_deref()
                .is_some_and(|t| t.ends_with("PRAGMA foreign_keys = OFF"))
        );
    }

    #[test]
    fn test_bulk_load_offers_only_sentinel() {
        let mut state = state();
        state.settings.use_bulk_load = true;
        let caps = CapabilitySet {
            bulk_load_supported: true,
            insert_methods: InsertMethodCatalog::new(vec![InsertReplaceMethod::custom("A", "Method A")]),
            ..CapabilitySet::conservative()
        };
        let view = render(&state, &caps);
        assert!(view.use_bulk_load.checked);
        assert!(!view.insert_method.enabled);
        assert_eq!(view.insert_method.selected, 0);
        assert_eq!(view.insert_method.items, vec!["<NONE>".to_string()]);

        state.settings.use_bulk_load = false;
        let view = render(&state, &caps);
        assert!(view.insert_method.enabled);
        assert_eq!(view.insert_method.items, vec!["<NONE>".to_string(), "Method A".to_string()]);
    }

    #[test]
    fn test_help_link() {
        let view = render(&state(), &CapabilitySet::conservative());
        assert_eq!(
            view.replace_method_help.url,
            "https://github.com/yourorg/zqlz/wiki/Data-Import-and-Replace"
        );
    }
}
