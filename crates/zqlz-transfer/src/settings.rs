//! Database load settings
//!
//! The record the load-settings page edits and the data-transfer engine
//! consumes. Field names on disk match the camelCase names used by the
//! wizard's settings facility.

use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMIT_AFTER_ROWS: u32 = 10_000;
pub const DEFAULT_MULTI_ROW_INSERT_BATCH: u32 = 100;

/// Options controlling how rows are written into a relational target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseLoadSettings {
    /// Copy source values into auto-generated target columns
    pub transfer_auto_generated_columns: bool,
    /// Empty the target tables before inserting
    pub truncate_before_load: bool,
    /// Suspend foreign-key enforcement for the session
    pub disable_referential_integrity: bool,
    /// Dialect-specific insert/replace strategy; `None` means plain INSERT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_duplicate_key_insert_method_id: Option<String>,
    /// Open the target table viewer after success
    pub open_table_on_finish: bool,
    /// Allocate dedicated connections for the transfer
    pub open_new_connections: bool,
    /// Wrap inserts in transactions
    pub use_transactions: bool,
    /// Commit frequency in rows
    pub commit_after_rows: u32,
    /// Emit multi-row VALUES tuples
    pub use_multi_row_insert: bool,
    /// Rows per multi-row statement
    pub multi_row_insert_batch: u32,
    /// Inline literals instead of binding parameters
    pub skip_bind_values: bool,
    /// Execute statements one at a time instead of in batches
    pub disable_using_batches: bool,
    /// Silently drop rows violating uniqueness
    pub ignore_duplicate_rows: bool,
    /// Delegate to the driver's bulk loader
    pub use_bulk_load: bool,
}

impl Default for DatabaseLoadSettings {
    fn default() -> Self {
        Self {
            transfer_auto_generated_columns: false,
            truncate_before_load: false,
            disable_referential_integrity: false,
            on_duplicate_key_insert_method_id: None,
            open_table_on_finish: false,
            open_new_connections: true,
            use_transactions: true,
            commit_after_rows: DEFAULT_COMMIT_AFTER_ROWS,
            use_multi_row_insert: false,
            multi_row_insert_batch: DEFAULT_MULTI_ROW_INSERT_BATCH,
            skip_bind_values: false,
            disable_using_batches: false,
            ignore_duplicate_rows: false,
            use_bulk_load: false,
        }
    }
}

impl DatabaseLoadSettings {
    /// Every flag off, default counters
    pub fn all_disabled() -> Self {
        Self {
            open_new_connections: false,
            use_transactions: false,
            ..Self::default()
        }
    }

    /// Whether statements are sent in batches
    pub fn use_batches(&self) -> bool {
        !self.disable_using_batches
    }

    /// Rows per multi-row statement, never less than one.
    ///
    /// Lenient text parsing may store 0; the engine must still emit rows.
    pub fn effective_multi_row_insert_batch(&self) -> u32 {
        self.multi_row_insert_batch.max(1)
    }

    /// Selected insert method id, treating an empty string as absent
    pub fn insert_method_id(&self) -> Option<&str> {
        self.on_duplicate_key_insert_method_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

/// Settings owned by the enclosing transfer wizard rather than the consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferWizardSettings {
    /// Show a summary message when the transfer finishes
    pub show_final_message: bool,
}

impl Default for TransferWizardSettings {
    fn default() -> Self {
        Self {
            show_final_message: true,
        }
    }
}

/// Parse an integer text field leniently: anything that is not a
/// non-negative integer becomes 0.
pub fn parse_lenient_u32(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DatabaseLoadSettings::default();
        assert_eq!(settings.commit_after_rows, 10_000);
        assert_eq!(settings.multi_row_insert_batch, 100);
        assert!(settings.use_transactions);
        assert!(settings.open_new_connections);
        assert!(settings.use_batches());
        assert_eq!(settings.insert_method_id(), None);
    }

    #[test]
    fn test_all_disabled_keeps_counters() {
        let settings = DatabaseLoadSettings::all_disabled();
        assert!(!settings.use_transactions);
        assert!(!settings.open_new_connections);
        assert_eq!(settings.commit_after_rows, DEFAULT_COMMIT_AFTER_ROWS);
        assert_eq!(settings.multi_row_insert_batch, DEFAULT_MULTI_ROW_INSERT_BATCH);
    }

    #[test]
    fn test_parse_lenient_u32() {
        assert_eq!(parse_lenient_u32("500"), 500);
        assert_eq!(parse_lenient_u32(" 42 "), 42);
        assert_eq!(parse_lenient_u32("abc"), 0);
        assert_eq!(parse_lenient_u32(""), 0);
        assert_eq!(parse_lenient_u32("-5"), 0);
        assert_eq!(parse_lenient_u32("12.5"), 0);
    }

    #[test]
    fn test_effective_batch_never_zero() {
        let settings = DatabaseLoadSettings {
            multi_row_insert_batch: 0,
            ..Default::default()
        };
        assert_eq!(settings.effective_multi_row_insert_batch(), 1);
    }

    #[test]
    fn test_empty_insert_method_id_is_absent() {
        let settings = DatabaseLoadSettings {
            on_duplicate_key_insert_method_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(settings.insert_method_id(), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let settings = DatabaseLoadSettings {
            on_duplicate_key_insert_method_id: Some("mysqlReplace".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["onDuplicateKeyInsertMethodId"], "mysqlReplace");
        assert_eq!(json["commitAfterRows"], 10_000);
        assert_eq!(json["disableUsingBatches"], false);
        assert_eq!(json["transferAutoGeneratedColumns"], false);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: DatabaseLoadSettings =
            serde_json::from_str(r#"{"useBulkLoad": true}"#).unwrap();
        assert!(settings.use_bulk_load);
        assert_eq!(settings.multi_row_insert_batch, DEFAULT_MULTI_ROW_INSERT_BATCH);
        assert_eq!(settings.on_duplicate_key_insert_method_id, None);
    }

    #[test]
    fn test_wizard_settings_default_shows_final_message() {
        assert!(TransferWizardSettings::default().show_final_message);
        let parsed: TransferWizardSettings = serde_json::from_str("{}").unwrap();
        assert!(parsed.show_final_message);
    }
}
