//! Load and save the page state through the wizard settings store

use thiserror::Error;
use zqlz_settings::SettingsStore;

use crate::{DatabaseLoadSettings, LoadSettingsState, TransferWizardSettings};

/// Section holding `DatabaseLoadSettings`
pub const DATABASE_LOAD_SECTION: &str = "databaseLoad";
/// Section holding `TransferWizardSettings`
pub const TRANSFER_WIZARD_SECTION: &str = "transferWizard";

#[derive(Debug, Error)]
pub enum TransferSettingsError {
    #[error("Failed to open transfer settings: {0:#}")]
    Open(anyhow::Error),

    #[error("Failed to read settings section '{section}': {error:#}")]
    Read {
        section: &'static str,
        error: anyhow::Error,
    },

    #[error("Failed to save transfer settings: {0:#}")]
    Save(anyhow::Error),
}

/// Open the settings store at its default location
pub fn open_default_store() -> Result<SettingsStore, TransferSettingsError> {
    SettingsStore::open_default().map_err(TransferSettingsError::Open)
}

/// Read the page state; missing sections fall back to defaults
pub fn load_state(store: &SettingsStore) -> Result<LoadSettingsState, TransferSettingsError> {
    let settings = store
        .section_or_default::<DatabaseLoadSettings>(DATABASE_LOAD_SECTION)
        .map_err(|error| TransferSettingsError::Read {
            section: DATABASE_LOAD_SECTION,
            error,
        })?;
    let wizard = store
        .section_or_default::<TransferWizardSettings>(TRANSFER_WIZARD_SECTION)
        .map_err(|error| TransferSettingsError::Read {
            section: TRANSFER_WIZARD_SECTION,
            error,
        })?;
    Ok(LoadSettingsState::new(settings, wizard))
}

/// Read the page state, using defaults when the stored sections are unusable
pub fn load_state_or_default(store: &SettingsStore) -> LoadSettingsState {
    match load_state(store) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "using default load settings");
            LoadSettingsState::default()
        }
    }
}

/// Write both sections and flush the store to disk
pub fn save_state(
    store: &mut SettingsStore,
    state: &LoadSettingsState,
) -> Result<(), TransferSettingsError> {
    store
        .set_section(DATABASE_LOAD_SECTION, &state.settings)
        .map_err(TransferSettingsError::Save)?;
    store
        .set_section(TRANSFER_WIZARD_SECTION, &state.wizard)
        .map_err(TransferSettingsError::Save)?;
    store.save().map_err(TransferSettingsError::Save)?;
    tracing::debug!(path = %store.path().display(), "saved load settings");
    Ok(())
}
