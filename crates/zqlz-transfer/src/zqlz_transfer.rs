//! ZQLZ Data Transfer - database load settings
//!
//! Decides which load options a data-transfer wizard may offer for a
//! relational target, and keeps the chosen combination consistent.
//!
//! # Architecture
//!
//! ```text
//! TransferContext ──► CapabilitySet ◄── RI probe (tokio task)
//!                          │
//! LoadSettingsEvent ──► reduce ──► LoadSettingsState ──► render ──► LoadSettingsView
//!                                         │
//!                                   SettingsStore
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let state = load_state_or_default(&open_default_store()?);
//! let mut controller =
//!     LoadSettingsController::new(context, state, view_port, DIALECT_REGISTRY.clone());
//! controller.activate();
//! controller.handle_event(LoadSettingsEvent::DisableUsingBatches(true));
//! controller.wait_for_probe().await;
//! ```

mod capabilities;
mod context;
mod controller;
mod insert_methods;
mod persistence;
mod settings;
mod state_machine;
mod truncate_gate;
mod view;

pub use capabilities::{
    CapabilitySet, LINE_SEPARATOR, ProbeStatus, RI_TOOLTIP_HEADER, ReferentialIntegritySupport,
    probe_referential_integrity,
};
pub use context::{ConsumerKind, DataPipe, MappingContainer, TransferContext};
pub use controller::{LoadSettingsController, LoadSettingsViewPort, ProbeCompletion};
pub use insert_methods::{INSERT_NONE_METHOD, InsertMethodCatalog, InsertMethodSelection};
pub use persistence::{
    DATABASE_LOAD_SECTION, TRANSFER_WIZARD_SECTION, TransferSettingsError, load_state,
    load_state_or_default, open_default_store, save_state,
};
pub use settings::*;
pub use state_machine::{
    Enablement, LoadSettingsEvent, LoadSettingsState, enforce_invariants,
    ignore_duplicate_rows_enabled, reduce,
};
pub use truncate_gate::{
    ConfirmationHost, HostWindowState, TRUNCATE_CONFIRM_TITLE, TruncateConfirmation,
    TruncateGate,
};
pub use view::{
    DOCS_BASE_URL, DropDownState, HELP_TOPIC_REPLACE_METHOD, LinkState, LoadSettingsView,
    TextFieldState, ToggleState, help_url, render,
};
