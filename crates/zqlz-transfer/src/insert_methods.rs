//! Insert-method catalog
//!
//! The on-duplicate-key strategies offered by the target's SQL dialect.
//! The drop-down always starts with a sentinel entry meaning "plain INSERT";
//! catalog entries start at index 1.

use zqlz_core::{DataSource, DialectRegistry, InsertReplaceMethod};

use crate::DatabaseLoadSettings;

/// Label of the drop-down's first entry (no special insert method)
pub const INSERT_NONE_METHOD: &str = "<NONE>";

/// What a drop-down index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMethodSelection<'a> {
    /// Index 0: plain INSERT
    Sentinel,
    /// Index > 0: the method at `index - 1`
    Method(&'a InsertReplaceMethod),
    /// Index past the end of the catalog
    OutOfRange,
}

/// Ordered insert/replace methods supported by the current data source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertMethodCatalog {
    methods: Vec<InsertReplaceMethod>,
}

impl InsertMethodCatalog {
    pub fn new(methods: Vec<InsertReplaceMethod>) -> Self {
        Self { methods }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the catalog from the data source's dialect.
    ///
    /// No data source, no dialect id or an unregistered dialect all yield an
    /// empty catalog.
    pub fn resolve(data_source: Option<&dyn DataSource>, registry: &DialectRegistry) -> Self {
        let Some(data_source) = data_source else {
            return Self::empty();
        };
        let Some(dialect_id) = data_source.dialect_id() else {
            tracing::debug!(data_source = data_source.name(), "data source has no SQL dialect");
            return Self::empty();
        };
        match registry.get(dialect_id) {
            Some(profile) => {
                tracing::debug!(
                    dialect = %profile.language_name,
                    methods = profile.insert_replace_methods().len(),
                    "resolved insert methods"
                );
                Self::new(profile.insert_replace_methods().to_vec())
            }
            None => {
                tracing::debug!(dialect = dialect_id, "no dialect profile registered");
                Self::empty()
            }
        }
    }

    pub fn methods(&self) -> &[InsertReplaceMethod] {
        &self.methods
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.methods.iter().any(|m| m.id == id)
    }

    /// Drop-down entries: the sentinel followed by every method label
    pub fn items(&self) -> Vec<String> {
        std::iter::once(INSERT_NONE_METHOD.to_string())
            .chain(self.methods.iter().map(|m| m.label.to_string()))
            .collect()
    }

    /// Drop-down index for a stored id; unknown or absent ids map to the sentinel
    pub fn index_of(&self, id: Option<&str>) -> usize {
        id.and_then(|id| self.methods.iter().position(|m| m.id == id))
            .map(|pos| pos + 1)
            .unwrap_or(0)
    }

    pub fn selection_at(&self, index: usize) -> InsertMethodSelection<'_> {
        match index {
            0 => InsertMethodSelection::Sentinel,
            i => self
                .methods
                .get(i - 1)
                .map(InsertMethodSelection::Method)
                .unwrap_or(InsertMethodSelection::OutOfRange),
        }
    }

    /// Align the stored id with this catalog and return the drop-down index.
    ///
    /// A non-empty id the catalog does not know was most likely saved while
    /// loading into another database and is cleared.
    pub fn reconcile(&self, settings: &mut DatabaseLoadSettings) -> usize {
        let index = self.index_of(settings.insert_method_id());
        if index == 0 {
            if let Some(stale) = settings.on_duplicate_key_insert_method_id.take() {
                if !stale.is_empty() {
                    tracing::debug!(method = %stale, "discarding insert method unknown to target dialect");
                }
            }
        }
        index
    }
}
