//! Data source trait describing a connected target database

use std::sync::Arc;

/// Static facts a driver reports about a data source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSourceInfo {
    /// Whether statements accept bound parameters
    pub supports_statement_binding: bool,
}

impl DataSourceInfo {
    /// Capabilities of a typical relational driver
    pub fn relational() -> Self {
        Self {
            supports_statement_binding: true,
        }
    }
}

/// Driver-specific fast ingestion path (e.g. `COPY`, `LOAD DATA`)
pub trait BulkLoader: Send + Sync {
    /// Name of the loader, used in logs
    fn loader_name(&self) -> &str;
}

/// A data source that can receive loaded data
pub trait DataSource: Send + Sync {
    /// Display name of the data source
    fn name(&self) -> &str;

    /// Get the driver name (e.g., "sqlite", "postgres", "mysql")
    fn driver_name(&self) -> &str;

    /// Get the dialect identifier used to look up dialect metadata.
    ///
    /// Defaults to the driver name. Returns None if the dialect is unknown.
    fn dialect_id(&self) -> Option<&str> {
        Some(self.driver_name())
    }

    /// Static capabilities of this data source
    fn info(&self) -> DataSourceInfo;

    /// Get a bulk loader if the driver provides one.
    ///
    /// Returns `None` if bulk loading is not supported.
    fn bulk_loader(&self) -> Option<Arc<dyn BulkLoader>> {
        None
    }
}
