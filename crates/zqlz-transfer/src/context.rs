//! Transfer plan as seen by the load-settings page
//!
//! The wizard builds one `TransferContext` per run: the target data source,
//! the source→target mapping containers and the data pipes.

use indexmap::IndexMap;
use std::sync::Arc;
use zqlz_core::{DataSource, TargetEntity};

/// Kind of consumer at the end of the transfer pipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsumerKind {
    /// Rows are written into database tables
    #[default]
    Database,
    /// Rows are written into files (CSV, UDIF, ...)
    File,
}

/// Binding between one source object and one target object
#[derive(Clone)]
pub struct MappingContainer {
    source_name: String,
    target: Option<Arc<dyn TargetEntity>>,
}

impl MappingContainer {
    pub fn new(source_name: impl Into<String>, target: Arc<dyn TargetEntity>) -> Self {
        Self {
            source_name: source_name.into(),
            target: Some(target),
        }
    }

    /// A mapping whose target has not been resolved yet (e.g. table still to be created)
    pub fn unresolved(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            target: None,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn target(&self) -> Option<&Arc<dyn TargetEntity>> {
        self.target.as_ref()
    }
}

impl std::fmt::Debug for MappingContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingContainer")
            .field("source_name", &self.source_name)
            .field("target", &self.target.as_ref().map(|t| t.object_name()))
            .finish()
    }
}

/// One producer→consumer pipe of the transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataPipe {
    /// Display name of the consumer's target object, if one is bound
    pub consumer_object_name: Option<String>,
}

impl DataPipe {
    pub fn to_table(name: impl Into<String>) -> Self {
        Self {
            consumer_object_name: Some(name.into()),
        }
    }
}

/// Everything the load-settings page needs to know about the transfer
#[derive(Clone, Default)]
pub struct TransferContext {
    consumer_kind: ConsumerKind,
    data_source: Option<Arc<dyn DataSource>>,
    data_mappings: IndexMap<String, MappingContainer>,
    data_pipes: Vec<DataPipe>,
}

impl TransferContext {
    pub fn new(data_source: Arc<dyn DataSource>) -> Self {
        Self {
            data_source: Some(data_source),
            ..Default::default()
        }
    }

    /// A context without a target data source (container not yet chosen)
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_consumer_kind(mut self, kind: ConsumerKind) -> Self {
        self.consumer_kind = kind;
        self
    }

    /// Add a mapping container, keyed by its source name
    pub fn with_mapping(mut self, mapping: MappingContainer) -> Self {
        self.data_mappings
            .insert(mapping.source_name().to_string(), mapping);
        self
    }

    pub fn with_pipe(mut self, pipe: DataPipe) -> Self {
        self.data_pipes.push(pipe);
        self
    }

    pub fn consumer_kind(&self) -> ConsumerKind {
        self.consumer_kind
    }

    pub fn data_source(&self) -> Option<&Arc<dyn DataSource>> {
        self.data_source.as_ref()
    }

    pub fn data_mappings(&self) -> &IndexMap<String, MappingContainer> {
        &self.data_mappings
    }

    pub fn data_pipes(&self) -> &[DataPipe] {
        &self.data_pipes
    }

    /// Resolved targets of all mappings, in mapping order
    pub fn targets(&self) -> impl Iterator<Item = &Arc<dyn TargetEntity>> {
        self.data_mappings.values().filter_map(|m| m.target())
    }

    /// Comma-joined consumer object names across all pipes.
    ///
    /// A pipe without a consumer contributes an empty name.
    pub fn target_table_names(&self) -> String {
        self.data_pipes
            .iter()
            .map(|pipe| pipe.consumer_object_name.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Debug for TransferContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferContext")
            .field("consumer_kind", &self.consumer_kind)
            .field("data_source", &self.data_source.as_ref().map(|ds| ds.name()))
            .field("data_mappings", &self.data_mappings)
            .field("data_pipes", &self.data_pipes)
            .finish()
    }
}
