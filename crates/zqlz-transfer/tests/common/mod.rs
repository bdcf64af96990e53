//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{Arc, Once};
use std::time::Duration;
use zqlz_core::{
    BulkLoader, DataSource, DataSourceInfo, DialectProfile, DialectRegistry, InsertReplaceMethod,
    ProgressMonitor, ReferentialIntegrityController, Result, TargetEntity, ZqlzError,
};
use zqlz_transfer::{
    ConfirmationHost, DataPipe, HostWindowState, LoadSettingsView, LoadSettingsViewPort,
    MappingContainer, TransferContext,
};

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Dialect id whose catalog is `[A, B]`
pub const MOCK_DIALECT: &str = "mock";

pub fn registry_with_ab() -> Arc<DialectRegistry> {
    let mut registry = DialectRegistry::new();
    registry.register(
        DialectProfile::new(MOCK_DIALECT, "Mock SQL").with_insert_methods(vec![
            InsertReplaceMethod::custom("A", "Method A"),
            InsertReplaceMethod::custom("B", "Method B"),
        ]),
    );
    Arc::new(registry)
}

pub struct MockBulkLoader;

impl BulkLoader for MockBulkLoader {
    fn loader_name(&self) -> &str {
        "mock-copy"
    }
}

/// Data source with configurable capabilities
pub struct MockDataSource {
    pub name: String,
    pub dialect: Option<String>,
    pub info: DataSourceInfo,
    pub bulk_load: bool,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            name: "mock-target".to_string(),
            dialect: Some(MOCK_DIALECT.to_string()),
            info: DataSourceInfo::relational(),
            bulk_load: true,
        }
    }

    pub fn without_bulk_loader(mut self) -> Self {
        self.bulk_load = false;
        self
    }

    pub fn without_binding(mut self) -> Self {
        self.info.supports_statement_binding = false;
        self
    }

    pub fn with_dialect(mut self, dialect: Option<&str>) -> Self {
        self.dialect = dialect.map(str::to_string);
        self
    }
}

impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn driver_name(&self) -> &str {
        "mock"
    }

    fn dialect_id(&self) -> Option<&str> {
        self.dialect.as_deref()
    }

    fn info(&self) -> DataSourceInfo {
        self.info.clone()
    }

    fn bulk_loader(&self) -> Option<Arc<dyn BulkLoader>> {
        self.bulk_load
            .then(|| Arc::new(MockBulkLoader) as Arc<dyn BulkLoader>)
    }
}

/// Referential-integrity controller with scripted answers
pub struct MockRiController {
    pub supported: bool,
    pub should_fail: bool,
    pub delay: Option<Duration>,
    pub disable_sql: String,
    pub enable_sql: String,
    pub calls: Arc<Mutex<usize>>,
}

impl MockRiController {
    pub fn supported(disable_sql: &str, enable_sql: &str) -> Self {
        Self {
            supported: true,
            should_fail: false,
            delay: None,
            disable_sql: disable_sql.to_string(),
            enable_sql: enable_sql.to_string(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::supported("", "")
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::supported("", "")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ReferentialIntegrityController for MockRiController {
    async fn supports_changing_referential_integrity(
        &self,
        monitor: &ProgressMonitor,
    ) -> Result<bool> {
        *self.calls.lock() += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        monitor.check_cancelled()?;
        if self.should_fail {
            return Err(ZqlzError::target("broken", "permission denied for schema"));
        }
        Ok(self.supported)
    }

    async fn change_referential_integrity_statement(
        &self,
        _monitor: &ProgressMonitor,
        enable: bool,
    ) -> Result<String> {
        Ok(if enable {
            self.enable_sql.clone()
        } else {
            self.disable_sql.clone()
        })
    }
}

/// Target table, optionally able to toggle referential integrity
pub struct MockTable {
    pub name: String,
    pub ri: Option<MockRiController>,
}

impl MockTable {
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ri: None,
        }
    }

    pub fn with_ri(name: &str, ri: MockRiController) -> Self {
        Self {
            name: name.to_string(),
            ri: Some(ri),
        }
    }
}

impl TargetEntity for MockTable {
    fn object_name(&self) -> &str {
        &self.name
    }

    fn as_referential_integrity_controller(&self) -> Option<&dyn ReferentialIntegrityController> {
        self.ri
            .as_ref()
            .map(|ri| ri as &dyn ReferentialIntegrityController)
    }
}

/// Context loading into the given tables through the given data source
pub fn context_with_tables(data_source: MockDataSource, tables: Vec<MockTable>) -> TransferContext {
    tables.into_iter().fold(
        TransferContext::new(Arc::new(data_source)),
        |context, table| {
            let name = table.name.clone();
            context
                .with_mapping(MappingContainer::new(format!("src_{}", name), Arc::new(table)))
                .with_pipe(DataPipe::to_table(name))
        },
    )
}

/// View port that records everything it is asked to do
#[derive(Default)]
pub struct RecordingViewPort {
    pub renders: Vec<LoadSettingsView>,
    pub launched_urls: Vec<String>,
}

impl RecordingViewPort {
    pub fn last(&self) -> Option<&LoadSettingsView> {
        self.renders.last()
    }
}

impl LoadSettingsViewPort for RecordingViewPort {
    fn render(&mut self, view: &LoadSettingsView) {
        self.renders.push(view.clone());
    }

    fn launch_url(&mut self, url: &str) {
        self.launched_urls.push(url.to_string());
    }
}

/// Confirmation host answering from a script
pub struct ScriptedHost {
    pub state: Mutex<HostWindowState>,
    pub answers: Mutex<VecDeque<bool>>,
    pub asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedHost {
    pub fn new(state: HostWindowState, answers: impl IntoIterator<Item = bool>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn set_state(&self, state: HostWindowState) {
        *self.state.lock() = state;
    }

    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().clone()
    }
}

impl ConfirmationHost for ScriptedHost {
    fn window_state(&self) -> HostWindowState {
        *self.state.lock()
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        self.asked
            .lock()
            .push((title.to_string(), message.to_string()));
        self.answers.lock().pop_front().unwrap_or(false)
    }
}
