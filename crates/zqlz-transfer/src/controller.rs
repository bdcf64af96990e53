//! Load-settings page controller
//!
//! Owns the page state for one wizard run. Runs on the UI loop: every method
//! takes `&mut self` and only the referential-integrity probe leaves the
//! loop, as a tokio task that reports back over a channel.

use std::sync::Arc;
use tokio::sync::mpsc;
use zqlz_core::{DialectRegistry, ProgressMonitor};

use crate::{
    CapabilitySet, ConfirmationHost, ConsumerKind, DatabaseLoadSettings, HELP_TOPIC_REPLACE_METHOD,
    LoadSettingsEvent, LoadSettingsState, LoadSettingsView, ProbeStatus,
    ReferentialIntegritySupport, TransferContext, TransferWizardSettings, TruncateGate,
    enforce_invariants, help_url, probe_referential_integrity, reduce, render,
};

/// Widget layer that draws the page
pub trait LoadSettingsViewPort {
    fn render(&mut self, view: &LoadSettingsView);

    /// Open an external link (help pages)
    fn launch_url(&mut self, url: &str);
}

/// Result of one probe run, tagged with the activation that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCompletion {
    pub generation: u64,
    pub support: ReferentialIntegritySupport,
}

pub struct LoadSettingsController<V: LoadSettingsViewPort> {
    context: TransferContext,
    registry: Arc<DialectRegistry>,
    state: LoadSettingsState,
    capabilities: CapabilitySet,
    view: LoadSettingsView,
    view_port: V,
    host: Option<Arc<dyn ConfirmationHost>>,
    /// Last referential-integrity choice; the record only carries it while
    /// the toggle is supported
    ri_preference: bool,
    /// Bumped on every activation; completions from older runs are dropped
    generation: u64,
    /// Monitor of the probe still in flight
    probe_monitor: Option<ProgressMonitor>,
    probe_tx: mpsc::UnboundedSender<ProbeCompletion>,
    probe_rx: mpsc::UnboundedReceiver<ProbeCompletion>,
}

impl<V: LoadSettingsViewPort> LoadSettingsController<V> {
    /// Create the controller and draw the initial page.
    ///
    /// Capabilities that need no database round-trip are resolved right
    /// away; referential-integrity support stays pending until [`activate`].
    ///
    /// [`activate`]: Self::activate
    pub fn new(
        context: TransferContext,
        state: LoadSettingsState,
        view_port: V,
        registry: Arc<DialectRegistry>,
    ) -> Self {
        let mut state = state;
        let ri_preference = state.settings.disable_referential_integrity;
        let capabilities = CapabilitySet::resolve_direct(&context, &registry);
        enforce_invariants(&mut state.settings, &capabilities);
        let view = render(&state, &capabilities);
        let (probe_tx, probe_rx) = mpsc::unbounded_channel();

        let mut controller = Self {
            context,
            registry,
            state,
            capabilities,
            view,
            view_port,
            host: None,
            ri_preference,
            generation: 0,
            probe_monitor: None,
            probe_tx,
            probe_rx,
        };
        controller.view_port.render(&controller.view);
        controller
    }

    pub fn with_confirmation_host(mut self, host: Arc<dyn ConfirmationHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Called each time the page is shown
    pub fn activate(&mut self) {
        if self.state.settings.truncate_before_load
            && !TruncateGate::confirm(self.host.as_deref(), &self.context, true)
        {
            self.state.settings.truncate_before_load = false;
        }

        self.capabilities = CapabilitySet::resolve_direct(&self.context, &self.registry);
        enforce_invariants(&mut self.state.settings, &self.capabilities);

        self.spawn_probe();
        self.refresh();

        tracing::info!(
            generation = self.generation,
            bulk_load_supported = self.capabilities.bulk_load_supported,
            statement_binding_supported = self.capabilities.statement_binding_supported,
            insert_methods = self.capabilities.insert_methods.len(),
            "load settings page activated"
        );
    }

    /// Called when the page is hidden; cancels an outstanding probe
    pub fn deactivate(&mut self) {
        if let Some(monitor) = self.probe_monitor.take() {
            monitor.cancel();
        }
    }

    pub fn handle_event(&mut self, event: LoadSettingsEvent) {
        if event == LoadSettingsEvent::TruncateBeforeLoad(true)
            && !self.state.settings.truncate_before_load
            && !TruncateGate::confirm(self.host.as_deref(), &self.context, false)
        {
            // redraw so the widget reverts to unchecked
            self.refresh();
            return;
        }

        self.state = reduce(&self.state, &self.capabilities, &event);
        if self.capabilities.ri_toggle_supported() {
            self.ri_preference = self.state.settings.disable_referential_integrity;
        }
        self.refresh();
    }

    /// Apply a probe result on the UI loop.
    ///
    /// Returns false for results of an earlier activation.
    pub fn apply_probe_completion(&mut self, completion: ProbeCompletion) -> bool {
        if completion.generation != self.generation {
            tracing::debug!(
                generation = completion.generation,
                current = self.generation,
                "discarding stale referential integrity probe result"
            );
            return false;
        }

        self.probe_monitor = None;
        self.capabilities.referential_integrity = completion.support;
        if self.capabilities.ri_toggle_supported() {
            self.state.settings.disable_referential_integrity = self.ri_preference;
        }
        enforce_invariants(&mut self.state.settings, &self.capabilities);
        self.refresh();
        true
    }

    /// Apply every probe result that has arrived without waiting
    pub fn poll_probe(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.probe_rx.try_recv() {
            applied |= self.apply_probe_completion(completion);
        }
        applied
    }

    /// Wait for the current probe and apply its result.
    ///
    /// Returns false when no probe is outstanding.
    pub async fn wait_for_probe(&mut self) -> bool {
        while self.probe_monitor.is_some() {
            match self.probe_rx.recv().await {
                Some(completion) => {
                    if self.apply_probe_completion(completion) {
                        return true;
                    }
                }
                None => break,
            }
        }
        false
    }

    pub fn open_replace_method_help(&mut self) {
        self.view_port
            .launch_url(&help_url(HELP_TOPIC_REPLACE_METHOD));
    }

    /// The page has no mandatory input
    pub fn is_page_complete(&self) -> bool {
        true
    }

    pub fn is_page_applicable(context: &TransferContext) -> bool {
        context.consumer_kind() == ConsumerKind::Database
    }

    pub fn state(&self) -> &LoadSettingsState {
        &self.state
    }

    pub fn settings(&self) -> &DatabaseLoadSettings {
        &self.state.settings
    }

    pub fn wizard_settings(&self) -> &TransferWizardSettings {
        &self.state.wizard
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn view(&self) -> &LoadSettingsView {
        &self.view
    }

    pub fn view_port(&self) -> &V {
        &self.view_port
    }

    /// Progress of the probe in flight, for the host's status bar
    pub fn probe_monitor(&self) -> Option<&ProgressMonitor> {
        self.probe_monitor.as_ref()
    }

    pub fn into_state(mut self) -> LoadSettingsState {
        std::mem::take(&mut self.state)
    }

    fn refresh(&mut self) {
        self.view = render(&self.state, &self.capabilities);
        self.view_port.render(&self.view);
    }

    fn spawn_probe(&mut self) {
        if let Some(previous) = self.probe_monitor.take() {
            previous.cancel();
        }
        self.generation += 1;

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::debug!(error = %e, "no async runtime for referential integrity probe");
                self.capabilities.referential_integrity =
                    ReferentialIntegritySupport::incomplete(ProbeStatus::Failed);
                return;
            }
        };

        let monitor = ProgressMonitor::new();
        let targets: Vec<_> = self.context.targets().cloned().collect();
        let generation = self.generation;
        let tx = self.probe_tx.clone();
        let task_monitor = monitor.clone();

        handle.spawn(async move {
            let probe = tokio::spawn(probe_referential_integrity(targets, task_monitor));
            let support = match probe.await {
                Ok(support) => support,
                Err(e) => {
                    tracing::debug!(error = %e, "referential integrity probe failed");
                    ReferentialIntegritySupport::incomplete(ProbeStatus::Failed)
                }
            };
            if tx.send(ProbeCompletion { generation, support }).is_err() {
                tracing::debug!(generation, "load settings page closed before probe finished");
            }
        });

        self.probe_monitor = Some(monitor);
    }
}

impl<V: LoadSettingsViewPort> Drop for LoadSettingsController<V> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl<V: LoadSettingsViewPort> std::fmt::Debug for LoadSettingsController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadSettingsController")
            .field("context", &self.context)
            .field("state", &self.state)
            .field("capabilities", &self.capabilities)
            .field("ri_preference", &self.ri_preference)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
