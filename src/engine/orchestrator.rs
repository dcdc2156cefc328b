// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Long-lived owner of a node's kit selection and conversion runs.
//!
//! The orchestrator is driven from a single control thread: every method takes
//! `&mut self` and returns without waiting on workers. Runs execute on the
//! tokio runtime the orchestrator was given, workers on its blocking pool and
//! a supervisor task on its async executor.
//!
//! ## Run generations
//!
//! Every started run takes the next value of a generation counter kept in
//! shared state. Starting a run cancels the previous run's token before any
//! new worker exists, and a supervisor only publishes if its run is still the
//! current generation. The check and the publish happen under one lock, so a
//! superseded run can never overwrite newer output whatever order the runs
//! finish in.
//!
//! ## Events
//!
//! Progress, completion and supersession are delivered on the
//! [`RunEvent`] channel returned by [`Orchestrator::new`]. User-visible
//! problems are also queued as [`RuntimeMessage`]s for the host to drain.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::backends::KitRegistry;
use crate::config::{consts::TRACKING_CATEGORY, EngineOptions, NodeState};
use crate::engine::direction::{Conversion, ToNative, ToPortable};
use crate::engine::events::{
    KitListing, RestoreOutcome, RunEvent, RunReport, RunTicket, RuntimeMessage, SwitchOutcome,
};
use crate::engine::handle::ConverterHandle;
use crate::engine::worker::{Worker, WorkerOutcome, WorkerProgress};
use crate::errors::EngineError;
use crate::observability::messages::worker::WorkerAborted;
use crate::observability::messages::engine::{
    PublishRejected, RunCompleted, RunSkipped, RunStarted, RunSuperseded, TrackerFailed,
};
use crate::observability::messages::kit::{
    ConverterRebound, KitFallback, KitSelected, NoKitAvailable,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{HostContext, ItemConverter, Kit, UsageTracker};
use crate::tracking::NoopTracker;
use crate::tree::Tree;

/// Orchestrator for portable-to-native nodes.
pub type NativeOrchestrator = Orchestrator<ToNative>;
/// Orchestrator for native-to-portable nodes.
pub type PortableOrchestrator = Orchestrator<ToPortable>;

type Shared<O> = Arc<Mutex<RunState<O>>>;

/// State touched by both the control thread and run supervisors.
struct RunState<O> {
    generation: u64,
    published: Option<Arc<RunReport<O>>>,
    messages: Vec<RuntimeMessage>,
}

fn lock<O>(shared: &Shared<O>) -> MutexGuard<'_, RunState<O>> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Binding {
    kit: Arc<dyn Kit>,
    converter: ConverterHandle,
}

pub struct Orchestrator<C: Conversion> {
    registry: Arc<KitRegistry>,
    context: HostContext,
    binding: Option<Binding>,
    worker_count: usize,
    runtime: Handle,
    tracker: Arc<dyn UsageTracker>,
    shared: Shared<C::Output>,
    events: UnboundedSender<RunEvent<C::Output>>,
    current_run: Option<CancellationToken>,
    last_input: Option<Arc<Tree<C::Input>>>,
}

impl<C: Conversion> Orchestrator<C> {
    /// Creates an orchestrator bound to the default kit for `context`.
    ///
    /// When no kit can serve the host application the orchestrator is still
    /// created, unbound; the problem is queued as an error message and every
    /// `run` fails with [`EngineError::NoBackendAvailable`].
    pub fn new(
        registry: Arc<KitRegistry>,
        context: HostContext,
        options: &EngineOptions,
        runtime: Handle,
    ) -> (Self, UnboundedReceiver<RunEvent<C::Output>>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let mut orchestrator = Self {
            registry,
            context,
            binding: None,
            worker_count: options.get_worker_count(),
            runtime,
            tracker: Arc::new(NoopTracker),
            shared: Arc::new(Mutex::new(RunState {
                generation: 0,
                published: None,
                messages: Vec::new(),
            })),
            events,
            current_run: None,
            last_input: None,
        };
        if let Err(e) = orchestrator.bind_default() {
            orchestrator.push_message(RuntimeMessage::error(e.to_string()));
        }
        (orchestrator, receiver)
    }

    pub fn with_tracker(mut self, tracker: Arc<dyn UsageTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    /// Starts a conversion of `input` in the background.
    ///
    /// Any run still in flight is cancelled first. Returns
    /// [`RunTicket::Skipped`] without touching state when `input` has no
    /// branches.
    pub fn run(&mut self, input: Tree<C::Input>) -> Result<RunTicket, EngineError> {
        self.start(Arc::new(input))
    }

    /// Selects `name` as the active kit and reruns the last input with it.
    pub fn switch_kit(&mut self, name: &str) -> Result<SwitchOutcome, EngineError> {
        let kit = self.registry.by_name(name)?;
        if self.active_kit() == Some(kit.name()) {
            return Ok(SwitchOutcome::Unchanged);
        }

        let converter = kit.load_converter(&self.context)?;
        let previous = self.bind(kit, converter);
        self.invalidate();

        let rerun = match self.last_input.clone() {
            Some(input) => self.start(input)?,
            None => RunTicket::Skipped,
        };
        Ok(SwitchOutcome::Switched { previous, rerun })
    }

    /// Name of the active kit, for persisting with the node.
    pub fn persist_selection(&self) -> Option<&str> {
        self.active_kit()
    }

    pub fn save_state(&self) -> NodeState {
        self.persist_selection()
            .map(NodeState::with_kit)
            .unwrap_or_default()
    }

    /// Reactivates a persisted kit selection.
    ///
    /// A missing or blank name selects the default kit. A kit that is not
    /// installed, cannot serve the host application or fails to load is
    /// replaced by the default kit and exactly one warning is queued. Only a
    /// registry with no usable kit at all is an error. No run is started.
    pub fn restore_selection(&mut self, name: Option<&str>) -> Result<RestoreOutcome, EngineError> {
        let requested = name.map(str::trim).filter(|name| !name.is_empty());
        let Some(requested) = requested else {
            return match self.bind_default() {
                Ok(kit) => Ok(RestoreOutcome::Restored { kit }),
                Err(e) => {
                    self.push_message(RuntimeMessage::error(e.to_string()));
                    Err(e)
                }
            };
        };

        if self.active_kit() == Some(requested) {
            return Ok(RestoreOutcome::Restored {
                kit: requested.to_string(),
            });
        }

        let loaded = self
            .registry
            .by_name(requested)
            .and_then(|kit| Ok((kit.load_converter(&self.context)?, kit)));
        match loaded {
            Ok((converter, kit)) => {
                self.bind(kit, converter);
                self.invalidate();
                Ok(RestoreOutcome::Restored {
                    kit: requested.to_string(),
                })
            }
            Err(e) => {
                let active = self.fall_back(requested, &e.to_string())?;
                Ok(RestoreOutcome::FellBack {
                    requested: requested.to_string(),
                    active,
                })
            }
        }
    }

    /// Restores the selection stored in `state`.
    pub fn restore_state(&mut self, state: &NodeState) -> Result<RestoreOutcome, EngineError> {
        self.restore_selection(state.kit_name())
    }

    /// Rebinds the active kit's converter to a new host context.
    ///
    /// Published output is invalidated. If the active kit cannot serve the
    /// new context the default kit for it takes over with a warning.
    pub fn set_host_context(&mut self, context: HostContext) -> Result<(), EngineError> {
        self.context = context;
        self.invalidate();

        let Some(kit) = self.binding.as_ref().map(|binding| binding.kit.clone()) else {
            if let Err(e) = self.bind_default() {
                self.push_message(RuntimeMessage::error(e.to_string()));
                return Err(e);
            }
            return Ok(());
        };

        match kit.load_converter(&self.context) {
            Ok(converter) => {
                if let Some(binding) = &self.binding {
                    binding.converter.replace(converter);
                }
                ConverterRebound {
                    kit_name: kit.name(),
                    application: &self.context.application,
                    document: self.context.document.as_deref(),
                }
                .log();
                Ok(())
            }
            Err(e) => {
                // Drop the converter bound to the old context.
                self.binding = None;
                self.fall_back(kit.name(), &e.to_string())?;
                Ok(())
            }
        }
    }

    /// Kits the bound host application can use, in registry order.
    pub fn available_kits(&self) -> Vec<KitListing> {
        let active = self.active_kit();
        self.registry
            .kits_for_app(&self.context.application)
            .iter()
            .map(|kit| KitListing {
                name: kit.name().to_string(),
                description: kit.description().to_string(),
                active: active == Some(kit.name()),
            })
            .collect()
    }

    pub fn active_kit(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.kit.name())
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// The most recently published report, if it is still valid.
    pub fn output(&self) -> Option<Arc<RunReport<C::Output>>> {
        lock(&self.shared).published.clone()
    }

    /// Generation of the most recent run request.
    pub fn current_generation(&self) -> u64 {
        lock(&self.shared).generation
    }

    /// Drains queued runtime messages.
    pub fn take_messages(&mut self) -> Vec<RuntimeMessage> {
        std::mem::take(&mut lock(&self.shared).messages)
    }

    fn start(&mut self, input: Arc<Tree<C::Input>>) -> Result<RunTicket, EngineError> {
        if input.is_empty() {
            RunSkipped {
                run_id: self.current_generation(),
            }
            .log();
            return Ok(RunTicket::Skipped);
        }

        let Some((kit_name, converter)) = self
            .binding
            .as_ref()
            .map(|binding| (binding.kit.name().to_string(), binding.converter.clone()))
        else {
            NoKitAvailable {
                application: &self.context.application,
                registered: self.registry.len(),
            }
            .log();
            let error = EngineError::NoBackendAvailable;
            self.push_message(RuntimeMessage::error(error.to_string()));
            return Err(error);
        };

        if let Some(previous) = self.current_run.take() {
            previous.cancel();
        }
        let run_id = {
            let mut state = lock(&self.shared);
            state.generation += 1;
            state.generation
        };
        let cancellation = CancellationToken::new();
        self.current_run = Some(cancellation.clone());
        self.last_input = Some(input.clone());

        let ranges = input.partition_ranges(self.worker_count);
        let start_msg = RunStarted {
            run_id,
            kit_name: &kit_name,
            direction: C::ACTION,
            item_count: input.count(),
            worker_count: ranges.len(),
        };
        let span = start_msg.span("conversion_run");
        span.in_scope(|| start_msg.log());

        let (progress_sender, progress) = mpsc::unbounded_channel();
        let prototype = Worker::<C>::new(run_id, converter, cancellation.clone())
            .with_progress(progress_sender);
        let tasks: Vec<JoinHandle<WorkerOutcome<C::Output>>> = ranges
            .into_iter()
            .enumerate()
            .map(|(index, range)| {
                let worker = prototype.duplicate(index);
                let input = input.clone();
                let span = span.clone();
                self.runtime
                    .spawn_blocking(move || span.in_scope(|| worker.do_work(&input, range)))
            })
            .collect();
        // Workers hold the remaining senders; the channel closes when they finish.
        drop(prototype);

        let supervisor = Supervisor {
            run_id,
            kit_name,
            total: input.count(),
            started: Instant::now(),
            cancellation,
            shared: self.shared.clone(),
            events: self.events.clone(),
        };
        self.runtime
            .spawn(supervisor.supervise(tasks, progress).instrument(span));
        self.track();

        Ok(RunTicket::Started(run_id))
    }

    /// Cancels the current run and drops published output.
    fn invalidate(&mut self) {
        if let Some(previous) = self.current_run.take() {
            previous.cancel();
        }
        let mut state = lock(&self.shared);
        state.generation += 1;
        state.published = None;
    }

    /// Makes `kit` active, swapping its converter into the existing handle so
    /// workers already holding the handle see it. Returns the previous kit.
    fn bind(&mut self, kit: Arc<dyn Kit>, converter: Arc<dyn ItemConverter>) -> Option<String> {
        let previous = self.active_kit().map(str::to_string);
        KitSelected {
            kit_name: kit.name(),
            previous: previous.as_deref(),
            application: &self.context.application,
        }
        .log();

        match &mut self.binding {
            Some(binding) => {
                binding.converter.replace(converter);
                binding.kit = kit;
            }
            None => {
                self.binding = Some(Binding {
                    kit,
                    converter: ConverterHandle::new(converter),
                });
            }
        }
        previous
    }

    /// Binds the default kit for the current host application.
    fn bind_default(&mut self) -> Result<String, EngineError> {
        let kit = match self.registry.default_kit_for(&self.context.application) {
            Ok(kit) => kit,
            Err(e) => {
                NoKitAvailable {
                    application: &self.context.application,
                    registered: self.registry.len(),
                }
                .log();
                return Err(e);
            }
        };
        let name = kit.name().to_string();
        if self.active_kit() != Some(name.as_str()) {
            let converter = kit.load_converter(&self.context)?;
            self.bind(kit, converter);
            self.invalidate();
        }
        Ok(name)
    }

    /// Replaces an unusable `requested` kit with the default, queuing one warning.
    fn fall_back(&mut self, requested: &str, reason: &str) -> Result<String, EngineError> {
        let active = match self.bind_default() {
            Ok(active) => active,
            Err(e) => {
                self.push_message(RuntimeMessage::error(e.to_string()));
                return Err(e);
            }
        };
        let fallback = KitFallback {
            requested,
            fallback: &active,
            reason,
        };
        fallback.log();
        self.push_message(RuntimeMessage::warning(fallback.to_string()));
        Ok(active)
    }

    fn push_message(&self, message: RuntimeMessage) {
        lock(&self.shared).messages.push(message);
    }

    fn track(&self) {
        let tracker = self.tracker.clone();
        self.runtime.spawn(async move {
            if let Err(e) = tracker.record(TRACKING_CATEGORY, C::ACTION).await {
                TrackerFailed {
                    category: TRACKING_CATEGORY,
                    action: C::ACTION,
                    reason: &e.to_string(),
                }
                .log();
            }
        });
    }
}

impl<C: Conversion> Drop for Orchestrator<C> {
    fn drop(&mut self) {
        if let Some(run) = self.current_run.take() {
            run.cancel();
        }
    }
}

impl<C: Conversion> std::fmt::Debug for Orchestrator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("direction", &C::ACTION)
            .field("active_kit", &self.active_kit())
            .field("context", &self.context)
            .field("worker_count", &self.worker_count)
            .finish()
    }
}

/// Collects one run's workers and publishes their merged output.
struct Supervisor<O> {
    run_id: u64,
    kit_name: String,
    total: usize,
    started: Instant,
    cancellation: CancellationToken,
    shared: Shared<O>,
    events: UnboundedSender<RunEvent<O>>,
}

impl<O: Send + Sync + 'static> Supervisor<O> {
    async fn supervise(
        self,
        tasks: Vec<JoinHandle<WorkerOutcome<O>>>,
        mut progress: UnboundedReceiver<WorkerProgress>,
    ) {
        let mut completed = vec![0usize; tasks.len()];
        let mut reported = 0.0;
        while let Some(update) = progress.recv().await {
            if let Some(slot) = completed.get_mut(update.worker_index) {
                *slot = update.completed;
            }
            if self.cancellation.is_cancelled() {
                continue;
            }
            let fraction = self.fraction(completed.iter().sum());
            if fraction > reported {
                reported = fraction;
                self.emit(RunEvent::Progress {
                    run_id: self.run_id,
                    fraction,
                });
            }
        }

        let mut output = Tree::new();
        let mut failures = Vec::new();
        let mut cancelled = false;
        let mut aborted = None;
        for task in tasks {
            match task.await {
                Ok(WorkerOutcome::Completed {
                    output: part,
                    failures: part_failures,
                }) => {
                    output.merge(part);
                    failures.extend(part_failures);
                }
                Ok(WorkerOutcome::Cancelled) => cancelled = true,
                Err(e) => {
                    let abort = WorkerAborted {
                        run_id: self.run_id,
                        reason: &e.to_string(),
                    };
                    abort.log();
                    aborted = Some(abort.to_string());
                }
            }
        }

        let mut state = lock(&self.shared);
        if let Some(message) = aborted {
            // A crashed worker is reported whether or not the run is still current.
            state.messages.push(RuntimeMessage::error(message));
            RunSuperseded {
                run_id: self.run_id,
                current_run_id: state.generation,
            }
            .log();
            self.emit(RunEvent::Superseded {
                run_id: self.run_id,
            });
            return;
        }
        if cancelled || state.generation != self.run_id {
            let current_run_id = state.generation;
            if cancelled {
                RunSuperseded {
                    run_id: self.run_id,
                    current_run_id,
                }
                .log();
            } else {
                PublishRejected {
                    run_id: self.run_id,
                    current_run_id,
                }
                .log();
            }
            self.emit(RunEvent::Superseded {
                run_id: self.run_id,
            });
            return;
        }

        if reported < 1.0 {
            self.emit(RunEvent::Progress {
                run_id: self.run_id,
                fraction: 1.0,
            });
        }

        let item_count = output.count();
        let failure_count = failures.len();
        if failure_count > 0 && failure_count == item_count {
            state.messages.push(RuntimeMessage::error(format!(
                "All {} items failed to convert with kit {}",
                item_count, self.kit_name
            )));
        } else if failure_count > 0 {
            state.messages.push(RuntimeMessage::warning(format!(
                "{} of {} items failed to convert with kit {}",
                failure_count, item_count, self.kit_name
            )));
        }

        let report = Arc::new(RunReport {
            run_id: self.run_id,
            kit_name: self.kit_name.clone(),
            output,
            failures,
            duration: self.started.elapsed(),
        });
        RunCompleted {
            run_id: self.run_id,
            item_count,
            failure_count,
            duration: report.duration,
        }
        .log();
        state.published = Some(report.clone());
        // Sent under the lock so hosts see completions in generation order.
        self.emit(RunEvent::Done {
            run_id: self.run_id,
            report,
        });
    }

    fn fraction(&self, completed: usize) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (completed as f64 / self.total as f64).min(1.0)
        }
    }

    fn emit(&self, event: RunEvent<O>) {
        // The host may have dropped its receiver.
        let _ = self.events.send(event);
    }
}
