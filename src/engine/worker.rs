// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cancellable conversion pass over a tree.
//!
//! A [`Worker`] is single-use. Its lifecycle maps onto ownership:
//!
//! * **Created** - a `Worker` value, holding the converter handle, the run's
//!   cancellation token and an optional progress sender.
//! * **Running** - inside [`Worker::do_work`], which consumes the worker.
//! * **Completed** / **Cancelled** - the [`WorkerOutcome`] returned.
//!
//! Iteration is sequential: branches in path order, items in branch order.
//! The cancellation token is checked before every item; when it is set the
//! worker drops its partial output and returns [`WorkerOutcome::Cancelled`].
//! An item that fails to convert is replaced by a diagnostic and recorded as
//! an [`ItemFailure`]; the pass carries on.
//!
//! Orchestrators create one prototype worker per run and hand each partition
//! a [`Worker::duplicate`], which shares the converter handle and token but
//! nothing else.

use std::marker::PhantomData;
use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::engine::direction::Conversion;
use crate::engine::handle::ConverterHandle;
use crate::errors::ConversionError;
use crate::model::{Converted, Diagnostic};
use crate::observability::messages::worker::{
    ItemConversionFailed, WorkerCancelled, WorkerCompleted, WorkerStarted,
};
use crate::observability::messages::StructuredLog;
use crate::tree::{Path, Tree};

/// An input item that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: Path,
    /// Position of the item within its branch.
    pub index: usize,
    pub message: String,
}

/// Cumulative count of items a worker has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerProgress {
    pub worker_index: usize,
    pub completed: usize,
}

/// Terminal state of a worker.
#[derive(Debug)]
pub enum WorkerOutcome<O> {
    Completed {
        output: Tree<Converted<O>>,
        failures: Vec<ItemFailure>,
    },
    Cancelled,
}

impl<O> WorkerOutcome<O> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WorkerOutcome::Cancelled)
    }
}

pub struct Worker<C: Conversion> {
    run_id: u64,
    index: usize,
    converter: ConverterHandle,
    cancellation: CancellationToken,
    progress: Option<UnboundedSender<WorkerProgress>>,
    direction: PhantomData<C>,
}

impl<C: Conversion> Worker<C> {
    pub fn new(run_id: u64, converter: ConverterHandle, cancellation: CancellationToken) -> Self {
        Self {
            run_id,
            index: 0,
            converter,
            cancellation,
            progress: None,
            direction: PhantomData,
        }
    }

    /// Report cumulative completion counts on `sender` after every item.
    pub fn with_progress(mut self, sender: UnboundedSender<WorkerProgress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// A fresh worker for the same run, numbered `index`.
    ///
    /// Shares the converter handle, cancellation token and progress channel.
    pub fn duplicate(&self, index: usize) -> Self {
        Self {
            run_id: self.run_id,
            index,
            converter: self.converter.clone(),
            cancellation: self.cancellation.clone(),
            progress: self.progress.clone(),
            direction: PhantomData,
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Converts every branch of `input` whose position lies in `range`.
    ///
    /// Blocking; orchestrators call this from `spawn_blocking`.
    pub fn do_work(
        self,
        input: &Tree<C::Input>,
        range: Range<usize>,
    ) -> WorkerOutcome<C::Output> {
        let branches = input.branches_in(range);
        let start_msg = WorkerStarted {
            run_id: self.run_id,
            worker_index: self.index,
            branch_count: branches.clone().count(),
            item_count: branches.clone().map(|(_, items)| items.len()).sum(),
        };
        let span = start_msg.span("conversion_worker");
        let _guard = span.enter();
        start_msg.log();

        let mut output = Tree::new();
        let mut failures = Vec::new();
        let mut completed = 0;

        for (path, items) in branches {
            output.ensure_branch(path.clone());
            for (index, item) in items.iter().enumerate() {
                if self.cancellation.is_cancelled() {
                    WorkerCancelled {
                        run_id: self.run_id,
                        worker_index: self.index,
                        processed: completed,
                    }
                    .log();
                    return WorkerOutcome::Cancelled;
                }

                let slot = match self.convert_one(item) {
                    Ok(value) => Converted::Value(value),
                    Err(e) => {
                        let message = e.to_string();
                        ItemConversionFailed {
                            run_id: self.run_id,
                            path: &path.to_string(),
                            index,
                            reason: &message,
                        }
                        .log();
                        failures.push(ItemFailure {
                            path: path.clone(),
                            index,
                            message: message.clone(),
                        });
                        Converted::Diagnostic(Diagnostic {
                            source: C::describe(item),
                            message,
                        })
                    }
                };
                output.append(path.clone(), slot);
                completed += 1;
                self.report(completed);
            }
        }

        WorkerCompleted {
            run_id: self.run_id,
            worker_index: self.index,
            converted: completed - failures.len(),
            failed: failures.len(),
        }
        .log();
        WorkerOutcome::Completed { output, failures }
    }

    fn convert_one(&self, item: &C::Input) -> Result<C::Output, ConversionError> {
        let converter = self.converter.current();
        catch_unwind(AssertUnwindSafe(|| C::convert(converter.as_ref(), item))).unwrap_or_else(
            |_| {
                Err(ConversionError::Failed(format!(
                    "converter '{}' panicked",
                    converter.name()
                )))
            },
        )
    }

    fn report(&self, completed: usize) {
        if let Some(sender) = &self.progress {
            // The receiver is gone once the run is abandoned.
            let _ = sender.send(WorkerProgress {
                worker_index: self.index,
                completed,
            });
        }
    }
}
