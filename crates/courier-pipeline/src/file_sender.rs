// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The submission pipeline: recognize -> validate -> sign -> send, one outcome
// per file.
//
// Stages are chained with `and_then`, so once a stage fails the remaining
// ones never run and the failure flows straight into the file's `Outcome`.
// Nothing here raises for per-file problems; `send_all` only returns `Err`
// when the worker pool itself breaks down.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use courier_core::clock::Clock;
use courier_core::config::{PipelineConfig, ValidationPolicy};
use courier_core::error::{CourierError, Result};
use courier_core::stage::{ResultExt, Stage};
use courier_core::types::{BatchId, BatchSummary, Document, Outcome, RawFile, SigningCredential};
use tokio::sync::Semaphore;
use tracing::{Span, debug, field, info, instrument, warn};

use crate::capabilities::{Cryptographer, Recognizer, Sender};
use crate::validation;

/// Runs files through the four stages using host-supplied capabilities.
///
/// Cloning is cheap (every capability sits behind an `Arc`), which is how
/// `send_all` hands the pipeline to its workers.
#[derive(Clone)]
pub struct FileSender {
    recognizer: Arc<dyn Recognizer>,
    cryptographer: Arc<dyn Cryptographer>,
    sender: Arc<dyn Sender>,
    clock: Arc<dyn Clock>,
    config: Arc<PipelineConfig>,
    policy: Arc<ValidationPolicy>,
}

impl FileSender {
    /// Build a pipeline with the default configuration.
    pub fn new(
        recognizer: Arc<dyn Recognizer>,
        cryptographer: Arc<dyn Cryptographer>,
        sender: Arc<dyn Sender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let config = PipelineConfig::default();
        Self {
            recognizer,
            cryptographer,
            sender,
            clock,
            policy: Arc::new(config.validation_policy()),
            config: Arc::new(config),
        }
    }

    /// Replace the configuration (allow-list, age window, parallelism).
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.policy = Arc::new(config.validation_policy());
        self.config = Arc::new(config);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Recognize, validate and sign `file` without sending it.
    ///
    /// On success the returned document carries the signed content; name,
    /// format and creation time are exactly what recognition produced.
    pub fn prepare_document(
        &self,
        file: &RawFile,
        credential: &SigningCredential,
    ) -> Result<Document> {
        self.recognize(file)
            .and_then(|document| self.validate(document))
            .and_then(|document| self.sign(document, credential))
    }

    /// Run the full pipeline for one file and report its outcome.
    ///
    /// A capability that panics is treated as a defect of this file only: the
    /// panic is caught and recorded in the outcome.
    #[instrument(skip_all, fields(file = %file.name))]
    pub fn prepare(&self, file: RawFile, credential: &SigningCredential) -> Outcome {
        if self.config.verbose {
            info!(bytes = file.content.len(), "processing file");
        } else {
            debug!(bytes = file.content.len(), "processing file");
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.prepare_document(&file, credential)
                .and_then(|document| self.send(&document))
        }))
        .unwrap_or_else(|payload| {
            Err(CourierError::CapabilityDefect(panic_message(payload.as_ref())))
        });

        match &result {
            Ok(()) => debug!("file delivered"),
            Err(err) => match Stage::of(err) {
                Some(stage) => warn!(%stage, error = %err, "file rejected"),
                None => warn!(error = %err, "file rejected"),
            },
        }
        result.into_outcome(file)
    }

    /// Run every file through the pipeline and return the outcomes in input
    /// order.
    ///
    /// Files are processed on blocking worker threads, at most
    /// `max_parallel_files` at a time. One file failing never affects another;
    /// the call returns only once every file has an outcome.
    #[instrument(skip_all, fields(batch = field::Empty, files = files.len()))]
    pub async fn send_all(
        &self,
        files: Vec<RawFile>,
        credential: &SigningCredential,
    ) -> Result<Vec<Outcome>> {
        let batch = BatchId::new();
        Span::current().record("batch", field::display(batch));

        let slots = Arc::new(Semaphore::new(self.config.parallelism()));
        let mut workers = Vec::with_capacity(files.len());

        for file in files {
            let permit = Arc::clone(&slots)
                .acquire_owned()
                .await
                .map_err(|e| CourierError::Orchestration(format!("worker pool closed: {e}")))?;
            let pipeline = self.clone();
            let credential = credential.clone();
            let span = Span::current();

            workers.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                span.in_scope(|| pipeline.prepare(file, &credential))
            }));
        }

        // Joining in spawn order keeps outcome i paired with input i no
        // matter which worker finishes first.
        let mut outcomes = Vec::with_capacity(workers.len());
        for (index, worker) in workers.into_iter().enumerate() {
            let outcome = worker.await.map_err(|e| {
                CourierError::Orchestration(format!("worker for file #{index} did not finish: {e}"))
            })?;
            outcomes.push(outcome);
        }

        log_summary(&outcomes);
        Ok(outcomes)
    }

    /// Sequential equivalent of [`FileSender::send_all`].
    pub fn send_each(&self, files: Vec<RawFile>, credential: &SigningCredential) -> Vec<Outcome> {
        let outcomes: Vec<Outcome> = files
            .into_iter()
            .map(|file| self.prepare(file, credential))
            .collect();
        log_summary(&outcomes);
        outcomes
    }

    // -- Stages ---------------------------------------------------------------

    fn recognize(&self, file: &RawFile) -> Result<Document> {
        let document = self.recognizer.recognize(file).at_stage(Stage::Recognize)?;
        debug!(format = document.format(), created = %document.created(), "recognized");
        Ok(document)
    }

    fn validate(&self, document: Document) -> Result<Document> {
        validation::validate(document, self.clock.now(), &self.policy).at_stage(Stage::Validate)
    }

    fn sign(&self, document: Document, credential: &SigningCredential) -> Result<Document> {
        let signed = self
            .cryptographer
            .sign(document.content(), credential)
            .at_stage(Stage::Sign)?;
        debug!(credential = credential.label(), bytes = signed.len(), "signed");
        Ok(document.with_content(signed))
    }

    fn send(&self, document: &Document) -> Result<()> {
        self.sender.send(document).at_stage(Stage::Send)
    }
}

fn log_summary(outcomes: &[Outcome]) {
    let summary = BatchSummary::from_outcomes(outcomes);
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("capability panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("capability panicked: {msg}")
    } else {
        "capability panicked".to_owned()
    }
}
