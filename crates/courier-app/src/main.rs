// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Courier: batch document submission from the command line.
//
// Entry point. Initialises logging, loads settings and the signing key, wires
// the host capabilities into the pipeline and submits every file given on the
// command line.

mod adapters;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use courier_core::config::DEFAULT_CONFIG_FILE;
use courier_core::error::{CourierError, Result};
use courier_core::{BatchSummary, Outcome, PipelineConfig, RawFile, SigningCredential, SystemClock};
use courier_pipeline::FileSender;
use courier_security::{EcdsaCryptographer, generate_credential, load_credential};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use adapters::{HeaderRecognizer, OutboxSender};

/// Recognise, validate, sign and deliver documents.
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON settings file (defaults are used when it is missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// PKCS#8 DER signing key; an ephemeral key is generated when omitted
    #[arg(short, long)]
    key: Option<PathBuf>,

    /// Directory that receives the signed documents
    #[arg(short, long, default_value = "outbox")]
    outbox: PathBuf,

    /// Log per-file progress
    #[arg(short, long)]
    verbose: bool,

    /// Documents to submit
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Courier starting");

    match run(cli).await {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(summary) => {
            warn!(
                failed = summary.failed,
                total = summary.total,
                "some documents were not delivered"
            );
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "courier failed");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

async fn run(cli: Cli) -> Result<BatchSummary> {
    let mut config = PipelineConfig::load(&cli.config)?;
    config.verbose |= cli.verbose;

    let credential = signing_credential(cli.key.as_deref())?;
    let outbox = OutboxSender::open(&cli.outbox)?;
    info!(
        outbox = %outbox.dir().display(),
        credential = credential.label(),
        files = cli.files.len(),
        "submitting documents"
    );

    let pipeline = FileSender::new(
        Arc::new(HeaderRecognizer),
        Arc::new(EcdsaCryptographer::new()),
        Arc::new(outbox),
        Arc::new(SystemClock),
    )
    .with_config(config);

    // Unreadable inputs already have their outcome; the rest go through the
    // pipeline and are slotted back in command-line order.
    let mut files = Vec::with_capacity(cli.files.len());
    let mut slots = Vec::with_capacity(cli.files.len());
    for input in read_inputs(&cli.files) {
        match input {
            Ok(file) => {
                files.push(file);
                slots.push(None);
            }
            Err(failed) => slots.push(Some(failed)),
        }
    }
    let mut delivered = pipeline.send_all(files, &credential).await?.into_iter();
    let outcomes: Vec<Outcome> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| delivered.next()))
        .collect();

    for outcome in &outcomes {
        report(outcome);
    }
    Ok(BatchSummary::from_outcomes(&outcomes))
}

fn signing_credential(key: Option<&Path>) -> Result<SigningCredential> {
    match key {
        Some(path) => {
            let der = std::fs::read(path).map_err(|e| {
                CourierError::Credential(format!("cannot read key {}: {e}", path.display()))
            })?;
            let label = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "key".to_owned());
            load_credential(&label, der)
        }
        None => {
            warn!("no --key given, signing with an ephemeral key");
            generate_credential("ephemeral")
        }
    }
}

/// Read every input path. A file that cannot be read never reaches the
/// pipeline; it comes back as a failed outcome with an empty payload.
fn read_inputs(paths: &[PathBuf]) -> Vec<std::result::Result<RawFile, Outcome>> {
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            std::fs::read(path)
                .map(|content| RawFile::new(name.clone(), content))
                .map_err(|e| {
                    error!(path = %path.display(), error = %e, "cannot read input");
                    Outcome::failure(
                        RawFile::new(name, Vec::new()),
                        format!("cannot read {}: {e}", path.display()),
                    )
                })
        })
        .collect()
}

fn report(outcome: &Outcome) {
    match &outcome.error {
        None => println!("ok      {}", outcome.file.name),
        Some(reason) => println!("FAILED  {}: {reason}", outcome.file.name),
    }
}
