// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the single-file and batch paths of the pipeline.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use courier_core::error::Result;
use courier_core::{Document, FixedClock, PipelineConfig, RawFile, SigningCredential};
use courier_pipeline::{Cryptographer, FileSender, Recognizer, Sender};

// ---------------------------------------------------------------------------
// Trivial capabilities so the numbers measure pipeline overhead only
// ---------------------------------------------------------------------------

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

struct StampRecognizer;

impl Recognizer for StampRecognizer {
    fn recognize(&self, file: &RawFile) -> Result<Document> {
        Ok(Document::new(
            file.name.clone(),
            file.content.clone(),
            reference_time(),
            "4.0",
        ))
    }
}

struct XorCryptographer;

impl Cryptographer for XorCryptographer {
    fn sign(&self, content: &[u8], credential: &SigningCredential) -> Result<Vec<u8>> {
        let key = credential.material();
        Ok(content
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ key[i % key.len()])
            .collect())
    }
}

struct NullSender;

impl Sender for NullSender {
    fn send(&self, document: &Document) -> Result<()> {
        black_box(document.content());
        Ok(())
    }
}

fn pipeline() -> FileSender {
    FileSender::new(
        Arc::new(StampRecognizer),
        Arc::new(XorCryptographer),
        Arc::new(NullSender),
        Arc::new(FixedClock(reference_time())),
    )
    .with_config(PipelineConfig {
        max_parallel_files: 8,
        ..PipelineConfig::default()
    })
}

fn files(count: usize) -> Vec<RawFile> {
    (0..count)
        .map(|i| RawFile::new(format!("doc-{i}.xml"), vec![0x5Au8; 16 * 1024]))
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// One 16 KiB file through all four stages.
fn bench_prepare_single(c: &mut Criterion) {
    let sender = pipeline();
    let credential = SigningCredential::new("bench", vec![0x11, 0x22, 0x33]);
    let file = files(1).remove(0);

    c.bench_function("prepare (16 KiB)", |b| {
        b.iter(|| black_box(sender.prepare(file.clone(), &credential)));
    });
}

/// Batches of 16 KiB files on the blocking worker pool.
fn bench_send_all(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let sender = pipeline();
    let credential = SigningCredential::new("bench", vec![0x11, 0x22, 0x33]);

    let mut group = c.benchmark_group("send_all");
    for count in [1usize, 16, 128] {
        let batch = files(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &batch, |b, batch| {
            b.iter(|| {
                let outcomes = runtime
                    .block_on(sender.send_all(batch.clone(), &credential))
                    .expect("batch failed");
                assert_eq!(outcomes.len(), batch.len());
                black_box(outcomes);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prepare_single, bench_send_all);
criterion_main!(benches);
