// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outbox delivery: writes each signed document into a directory that a
// downstream transport picks up.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use courier_core::error::{CourierError, Result};
use courier_core::types::Document;
use courier_pipeline::Sender;
use courier_security::{fingerprint, verify_fingerprint};
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

/// Extension appended to delivered documents.
pub const SIGNED_EXTENSION: &str = "signed";

/// Prefix of the staging files that live in the outbox while a write is in
/// progress. Downstream transports must skip them.
pub const STAGING_PREFIX: &str = ".courier-";

/// Delivers documents as `<outbox>/<name>.signed`.
///
/// Content is staged in a temporary file inside the outbox, read back and
/// checked against the SHA-256 of the document, and only then published under
/// its final name. Publishing never overwrites: a document that already sits
/// in the outbox makes the delivery fail. A failed write leaves nothing
/// behind, so the same document can be resent.
#[derive(Debug, Clone)]
pub struct OutboxSender {
    dir: PathBuf,
}

impl OutboxSender {
    /// Use `dir` as the outbox, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `name` lands. Only the final path component of `name` is used.
    pub fn target_for(&self, name: &str) -> Option<PathBuf> {
        let file_name = Path::new(name).file_name()?;
        let mut target = file_name.to_os_string();
        target.push(".");
        target.push(SIGNED_EXTENSION);
        Some(self.dir.join(target))
    }

    /// Stage a file with `write`, verify it holds bytes hashing to
    /// `expected_sha256`, then publish it at `target`.
    ///
    /// The staging file is removed on every failure path when it drops.
    fn publish<F>(&self, target: &Path, expected_sha256: &str, write: F) -> Result<()>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(".partial")
            .tempfile_in(&self.dir)
            .map_err(|e| {
                CourierError::Delivery(format!("cannot stage {}: {e}", target.display()))
            })?;

        write(staged.as_file_mut())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| {
                CourierError::Delivery(format!("cannot write {}: {e}", target.display()))
            })?;

        let landed = std::fs::read(staged.path()).map_err(|e| {
            CourierError::Delivery(format!("cannot read back {}: {e}", target.display()))
        })?;
        if let Err(e) = verify_fingerprint(&landed, expected_sha256) {
            warn!(path = %target.display(), error = %e, "staged copy is corrupt");
            return Err(e);
        }

        persist(staged, target)
    }
}

fn persist(staged: NamedTempFile, target: &Path) -> Result<()> {
    staged
        .persist_noclobber(target)
        .map(drop)
        .map_err(|e| {
            CourierError::Delivery(format!("cannot create {}: {}", target.display(), e.error))
        })
}

impl Sender for OutboxSender {
    #[instrument(skip_all, fields(document = document.name()))]
    fn send(&self, document: &Document) -> Result<()> {
        let target = self.target_for(document.name()).ok_or_else(|| {
            CourierError::Delivery(format!("'{}' is not a usable file name", document.name()))
        })?;

        let sha256 = fingerprint(document.content());
        self.publish(&target, &sha256, |out| out.write_all(document.content()))?;

        info!(path = %target.display(), sha256 = %sha256, "document delivered");
        Ok(())
    }
}
