// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Header-line recogniser.
//
// A document starts with one header line followed by its body:
//
//   courier-document format=4.0 created=2026-10-01T09:30:00Z
//   <body bytes...>
//
// Unknown `key=value` pairs in the header are ignored. Everything after the
// first newline is the document content, byte for byte.

use chrono::{DateTime, Utc};
use courier_core::error::{CourierError, Result};
use courier_core::types::{Document, RawFile};
use courier_pipeline::Recognizer;

/// Magic word that opens every header line.
pub const HEADER_MAGIC: &str = "courier-document";

/// Recognises files carrying a `courier-document` header line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderRecognizer;

impl Recognizer for HeaderRecognizer {
    fn recognize(&self, file: &RawFile) -> Result<Document> {
        let bytes = &file.content;
        let (header, body) = match bytes.iter().position(|&b| b == b'\n') {
            Some(end) => (&bytes[..end], &bytes[end + 1..]),
            None => (bytes.as_slice(), &[][..]),
        };
        let header = std::str::from_utf8(header)
            .map_err(|_| reject(file, "header is not UTF-8"))?
            .trim_end_matches('\r');

        let mut tokens = header.split_whitespace();
        if tokens.next() != Some(HEADER_MAGIC) {
            return Err(reject(file, "missing courier-document header"));
        }

        let mut format = None;
        let mut created = None;
        for token in tokens {
            match token.split_once('=') {
                Some(("format", value)) if !value.is_empty() => format = Some(value),
                Some(("created", value)) => {
                    let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
                        reject(file, &format!("bad created timestamp '{value}': {e}"))
                    })?;
                    created = Some(parsed.with_timezone(&Utc));
                }
                _ => {}
            }
        }

        let format = format.ok_or_else(|| reject(file, "header has no format"))?;
        let created = created.ok_or_else(|| reject(file, "header has no created timestamp"))?;
        Ok(Document::new(file.name.clone(), body.to_vec(), created, format))
    }
}

fn reject(file: &RawFile, reason: &str) -> CourierError {
    CourierError::Recognition(format!("{}: {reason}", file.name))
}
