//! Candidate types for handwriting recognition results.
//!
//! This module provides:
//! - `Candidate`: A single suggestion from the recognizer
//! - `CandidateBatch`: The fixed nine-entry form sent to a slot renderer
//!
//! A batch always carries `BATCH_LEN` entries: up to `MAX_CANDIDATES` real
//! candidates followed by empty entries, so index 8 is always the empty
//! sentinel. Themes rely on that trailing entry to stop reading; without it
//! the eighth cell renders leftovers from an earlier batch.

use crate::renderer::Message;
use serde::{Deserialize, Serialize};

/// Most candidates ever shown for one recognition cycle.
pub const MAX_CANDIDATES: usize = 8;

/// Entries per packaged batch, sentinel included.
pub const BATCH_LEN: usize = MAX_CANDIDATES + 1;

/// A single recognizer suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
}

impl Candidate {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Candidate { text: text.into() }
    }

    /// First Unicode scalar of the text, 0 when there is none.
    pub fn code_point(&self) -> u32 {
        leading_code_point(self.text.as_bytes())
    }
}

/// Decode the first UTF-8 scalar value of `bytes`.
///
/// Returns 0 for empty input or when the leading bytes are not valid UTF-8.
pub fn leading_code_point(bytes: &[u8]) -> u32 {
    bytes
        .utf8_chunks()
        .next()
        .and_then(|chunk| chunk.valid().chars().next())
        .map_or(0, u32::from)
}

/// Candidates packaged for a renderer: parallel text and code point rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBatch {
    texts: [String; BATCH_LEN],
    code_points: [u32; BATCH_LEN],
    len: usize,
}

impl CandidateBatch {
    /// Package the first `MAX_CANDIDATES` candidates.
    ///
    /// Returns `None` for an empty list: nothing is sent, so the renderer
    /// keeps showing the previous batch.
    pub fn pack(candidates: &[Candidate]) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }

        let mut texts: [String; BATCH_LEN] = std::array::from_fn(|_| String::new());
        let mut code_points = [0u32; BATCH_LEN];
        let len = candidates.len().min(MAX_CANDIDATES);

        for (i, candidate) in candidates.iter().take(len).enumerate() {
            texts[i] = candidate.text.clone();
            code_points[i] = candidate.code_point();
        }

        Some(Self {
            texts,
            code_points,
            len,
        })
    }

    /// Number of real candidates, sentinel excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn texts(&self) -> &[String; BATCH_LEN] {
        &self.texts
    }

    pub fn code_points(&self) -> &[u32; BATCH_LEN] {
        &self.code_points
    }

    /// The two wire messages, text row first. Receivers pair them by index.
    pub fn into_messages(self) -> (Message, Message) {
        let ints = self
            .code_points
            .iter()
            .map(|&cp| i32::try_from(cp).unwrap_or(0))
            .collect();
        (
            Message::StringSet(self.texts.into_iter().collect()),
            Message::IntSet(ints),
        )
    }
}
