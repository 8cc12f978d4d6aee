// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental reader of the shared output file

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Printed by the tool when it is ready for the next command
pub const PROMPT_MARKER: &str = "oedacli>";

/// Tails the output file, counting prompt markers as bytes arrive
///
/// Only new bytes are scanned on each refresh. Scanning stops short of a
/// partial marker at the end of the buffer and resumes there once more
/// bytes arrive.
#[derive(Debug)]
pub struct TranscriptTail {
    file: File,
    buf: Vec<u8>,
    scanned: usize,
    markers: Vec<usize>,
}

impl TranscriptTail {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            file: File::open(path)?,
            buf: Vec::new(),
            scanned: 0,
            markers: Vec::new(),
        })
    }

    /// Read whatever the file has gained and count new markers
    pub fn refresh(&mut self) -> io::Result<()> {
        let read = self.file.read_to_end(&mut self.buf)?;
        if read > 0 {
            self.scan();
        }
        Ok(())
    }

    fn scan(&mut self) {
        let marker = PROMPT_MARKER.as_bytes();
        let mut pos = self.scanned;
        while pos + marker.len() <= self.buf.len() {
            if &self.buf[pos..pos + marker.len()] == marker {
                self.markers.push(pos);
                pos += marker.len();
            } else {
                pos += 1;
            }
        }
        self.scanned = pos;
    }

    /// Number of prompts seen so far
    pub fn prompts(&self) -> usize {
        self.markers.len()
    }

    /// Text strictly between prompt `n - 1` and prompt `n` (1-based),
    /// trimmed. The first segment starts at the beginning of the file.
    pub fn segment(&self, n: usize) -> Option<String> {
        let end = *self.markers.get(n.checked_sub(1)?)?;
        let start = match n {
            1 => 0,
            _ => self.markers[n - 2] + PROMPT_MARKER.len(),
        };
        Some(String::from_utf8_lossy(&self.buf[start..end]).trim().to_string())
    }

    /// Everything read so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
