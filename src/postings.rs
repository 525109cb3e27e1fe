// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding for the postings stream: a tightly packed sequence of
//! fixed-size `(doc_id: u32, tf: u32)` pairs, little-endian, no framing.

use crate::error::EngineError;
use crate::types::{DocId, PostingEntry};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Byte width of a single posting entry on disk.
pub const ENTRY_SIZE: usize = 8;

/// Appends `entries` to `writer` and returns the number of bytes written.
pub fn encode_postings<W: Write>(writer: &mut W, entries: &[PostingEntry]) -> io::Result<u64> {
    let mut buf = Vec::with_capacity(entries.len() * ENTRY_SIZE);
    for entry in entries {
        buf.extend_from_slice(&entry.doc_id.get().to_le_bytes());
        buf.extend_from_slice(&entry.tf.to_le_bytes());
    }
    writer.write_all(&buf)?;
    Ok(buf.len() as u64)
}

/// Decodes `length` entries starting at `offset` in a random-access reader.
pub fn read_postings<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    length: u32,
) -> Result<Vec<PostingEntry>, EngineError> {
    reader.seek(SeekFrom::Start(offset))?;
    let expected = length as usize * ENTRY_SIZE;
    let mut buf = vec![0u8; expected];
    let got = read_as_much_as_possible(reader, &mut buf)?;
    if got != expected {
        return Err(EngineError::IncompletePostingRead {
            offset,
            expected,
            got,
        });
    }
    Ok(decode_entries(&buf))
}

fn read_as_much_as_possible<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

fn decode_entries(buf: &[u8]) -> Vec<PostingEntry> {
    buf.chunks_exact(ENTRY_SIZE)
        .map(|chunk| {
            let doc_id = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
            let tf = u32::from_le_bytes(chunk[4..8].try_into().unwrap());
            PostingEntry {
                doc_id: DocId::new(doc_id),
                tf,
            }
        })
        .collect()
}
