// SPDX-License-Identifier: MIT
//! appinfo container writer
//!
//! Produces well-formed v28 containers. The Steam client is the only real
//! producer of these files; this writer exists for fixtures, benchmarks and
//! tooling.

use crate::format::{
    ContainerHeader, Digest, RecordHeader, CONTAINER_HEADER_SIZE, END_OF_CONTAINER,
    RECORD_HEADER_SIZE, SIZE_FIELD_COVERAGE,
};
use crate::keyvalues::{self, Document};

/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("app id 0 is reserved for the end-of-container marker")]
    ReservedAppId,

    #[error("payload of {0} bytes does not fit the record size field")]
    PayloadTooLarge(usize),
}

/// Record header fields a caller may set; `size` is always derived
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMeta {
    pub state: u32,
    pub last_updated: u32,
    pub access_token: u64,
    pub hash: Digest,
    pub change_number: u32,
    pub data_hash: Digest,
}

/// Builder for appinfo containers
pub struct ContainerWriter {
    header: ContainerHeader,
    buffer: Vec<u8>,
    records: usize,
}

impl ContainerWriter {
    /// Writer for the public universe
    pub fn new() -> Self {
        Self::with_universe(1)
    }

    pub fn with_universe(universe: u32) -> Self {
        let header = ContainerHeader::new(universe);
        let mut buffer = Vec::with_capacity(CONTAINER_HEADER_SIZE + 4);
        buffer.extend_from_slice(&header.magic.to_le_bytes());
        buffer.extend_from_slice(&header.universe.to_le_bytes());
        Self {
            header,
            buffer,
            records: 0,
        }
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Append a record holding an encoded document
    pub fn add_document(&mut self, app_id: u32, document: &Document) -> Result<(), WriteError> {
        self.add_raw(app_id, keyvalues::to_bytes(document))
    }

    /// Append a record with explicit header metadata
    pub fn add_document_with_meta(
        &mut self,
        app_id: u32,
        document: &Document,
        meta: RecordMeta,
    ) -> Result<(), WriteError> {
        self.add_raw_with_meta(app_id, &keyvalues::to_bytes(document), meta)
    }

    /// Append a record with an arbitrary payload
    ///
    /// The payload is not validated, so corrupt records can be produced on
    /// purpose.
    pub fn add_raw(&mut self, app_id: u32, payload: Vec<u8>) -> Result<(), WriteError> {
        self.add_raw_with_meta(app_id, &payload, RecordMeta::default())
    }

    fn add_raw_with_meta(
        &mut self,
        app_id: u32,
        payload: &[u8],
        meta: RecordMeta,
    ) -> Result<(), WriteError> {
        if app_id == END_OF_CONTAINER {
            return Err(WriteError::ReservedAppId);
        }

        let size = u32::try_from(payload.len())
            .ok()
            .and_then(|len| len.checked_add(SIZE_FIELD_COVERAGE))
            .ok_or(WriteError::PayloadTooLarge(payload.len()))?;

        let record = RecordHeader {
            size,
            state: meta.state,
            last_updated: meta.last_updated,
            access_token: meta.access_token,
            hash: meta.hash,
            change_number: meta.change_number,
            data_hash: meta.data_hash,
        };

        self.buffer.reserve(4 + RECORD_HEADER_SIZE + payload.len());
        self.buffer.extend_from_slice(&app_id.to_le_bytes());
        self.buffer.extend_from_slice(&record.to_bytes());
        self.buffer.extend_from_slice(payload);
        self.records += 1;

        Ok(())
    }

    /// Append the terminator and return the container bytes
    pub fn finalize(mut self) -> Vec<u8> {
        self.buffer.extend_from_slice(&END_OF_CONTAINER.to_le_bytes());
        self.buffer
    }
}

impl Default for ContainerWriter {
    fn default() -> Self {
        Self::new()
    }
}
