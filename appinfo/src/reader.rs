// SPDX-License-Identifier: MIT
//! Streaming appinfo.vdf reader
//!
//! Reads the container strictly front to back: header, then
//! `(app id, record header, payload)` triples until the zero id. Only one
//! payload buffer is alive at a time.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::container::{AppEntry, Container};
use crate::format::{
    ContainerHeader, RecordHeader, CONTAINER_HEADER_SIZE, END_OF_CONTAINER, RECORD_HEADER_SIZE,
};
use crate::keyvalues;

/// Upper bound for a single record payload
pub const MAX_PAYLOAD_LEN: u32 = 64 * 1024 * 1024;

/// Errors that make the rest of the container unreadable
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("bad magic: unsupported appinfo revision 0x{found:08x}")]
    BadMagic { found: u32 },

    #[error("invalid payload length for app {app_id}: record size {size}")]
    InvalidPayloadLength { app_id: u32, size: u32 },

    #[error("truncated stream while reading {context}")]
    Truncated { context: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reader for appinfo containers
pub struct ContainerReader<R> {
    reader: R,
    /// Bytes left in the stream, when the total length is known
    remaining: Option<u64>,
}

impl<R: Read> ContainerReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            remaining: None,
        }
    }

    /// Declare the total stream length so oversized payload lengths are
    /// rejected before any allocation
    pub fn with_len_hint(mut self, len: u64) -> Self {
        self.remaining = Some(len);
        self
    }

    /// Parse the whole container
    pub fn parse(mut self) -> Result<Container, FormatError> {
        let header = self.read_container_header()?;
        let mut container = Container::new(header);

        let mut app_id = self.read_app_id()?;
        if app_id == END_OF_CONTAINER {
            debug!("appinfo container is empty");
            return Ok(container);
        }

        let mut payload = Vec::new();
        loop {
            let record = self.read_record_header()?;
            let len = self.payload_len(app_id, &record)?;

            payload.clear();
            payload.resize(len, 0);
            self.read_exact(&mut payload, "record payload")?;

            match keyvalues::from_bytes(&payload) {
                Ok(_) if container.contains(app_id) => {
                    warn!(app_id, "Duplicate app info record, keeping the first");
                    container.record_failure(app_id);
                }
                Ok(document) => container.insert(AppEntry {
                    id: app_id,
                    header: record,
                    document,
                }),
                Err(e) => {
                    warn!(app_id, error = %e, "Failed to parse app info");
                    container.record_failure(app_id);
                }
            }

            app_id = self.read_app_id()?;
            if app_id == END_OF_CONTAINER {
                break;
            }
        }

        debug!(
            entries = container.len(),
            failed = container.failed_ids().len(),
            "appinfo container parsed"
        );
        Ok(container)
    }

    fn read_container_header(&mut self) -> Result<ContainerHeader, FormatError> {
        let mut bytes = [0u8; CONTAINER_HEADER_SIZE];
        self.read_exact(&mut bytes, "container header")?;

        let header = ContainerHeader::from_bytes(&bytes);
        if !header.is_supported() {
            return Err(FormatError::BadMagic {
                found: header.magic,
            });
        }
        Ok(header)
    }

    fn read_app_id(&mut self) -> Result<u32, FormatError> {
        let mut bytes = [0u8; 4];
        self.read_exact(&mut bytes, "app id")?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_record_header(&mut self) -> Result<RecordHeader, FormatError> {
        let mut bytes = [0u8; RECORD_HEADER_SIZE];
        self.read_exact(&mut bytes, "record header")?;
        Ok(RecordHeader::from_bytes(&bytes))
    }

    fn payload_len(&self, app_id: u32, record: &RecordHeader) -> Result<usize, FormatError> {
        let invalid = FormatError::InvalidPayloadLength {
            app_id,
            size: record.size,
        };

        let len = match record.payload_len() {
            Some(len) if len <= MAX_PAYLOAD_LEN => len,
            _ => return Err(invalid),
        };
        if self.remaining.is_some_and(|left| u64::from(len) > left) {
            return Err(invalid);
        }
        Ok(len as usize)
    }

    fn read_exact(&mut self, buf: &mut [u8], context: &'static str) -> Result<(), FormatError> {
        self.reader.read_exact(buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => FormatError::Truncated { context },
            _ => FormatError::Io(e),
        })?;
        if let Some(left) = self.remaining.as_mut() {
            *left = left.saturating_sub(buf.len() as u64);
        }
        Ok(())
    }
}

/// Parse a container from any reader
pub fn parse<R: Read>(reader: R) -> Result<Container, FormatError> {
    ContainerReader::new(reader).parse()
}

/// Parse a container from a byte slice
pub fn parse_slice(data: &[u8]) -> Result<Container, FormatError> {
    ContainerReader::new(data)
        .with_len_hint(data.len() as u64)
        .parse()
}

/// Open and parse a container file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Container, FormatError> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    ContainerReader::new(BufReader::new(file))
        .with_len_hint(len)
        .parse()
}
