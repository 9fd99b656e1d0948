// SPDX-License-Identifier: MIT
//! appinfo.vdf framing
//!
//! Fixed-size structures that frame the container: the 8-byte file header
//! and the 64-byte header in front of every application record.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Magic number of the only supported container revision (v28)
pub const APPINFO_MAGIC: u32 = 0x0756_4428;

/// Container header size in bytes
pub const CONTAINER_HEADER_SIZE: usize = 8;

/// Record header size in bytes
pub const RECORD_HEADER_SIZE: usize = 64;

/// Bytes of the record header that the `size` field itself does not count
///
/// `size` covers everything after it, so a record's payload length is
/// `size - SIZE_FIELD_COVERAGE`.
pub const SIZE_FIELD_COVERAGE: u32 = (RECORD_HEADER_SIZE - 4) as u32;

/// Width of a SHA-1 digest stored in a record header
pub const DIGEST_SIZE: usize = 20;

/// The id value that terminates the record list
pub const END_OF_CONTAINER: u32 = 0;

/// Container header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    /// Format magic, must equal [`APPINFO_MAGIC`]
    pub magic: u32,

    /// Steam universe the cache was written for (1 = public)
    pub universe: u32,
}

impl ContainerHeader {
    pub fn new(universe: u32) -> Self {
        Self {
            magic: APPINFO_MAGIC,
            universe,
        }
    }

    pub fn from_bytes(bytes: &[u8; CONTAINER_HEADER_SIZE]) -> Self {
        Self {
            magic: le_u32(bytes, 0),
            universe: le_u32(bytes, 4),
        }
    }

    /// Whether the magic matches the supported revision
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.magic == APPINFO_MAGIC
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        writer.write_all(&self.magic.to_le_bytes())?;
        writer.write_all(&self.universe.to_le_bytes())
    }
}

/// A 20-byte SHA-1 digest as stored on disk
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest(pub [u8; DIGEST_SIZE]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Per-application record header (64 bytes, little-endian, packed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordHeader {
    /// Byte count of the rest of the header plus the payload
    pub size: u32,

    /// Client-side info state
    pub state: u32,

    /// Last update, unix seconds
    pub last_updated: u32,

    pub access_token: u64,

    /// SHA-1 of the text form of the record
    pub hash: Digest,

    pub change_number: u32,

    /// SHA-1 of the binary payload
    pub data_hash: Digest,
}

impl RecordHeader {
    /// Parse header fields from raw bytes
    pub fn from_bytes(bytes: &[u8; RECORD_HEADER_SIZE]) -> Self {
        Self {
            size: le_u32(bytes, 0),
            state: le_u32(bytes, 4),
            last_updated: le_u32(bytes, 8),
            access_token: le_u64(bytes, 12),
            hash: digest_at(bytes, 20),
            change_number: le_u32(bytes, 40),
            data_hash: digest_at(bytes, 44),
        }
    }

    /// Read a header from a reader
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        let mut bytes = [0u8; RECORD_HEADER_SIZE];
        reader.read_exact(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Payload length announced by `size`, or `None` when `size` is too
    /// small to even cover the fixed header fields
    #[inline]
    pub fn payload_len(&self) -> Option<u32> {
        self.size.checked_sub(SIZE_FIELD_COVERAGE)
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.last_updated), 0)
    }

    pub fn to_bytes(&self) -> [u8; RECORD_HEADER_SIZE] {
        let mut bytes = [0u8; RECORD_HEADER_SIZE];

        bytes[0..4].copy_from_slice(&self.size.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.state.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.last_updated.to_le_bytes());
        bytes[12..20].copy_from_slice(&self.access_token.to_le_bytes());
        bytes[20..40].copy_from_slice(self.hash.as_bytes());
        bytes[40..44].copy_from_slice(&self.change_number.to_le_bytes());
        bytes[44..64].copy_from_slice(self.data_hash.as_bytes());

        bytes
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        writer.write_all(&self.to_bytes())
    }
}

#[inline]
fn le_u32(bytes: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(raw)
}

#[inline]
fn le_u64(bytes: &[u8], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(raw)
}

#[inline]
fn digest_at(bytes: &[u8], at: usize) -> Digest {
    let mut raw = [0u8; DIGEST_SIZE];
    raw.copy_from_slice(&bytes[at..at + DIGEST_SIZE]);
    Digest(raw)
}
