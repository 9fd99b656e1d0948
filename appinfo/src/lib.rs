// SPDX-License-Identifier: MIT
//! # appinfo
//!
//! Reader for `appcache/appinfo.vdf`, the Steam client's cache of per-app
//! metadata, plus a writer for producing fixtures.
//!
//! ## Format Overview
//!
//! The file is a length-prefixed sequence of records. Each record carries a
//! fixed header and an embedded binary KeyValues (KV1) document holding the
//! app's metadata tree (`common`, `extended`, `config`, ...).
//!
//! ```text
//! appinfo.vdf, revision 28 (all integers little-endian)
//! =====================================================
//!
//! Header (8 bytes):
//! - Magic: 0x07564428 (4 bytes)
//! - Universe (4 bytes)
//!
//! Repeated until an app id of 0:
//! - App id (4 bytes)
//! - Record header (64 bytes):
//!   - Size (4 bytes): bytes following this field, payload included
//!   - Info state (4 bytes)
//!   - Last updated, unix seconds (4 bytes)
//!   - PICS access token (8 bytes)
//!   - SHA-1 of the text record (20 bytes)
//!   - Change number (4 bytes)
//!   - SHA-1 of the binary payload (20 bytes)
//! - Payload: binary KV1, `size - 60` bytes
//!
//! Terminator:
//! - App id 0 (4 bytes)
//! ```
//!
//! Any other magic (older revisions, or the string-table revision 29) is
//! rejected.
//!
//! ## Failure Policy
//!
//! Framing problems (bad magic, short reads, impossible sizes) are fatal,
//! since nothing after them can be located. A payload that fails to decode
//! only drops that app: it is logged, listed in
//! [`Container::failed_ids`], and parsing continues with the next record.
//!
//! ## Usage
//!
//! ```rust
//! use appinfo::keyvalues::{Document, Node};
//! use appinfo::{parse_slice, ContainerWriter};
//!
//! let doc = Document::new(
//!     "appinfo",
//!     Node::object([("common", Node::object([("type", Node::leaf("Game"))]))]),
//! );
//!
//! let mut writer = ContainerWriter::new();
//! writer.add_document(440, &doc).unwrap();
//! let data = writer.finalize();
//!
//! let container = parse_slice(&data).unwrap();
//! let entry = container.get(440).unwrap();
//! assert_eq!(entry.document["common"]["type"].as_str(), Some("Game"));
//! assert!(entry.document["common"]["missing"]["deeper"].is_missing());
//! ```

pub mod container;
pub mod format;
pub mod keyvalues;
pub mod reader;
pub mod writer;

// Re-export main types
pub use container::{AppEntry, Container};
pub use format::{ContainerHeader, Digest, RecordHeader};
pub use format::{APPINFO_MAGIC, RECORD_HEADER_SIZE};
pub use keyvalues::{Document, KeyValuesError, Node};
pub use reader::{parse, parse_file, parse_slice, ContainerReader, FormatError};
pub use writer::{ContainerWriter, RecordMeta, WriteError};
