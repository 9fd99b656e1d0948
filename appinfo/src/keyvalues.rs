// SPDX-License-Identifier: MIT
//! Binary KeyValues (KV1) documents
//!
//! Every appinfo record carries its metadata as a binary KV1 tree. This
//! module holds the tree model, the decoder, and an encoder for the subset
//! of the format the decoder produces (objects and strings).
//!
//! ## Wire format
//!
//! ```text
//! entry   := type:u8 key:cstr value
//! object  := entry* (END | ALT_END)
//! value   := object          (type 0x00)
//!          | cstr            (type 0x01)
//!          | i32 | f32 | ptr | color   (0x02, 0x03, 0x04, 0x06)
//!          | u64 | i64       (0x07, 0x0A)
//! ```
//!
//! Numbers are little-endian. Numeric values are kept as their decimal
//! rendering so every leaf is a string.

use std::ops::Index;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Maximum object nesting accepted by the decoder
pub const MAX_DEPTH: usize = 64;

/// Value type tags
pub mod tags {
    pub const OBJECT: u8 = 0x00;
    pub const STRING: u8 = 0x01;
    pub const INT32: u8 = 0x02;
    pub const FLOAT32: u8 = 0x03;
    pub const POINTER: u8 = 0x04;
    pub const WIDE_STRING: u8 = 0x05;
    pub const COLOR: u8 = 0x06;
    pub const UINT64: u8 = 0x07;
    pub const END: u8 = 0x08;
    pub const INT64: u8 = 0x0A;
    pub const ALT_END: u8 = 0x0B;
}

/// Errors raised while decoding a KV1 payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyValuesError {
    #[error("unexpected end of data at offset {0}")]
    UnexpectedEof(usize),

    #[error("unknown value type 0x{tag:02x} at offset {offset}")]
    UnknownType { tag: u8, offset: usize },

    #[error("wide string values are not supported (key {0:?})")]
    WideString(String),

    #[error("invalid UTF-8 in string at offset {0}")]
    InvalidUtf8(usize),

    #[error("document root is not an object")]
    RootNotObject,

    #[error("document is empty")]
    Empty,

    #[error("nesting deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

/// One node of a KeyValues tree
///
/// Lookups never fail: indexing a missing key (or indexing into a leaf)
/// yields [`Node::Missing`], so paths can be chained freely and checked once
/// at the end.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(String),
    Object(Vec<(String, Node)>),
    Missing,
}

static MISSING: Node = Node::Missing;

impl Node {
    /// Build an object node from `(key, node)` pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn leaf(value: impl Into<String>) -> Self {
        Node::Leaf(value.into())
    }

    /// First child whose key matches `key` (ASCII case-insensitive)
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(children) => children
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follow a path of keys
    pub fn path<'a, I>(&self, keys: I) -> &Node
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().fold(self, |node, key| &node[key])
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing)
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            _ => None,
        }
    }

    pub fn children(&self) -> &[(String, Node)] {
        match self {
            Node::Object(children) => children,
            _ => &[],
        }
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.get(key).unwrap_or(&MISSING)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(value) => serializer.serialize_str(value),
            Node::Object(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, value) in children {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::Missing => serializer.serialize_none(),
        }
    }
}

/// A decoded record document: the named root object of a payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub root: Node,
}

impl Document {
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }
}

impl Index<&str> for Document {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        &self.root[key]
    }
}

/// Decode a binary KV1 payload
///
/// The first top-level entry must be an object; it becomes the document.
/// Anything after that object (normally a single end tag) is ignored.
pub fn from_bytes(bytes: &[u8]) -> Result<Document, KeyValuesError> {
    let mut decoder = Decoder { bytes, pos: 0 };

    let tag = decoder.read_u8()?;
    match tag {
        tags::END | tags::ALT_END => Err(KeyValuesError::Empty),
        tags::OBJECT => {
            let name = decoder.read_cstr()?;
            let root = decoder.read_object(1)?;
            Ok(Document { name, root })
        }
        _ => Err(KeyValuesError::RootNotObject),
    }
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], KeyValuesError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(KeyValuesError::UnexpectedEof(self.pos))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, KeyValuesError> {
        Ok(self.take(1)?[0])
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], KeyValuesError> {
        let mut raw = [0u8; N];
        raw.copy_from_slice(self.take(N)?);
        Ok(raw)
    }

    fn read_cstr(&mut self) -> Result<String, KeyValuesError> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(KeyValuesError::UnexpectedEof(self.bytes.len()))?;
        let text = std::str::from_utf8(&rest[..len])
            .map_err(|_| KeyValuesError::InvalidUtf8(start))?
            .to_owned();
        self.pos = start + len + 1;
        Ok(text)
    }

    fn read_object(&mut self, depth: usize) -> Result<Node, KeyValuesError> {
        if depth > MAX_DEPTH {
            return Err(KeyValuesError::TooDeep);
        }

        let mut children = Vec::new();
        loop {
            let offset = self.pos;
            let tag = self.read_u8()?;
            if tag == tags::END || tag == tags::ALT_END {
                return Ok(Node::Object(children));
            }

            let key = self.read_cstr()?;
            let value = match tag {
                tags::OBJECT => self.read_object(depth + 1)?,
                tags::STRING => Node::Leaf(self.read_cstr()?),
                tags::INT32 | tags::POINTER | tags::COLOR => {
                    Node::Leaf(i32::from_le_bytes(self.read_array()?).to_string())
                }
                tags::FLOAT32 => Node::Leaf(f32::from_le_bytes(self.read_array()?).to_string()),
                tags::UINT64 => Node::Leaf(u64::from_le_bytes(self.read_array()?).to_string()),
                tags::INT64 => Node::Leaf(i64::from_le_bytes(self.read_array()?).to_string()),
                tags::WIDE_STRING => return Err(KeyValuesError::WideString(key)),
                _ => return Err(KeyValuesError::UnknownType { tag, offset }),
            };
            children.push((key, value));
        }
    }
}

/// Encode a document as binary KV1
///
/// Leaves are written as strings and missing nodes are dropped. The root
/// object is followed by an outer end tag, as in appinfo payloads.
pub fn to_bytes(document: &Document) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    out.push(tags::OBJECT);
    write_cstr(&mut out, &document.name);
    write_object(&mut out, document.root.children());
    out.push(tags::END);
    out
}

fn write_object(out: &mut Vec<u8>, children: &[(String, Node)]) {
    for (key, value) in children {
        match value {
            Node::Object(grandchildren) => {
                out.push(tags::OBJECT);
                write_cstr(out, key);
                write_object(out, grandchildren);
            }
            Node::Leaf(text) => {
                out.push(tags::STRING);
                write_cstr(out, key);
                write_cstr(out, text);
            }
            Node::Missing => {}
        }
    }
    out.push(tags::END);
}

fn write_cstr(out: &mut Vec<u8>, text: &str) {
    out.extend_from_slice(text.as_bytes());
    out.push(0);
}
