//! Table file formats
//!
//! Byte encodings of a table's id → record map.
//!
//! ## Binary Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Header (18 bytes)                                            │
//! │   Magic: "SHLF" (4) | Version: u16 (2) | CRC32: u32 (4)      │
//! │   PayloadLen: u64 (8)                                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Payload (variable)                                           │
//! │   bincode-encoded map                                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//! All integers little-endian. The CRC covers the payload only.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ShelfError;
use crate::record::Records;

/// Magic bytes identifying a ShelfDB binary table file
pub(crate) const BINARY_MAGIC: &[u8; 4] = b"SHLF";

/// Current binary format version
pub(crate) const BINARY_VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + CRC (4) + PayloadLen (8) = 18 bytes
pub(crate) const BINARY_HEADER_SIZE: usize = 18;

/// Encoding used for a table file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Compact JSON
    Json,

    /// JSON indented with tabs
    #[default]
    JsonIndent,

    /// YAML document
    Yaml,

    /// A single BSON document
    Bson,

    /// bincode payload behind a checksummed header
    Binary,
}

impl Format {
    /// File extension for tables stored in this format
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json | Format::JsonIndent => "json",
            Format::Yaml => "yaml",
            Format::Bson => "bson",
            Format::Binary => "shelf",
        }
    }

    /// Encode a full map. Errors carry the codec's message.
    pub fn encode<E: Serialize>(self, records: &Records<E>) -> Result<Vec<u8>, String> {
        match self {
            Format::Json => serde_json::to_vec(records).map_err(|e| e.to_string()),
            Format::JsonIndent => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                records
                    .serialize(&mut serializer)
                    .map_err(|e| e.to_string())?;
                Ok(buf)
            }
            Format::Yaml => serde_yaml::to_string(records)
                .map(String::into_bytes)
                .map_err(|e| e.to_string()),
            Format::Bson => bson::to_vec(records).map_err(|e| e.to_string()),
            Format::Binary => encode_binary(records),
        }
    }

    /// Decode a full map. Zero-length input is the empty map in every format.
    pub fn decode<E: DeserializeOwned>(self, bytes: &[u8]) -> Result<Records<E>, String> {
        if bytes.is_empty() {
            return Ok(Records::new());
        }

        match self {
            Format::Json | Format::JsonIndent => {
                serde_json::from_slice(bytes).map_err(|e| e.to_string())
            }
            Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
            Format::Bson => bson::from_slice(bytes).map_err(|e| e.to_string()),
            Format::Binary => decode_binary(bytes),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::JsonIndent => "json-indent",
            Format::Yaml => "yaml",
            Format::Bson => "bson",
            Format::Binary => "binary",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "json-indent" | "pretty" => Ok(Format::JsonIndent),
            "yaml" | "yml" => Ok(Format::Yaml),
            "bson" => Ok(Format::Bson),
            "binary" | "shelf" => Ok(Format::Binary),
            other => Err(ShelfError::Config(format!("Unknown table format: {}", other))),
        }
    }
}

// =============================================================================
// Binary Framing
// =============================================================================

fn encode_binary<E: Serialize>(records: &Records<E>) -> Result<Vec<u8>, String> {
    let payload = bincode::serialize(records).map_err(|e| e.to_string())?;
    let crc = crc32fast::hash(&payload);

    let mut out = Vec::with_capacity(BINARY_HEADER_SIZE + payload.len());
    out.extend_from_slice(BINARY_MAGIC);
    out.extend_from_slice(&BINARY_VERSION.to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);

    Ok(out)
}

fn decode_binary<E: DeserializeOwned>(bytes: &[u8]) -> Result<Records<E>, String> {
    if bytes.len() < BINARY_HEADER_SIZE {
        return Err(format!(
            "Incomplete header: expected {} bytes, got {}",
            BINARY_HEADER_SIZE,
            bytes.len()
        ));
    }

    if &bytes[0..4] != BINARY_MAGIC {
        return Err(format!(
            "Invalid magic: expected SHLF, got {:?}",
            &bytes[0..4]
        ));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != BINARY_VERSION {
        return Err(format!("Unsupported binary format version: {}", version));
    }

    let expected_crc = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&bytes[10..BINARY_HEADER_SIZE]);
    let payload_len = u64::from_le_bytes(len_bytes);

    let payload = &bytes[BINARY_HEADER_SIZE..];
    if payload.len() as u64 != payload_len {
        return Err(format!(
            "Payload length mismatch: header says {} bytes, found {}",
            payload_len,
            payload.len()
        ));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(format!(
            "Checksum mismatch: expected {:#010x}, computed {:#010x}",
            expected_crc, actual_crc
        ));
    }

    bincode::deserialize(payload).map_err(|e| e.to_string())
}
