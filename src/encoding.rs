//! Byte-order-mark sniffing and text decoding/encoding

use std::borrow::Cow;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{CsvDocError, Result};

const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];

/// Encoding of the byte source, as detected from its byte-order mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 (or ASCII) without a BOM
    #[default]
    Utf8,
    /// UTF-8 with a BOM
    Utf8Bom,
    /// UTF-16 little-endian, BOM prefixed
    Utf16Le,
    /// UTF-16 big-endian, BOM prefixed
    Utf16Be,
}

impl TextEncoding {
    /// Detect the encoding from the leading bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(BOM_UTF8) {
            TextEncoding::Utf8Bom
        } else if data.starts_with(BOM_UTF16_LE) {
            TextEncoding::Utf16Le
        } else if data.starts_with(BOM_UTF16_BE) {
            TextEncoding::Utf16Be
        } else {
            TextEncoding::Utf8
        }
    }

    /// Whether this is one of the 16-bit encodings
    pub fn is_wide(&self) -> bool {
        matches!(self, TextEncoding::Utf16Le | TextEncoding::Utf16Be)
    }

    /// Whether this is a little-endian 16-bit encoding
    pub fn is_little_endian(&self) -> bool {
        matches!(self, TextEncoding::Utf16Le)
    }

    /// The byte-order mark written in front of the text
    pub fn bom(&self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => &[],
            TextEncoding::Utf8Bom => BOM_UTF8,
            TextEncoding::Utf16Le => BOM_UTF16_LE,
            TextEncoding::Utf16Be => BOM_UTF16_BE,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 | TextEncoding::Utf8Bom => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }
}

/// Decode a byte buffer into text, consuming the BOM if there is one
///
/// # Arguments
/// - `data` - The raw bytes of the source
///
/// # Errors
/// - `CsvDocError::Encoding` if the bytes are not valid in the detected encoding
///
/// # Returns
/// The decoded text together with the detected encoding
pub fn decode(data: &[u8]) -> Result<(Cow<'_, str>, TextEncoding)> {
    let encoding = TextEncoding::detect(data);
    let body = &data[encoding.bom().len()..];

    let codec = match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => encoding_rs::UTF_8,
        TextEncoding::Utf16Le => encoding_rs::UTF_16LE,
        TextEncoding::Utf16Be => encoding_rs::UTF_16BE,
    };

    let text = codec
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| CsvDocError::Encoding(format!("invalid {} data", encoding.name())))?;

    Ok((text, encoding))
}

/// Encode text into bytes, prefixed by the BOM of the encoding
///
/// encoding_rs only encodes to UTF-8 for the UTF-16 family, so code units are
/// written out explicitly.
pub fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    let bom = encoding.bom();

    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => {
            let mut out = Vec::with_capacity(bom.len() + text.len());
            out.extend_from_slice(bom);
            out.extend_from_slice(text.as_bytes());
            out
        }
        TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
            let units: Vec<u16> = text.encode_utf16().collect();
            let mut out = vec![0u8; bom.len() + units.len() * 2];
            out[..bom.len()].copy_from_slice(bom);
            if encoding.is_little_endian() {
                LittleEndian::write_u16_into(&units, &mut out[bom.len()..]);
            } else {
                BigEndian::write_u16_into(&units, &mut out[bom.len()..]);
            }
            out
        }
    }
}
