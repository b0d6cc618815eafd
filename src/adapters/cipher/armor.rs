use std::io::{Read, Write};

use age::armor::{ArmoredReader, ArmoredWriter, Format};

use crate::core::errors::{Result, SealpostError};

pub const BEGIN_MARKER: &str = "-----BEGIN AGE ENCRYPTED FILE-----";
pub const END_MARKER: &str = "-----END AGE ENCRYPTED FILE-----";

/// Open the ASCII armor stage over `output`.
///
/// The returned writer must be finished *after* the encryption stream
/// wrapping it, otherwise the trailer is written before the final chunk.
pub fn wrap<W: Write>(output: W) -> Result<ArmoredWriter<W>> {
    ArmoredWriter::wrap_output(output, Format::AsciiArmor).map_err(|e| {
        SealpostError::EncryptionFailed {
            reason: format!("Armor writer failed: {e}"),
        }
    })
}

/// Strip the ASCII armor and return the raw age byte stream.
///
/// Surrounding whitespace is tolerated; anything else outside the
/// markers, a bad base64 body or wrong line lengths is rejected.
pub fn unwrap(armored: &str) -> Result<Vec<u8>> {
    let trimmed = armored.trim();
    if !trimmed.starts_with(BEGIN_MARKER) {
        return Err(SealpostError::EnvelopeMalformed {
            reason: "missing BEGIN marker".into(),
        });
    }
    if !trimmed.ends_with(END_MARKER) {
        return Err(SealpostError::EnvelopeMalformed {
            reason: "missing END marker".into(),
        });
    }

    let normalized = format!("{trimmed}\n");
    let mut reader = ArmoredReader::new(normalized.as_bytes());
    let mut raw = Vec::new();
    reader
        .read_to_end(&mut raw)
        .map_err(|e| SealpostError::EnvelopeMalformed {
            reason: format!("invalid armor body: {e}"),
        })?;

    Ok(raw)
}
