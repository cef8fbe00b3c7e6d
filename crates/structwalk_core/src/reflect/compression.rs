use std::io::Read;

use crate::reflect::{ReflectError, Result};

/// zstd frame magic used by compressed documents.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub(crate) fn decode_bytes(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	if looks_like_json_object(&raw) {
		return Ok((Compression::None, raw));
	}

	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw, limit)?;
		return Ok((Compression::Zstd, out));
	}

	Err(ReflectError::UnknownMagic { magic: first4(&raw) })
}

fn decode_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(ReflectError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	if !looks_like_json_object(&out) {
		return Err(ReflectError::NotJsonAfterDecompress);
	}

	Ok(out)
}

fn looks_like_json_object(bytes: &[u8]) -> bool {
	bytes.iter().find(|byte| !byte.is_ascii_whitespace()) == Some(&b'{')
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}
