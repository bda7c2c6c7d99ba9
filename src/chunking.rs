//! Sliding-window text chunking
//!
//! Splits the extracted document text into overlapping fixed-length chunks.
//! Offsets are counted in characters, not bytes, so multi-byte text never
//! splits inside a code point.

use thiserror::Error;

/// Default chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 500;
/// Default overlap between consecutive chunks
pub const DEFAULT_OVERLAP: usize = 100;

/// Invalid chunking parameters
#[derive(Debug, Error)]
pub enum ChunkingError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
    #[error("overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

/// Validated chunking parameters.
///
/// The window advances by `chunk_size - overlap` per step, so the
/// constructor rejects any combination with a non-positive stride.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawChunkingConfig", into = "RawChunkingConfig")]
pub struct ChunkingConfig {
    chunk_size: usize,
    overlap: usize,
}

/// Unvalidated shape used for (de)serialization
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawChunkingConfig {
    chunk_size: usize,
    overlap: usize,
}

impl TryFrom<RawChunkingConfig> for ChunkingConfig {
    type Error = ChunkingError;

    fn try_from(raw: RawChunkingConfig) -> Result<Self, Self::Error> {
        ChunkingConfig::new(raw.chunk_size, raw.overlap)
    }
}

impl From<ChunkingConfig> for RawChunkingConfig {
    fn from(config: ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            overlap: config.overlap,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    /// Create a config, rejecting parameters that would stall the window
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkingError> {
        if chunk_size == 0 {
            return Err(ChunkingError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ChunkingError::OverlapTooLarge {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Characters the window advances per step (always positive)
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Split text into overlapping chunks.
    ///
    /// The text is whitespace-normalized first, then windowed by character
    /// offset. The final chunk runs to end-of-text and may be shorter than
    /// `chunk_size`. Empty input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        let chars: Vec<char> = normalized.chars().collect();

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            start += self.stride();
        }

        chunks
    }
}

/// Collapse every run of whitespace (including page-break newlines) into a
/// single space. Leading and trailing whitespace is dropped entirely rather
/// than kept as a boundary space; a deliberate deviation so no chunk ever
/// starts or ends the document with padding.
/// Chunk boundaries may still fall mid-word; that is accepted.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
