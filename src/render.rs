//! Pure mapping from response data to display content.
//!
//! Chunk text is carried as plain strings inside structured entries; hosts
//! insert it as text, never as markup.

use crate::models::RetrievedChunk;
use serde::Serialize;

pub const NO_CHUNKS_PLACEHOLDER: &str = "No relevant chunks found.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkEntry {
    /// e.g. `ID: 17`
    pub label: String,
    /// Four decimal places.
    pub distance: String,
    pub text: String,
}

/// Content of the chunk area. The container is revealed for both variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkList {
    Entries { entries: Vec<ChunkEntry> },
    Empty { placeholder: String },
}

impl ChunkList {
    pub fn len(&self) -> usize {
        match self {
            ChunkList::Entries { entries } => entries.len(),
            ChunkList::Empty { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn render_chunk(chunk: &RetrievedChunk) -> ChunkEntry {
    ChunkEntry {
        label: format!("ID: {}", chunk.id),
        distance: format!("{:.4}", chunk.distance),
        text: chunk.text.clone(),
    }
}

pub fn render_chunks(chunks: &[RetrievedChunk]) -> ChunkList {
    if chunks.is_empty() {
        return ChunkList::Empty {
            placeholder: NO_CHUNKS_PLACEHOLDER.to_string(),
        };
    }
    ChunkList::Entries {
        entries: chunks.iter().map(render_chunk).collect(),
    }
}

/// Failure text shown in the answer area, distinct from a normal answer.
pub fn render_error(message: &str) -> String {
    format!("Error: {}", message)
}
