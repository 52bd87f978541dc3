use std::{collections::HashMap, time::Instant};

use humantime::format_duration;
use log::Level;
use serde::{Deserialize, Serialize};

use super::{error::LoaderError, stream::SeekableStream};

pub const INDEX_VERSION: u32 = 1;

// The record count is untrusted until the records are actually read.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub texture_id: u32,
    pub file_offset: u64,
}

/// What to do when the same texture id is listed more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    LastWins,
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureIndex {
    offsets: HashMap<u32, u64>,
}

impl TextureIndex {
    /// Reads the footer pointer at the stream's current position, then the
    /// index section it points to.
    pub fn read_from<S: SeekableStream + ?Sized>(
        stream: &mut S,
        duplicates: DuplicatePolicy,
    ) -> Result<Self, LoaderError> {
        let start = log_enabled!(Level::Debug).then(Instant::now);

        let index_offset = stream.read_be64()?;
        stream.seek_to(index_offset)?;

        let version = stream.read_be32()?;
        if version != INDEX_VERSION {
            return Err(LoaderError::UnsupportedVersion { found: version });
        }

        let count = stream.read_be32()?;
        let mut offsets =
            HashMap::with_capacity((count as usize).min(MAX_PREALLOCATED_ENTRIES));
        for _ in 0..count {
            let texture_id = stream.read_be32()?;
            let file_offset = stream.read_be64()?;
            if let Some(previous) = offsets.insert(texture_id, file_offset) {
                match duplicates {
                    DuplicatePolicy::LastWins => warn!(
                        "Texture {texture_id} is indexed twice (offset {previous} replaced by {file_offset})"
                    ),
                    DuplicatePolicy::Reject => {
                        return Err(LoaderError::DuplicateTextureId { texture_id })
                    }
                }
            }
        }

        if let Some(start) = start {
            debug!(
                "Read texture index at offset {index_offset} with {} entries in {}",
                offsets.len(),
                format_duration(start.elapsed())
            );
        }

        Ok(Self { offsets })
    }

    pub fn get(&self, texture_id: u32) -> Option<u64> {
        self.offsets.get(&texture_id).copied()
    }

    pub fn contains(&self, texture_id: u32) -> bool {
        self.offsets.contains_key(&texture_id)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        self.offsets
            .iter()
            .map(|(&texture_id, &file_offset)| IndexEntry {
                texture_id,
                file_offset,
            })
    }

    /// All entries, sorted by texture id.
    pub fn entries(&self) -> Vec<IndexEntry> {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_unstable_by_key(|entry| entry.texture_id);
        entries
    }
}
