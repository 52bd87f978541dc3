use std::io::{Cursor, Write};

use color_eyre::Result;
use pretty_env_logger::formatted_timed_builder;
use tempfile::NamedTempFile;
use texsnap::snapshot::StdioStream;

/// Builds a textures snapshot: a footer pointer at offset 0, payloads at
/// their offsets and the index section at `index_offset`.
pub struct SnapshotBuilder {
    index_offset: u64,
    version: u32,
    records: Vec<(u32, u64)>,
    payloads: Vec<(u64, Vec<u8>)>,
}

#[allow(dead_code)]
impl SnapshotBuilder {
    pub fn new(index_offset: u64) -> Self {
        Self {
            index_offset,
            version: 1,
            records: Vec::new(),
            payloads: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn record(mut self, texture_id: u32, file_offset: u64) -> Self {
        self.records.push((texture_id, file_offset));
        self
    }

    pub fn texture(mut self, texture_id: u32, file_offset: u64, payload: &[u8]) -> Self {
        self.records.push((texture_id, file_offset));
        self.payloads.push((file_offset, payload.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let index_len = 8 + 12 * self.records.len();
        let payloads_end = self
            .payloads
            .iter()
            .map(|(offset, payload)| *offset as usize + payload.len())
            .max()
            .unwrap_or(0);
        let len = payloads_end.max(self.index_offset as usize + index_len);

        let mut bytes = vec![0u8; len];
        bytes[..8].copy_from_slice(&self.index_offset.to_be_bytes());
        for (offset, payload) in &self.payloads {
            let offset = *offset as usize;
            bytes[offset..offset + payload.len()].copy_from_slice(payload);
        }

        let mut index = Vec::with_capacity(index_len);
        index.extend_from_slice(&self.version.to_be_bytes());
        index.extend_from_slice(&(self.records.len() as u32).to_be_bytes());
        for (texture_id, file_offset) in &self.records {
            index.extend_from_slice(&texture_id.to_be_bytes());
            index.extend_from_slice(&file_offset.to_be_bytes());
        }
        let start = self.index_offset as usize;
        bytes[start..start + index_len].copy_from_slice(&index);

        bytes
    }

    pub fn stream(&self) -> StdioStream<Cursor<Vec<u8>>> {
        StdioStream::new(Cursor::new(self.build()))
    }

    pub fn write_temp_file(&self) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&self.build())?;
        file.flush()?;
        Ok(file)
    }
}

#[allow(dead_code)]
pub fn test_init() {
    color_eyre::install().unwrap();

    let mut log_builder = formatted_timed_builder();
    log_builder.parse_filters("texsnap=trace");
    log_builder.try_init().unwrap();
}
