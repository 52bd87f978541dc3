use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("unsupported texture index version: {found} (expected {expected})", expected = super::index::INDEX_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("failed to read texture index: {0}")]
    IndexRead(String),

    #[error("texture {texture_id} appears more than once in the index")]
    DuplicateTextureId { texture_id: u32 },

    #[error("snapshot stream reported an error while loading texture {texture_id}")]
    StreamIo { texture_id: u32 },

    #[error("texture {texture_id} is not in the index")]
    UnknownTextureId { texture_id: u32 },

    #[error("texture loader is not ready, initialize() did not succeed")]
    NotReady,
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        LoaderError::IndexRead(e.to_string())
    }
}
