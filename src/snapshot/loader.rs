use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use crate::config::LoaderConfig;

use super::{
    error::LoaderError,
    index::{DuplicatePolicy, TextureIndex},
    stream::SeekableStream,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Uninitialized,
    Ready,
    Failed,
}

#[derive(Debug)]
enum Init {
    Uninitialized,
    Ready(TextureIndex),
    Failed(LoaderError),
}

/// Serves texture payloads out of a snapshot stream by looking up their
/// offsets in the snapshot's texture index.
///
/// Call [`TextureLoader::initialize`] once, then share `&TextureLoader`
/// between threads and call [`TextureLoader::load`]. Loads are serialized on
/// the single underlying stream.
#[derive(Debug)]
pub struct TextureLoader<S> {
    stream: Mutex<S>,
    init: Init,
    duplicates: DuplicatePolicy,
    has_error: AtomicBool,
}

impl<S: SeekableStream> TextureLoader<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &LoaderConfig::default())
    }

    pub fn with_config(stream: S, config: &LoaderConfig) -> Self {
        Self {
            stream: Mutex::new(stream),
            init: Init::Uninitialized,
            duplicates: config.duplicates,
            has_error: AtomicBool::new(false),
        }
    }

    /// Reads the texture index. Only the first call touches the stream, later
    /// calls return the same outcome.
    pub fn initialize(&mut self) -> Result<(), LoaderError> {
        match &self.init {
            Init::Ready(_) => return Ok(()),
            Init::Failed(e) => return Err(e.clone()),
            Init::Uninitialized => {}
        }

        let stream = self
            .stream
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);

        match TextureIndex::read_from(stream, self.duplicates) {
            Ok(index) => {
                info!("Texture index ready with {} textures", index.len());
                self.init = Init::Ready(index);
                Ok(())
            }
            Err(e) => {
                error!("Failed to read texture index: {e}");
                self.has_error.store(true, Ordering::Release);
                self.init = Init::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Seeks the stream to the texture's payload and hands it to `decode`.
    ///
    /// The stream's position after `decode` returns is unspecified. `decode`
    /// reports failures by setting the stream's error indicator, which fails
    /// this call with [`LoaderError::StreamIo`] but leaves other textures
    /// loadable.
    pub fn load<F, R>(&self, texture_id: u32, decode: F) -> Result<R, LoaderError>
    where
        F: FnOnce(&mut S) -> R,
    {
        let Init::Ready(index) = &self.init else {
            return Err(LoaderError::NotReady);
        };
        let offset = index
            .get(texture_id)
            .ok_or(LoaderError::UnknownTextureId { texture_id })?;

        // Held across seek and decode, the position is shared by all loads.
        // After a panicked decode the stream is reused as is, the error
        // indicator and position are both reset below.
        let mut stream = self.stream.lock().unwrap_or_else(|poisoned| {
            warn!("A previous texture decode panicked, recovering the snapshot stream");
            self.has_error.store(true, Ordering::Release);
            self.stream.clear_poison();
            poisoned.into_inner()
        });

        stream.clear_error();
        if let Err(e) = stream.seek_to(offset) {
            warn!("Failed to seek to texture {texture_id} at offset {offset}: {e}");
            self.has_error.store(true, Ordering::Release);
            return Err(LoaderError::StreamIo { texture_id });
        }

        let result = decode(&mut *stream);

        if stream.has_error() {
            warn!("Snapshot stream error while loading texture {texture_id}");
            self.has_error.store(true, Ordering::Release);
            return Err(LoaderError::StreamIo { texture_id });
        }

        Ok(result)
    }

    pub fn state(&self) -> LoaderState {
        match self.init {
            Init::Uninitialized => LoaderState::Uninitialized,
            Init::Ready(_) => LoaderState::Ready,
            Init::Failed(_) => LoaderState::Failed,
        }
    }

    /// Whether initialization or any load so far has failed on the stream.
    pub fn has_error(&self) -> bool {
        self.has_error.load(Ordering::Acquire)
    }

    pub fn index(&self) -> Option<&TextureIndex> {
        match &self.init {
            Init::Ready(index) => Some(index),
            _ => None,
        }
    }
}
