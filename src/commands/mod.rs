pub mod dump;
pub mod index;

use std::{fs::File, io::BufReader, sync::Arc};

use color_eyre::Result;
use tokio::task::spawn_blocking;

use crate::{
    config::LoaderConfig,
    snapshot::{loader::TextureLoader, stream::StdioStream},
};

pub type FileTextureLoader = TextureLoader<StdioStream<BufReader<File>>>;

/// Opens a snapshot file and reads its texture index on a blocking thread.
pub async fn open_loader(path: &str, config: &LoaderConfig) -> Result<Arc<FileTextureLoader>> {
    let path = path.to_string();
    let config = config.clone();

    let loader = spawn_blocking(move || -> Result<FileTextureLoader> {
        let stream = StdioStream::open(&path, config.buffer_size)?;
        let mut loader = TextureLoader::with_config(stream, &config);
        loader.initialize()?;
        Ok(loader)
    })
    .await??;

    Ok(Arc::new(loader))
}
