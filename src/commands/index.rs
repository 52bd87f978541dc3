use color_eyre::{eyre::eyre, Result};

use crate::{args::IndexArgs, config::LoaderConfig, snapshot::index::IndexEntry};

use super::open_loader;

pub async fn run_index_with_callback(
    args: IndexArgs,
    on_entry: Box<dyn Fn(IndexEntry) + Send>,
) -> Result<()> {
    let config = LoaderConfig::from_optional_path(args.config.as_deref()).await?;
    let loader = open_loader(&args.snapshot_path, &config).await?;
    let index = loader
        .index()
        .ok_or_else(|| eyre!("loader initialized without an index"))?;

    for entry in index.entries() {
        on_entry(entry);
    }

    Ok(())
}

pub async fn run_index(args: IndexArgs) -> Result<()> {
    run_index_with_callback(
        args,
        Box::new(|entry| println!("{} {}", entry.texture_id, entry.file_offset)),
    )
    .await
}
