use std::{io::Read, path::PathBuf};

use color_eyre::{eyre::bail, Result};
use futures::future::join_all;
use tokio::{fs::create_dir_all, task::spawn_blocking};

use crate::{args::DumpArgs, config::LoaderConfig, snapshot::stream::SeekableStream};

use super::open_loader;

/// Reads up to `length` bytes at the current position, marking the stream as
/// failed on read errors.
fn read_payload<S: SeekableStream>(stream: &mut S, length: usize) -> Vec<u8> {
    let mut payload = Vec::with_capacity(length);
    if let Err(e) = stream.by_ref().take(length as u64).read_to_end(&mut payload) {
        debug!("Payload read failed: {e}");
        stream.set_error();
    }
    payload
}

/// Returns the number of textures written.
pub async fn run_dump(args: DumpArgs) -> Result<usize> {
    let config = LoaderConfig::from_optional_path(args.config.as_deref()).await?;
    let loader = open_loader(&args.snapshot_path, &config).await?;

    let ids = if args.ids.is_empty() {
        loader
            .index()
            .map(|index| index.entries().into_iter().map(|e| e.texture_id).collect())
            .unwrap_or_default()
    } else {
        args.ids
    };

    create_dir_all(&args.output_dir).await?;
    let output_dir = PathBuf::from(&args.output_dir);
    let length = args.length;

    let handles = ids.iter().map(|&texture_id| {
        let loader = loader.clone();
        let path = output_dir.join(format!("{texture_id}.bin"));
        spawn_blocking(move || -> Result<()> {
            let payload = loader.load(texture_id, |stream| read_payload(stream, length))?;
            std::fs::write(&path, &payload)?;
            debug!("Wrote {} bytes of texture {texture_id}", payload.len());
            Ok(())
        })
    });

    let mut failed = 0;
    for (texture_id, result) in ids.iter().zip(join_all(handles).await) {
        let result = match result {
            Ok(result) => result,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            error!("Failed to dump texture {texture_id}: {e}");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("failed to dump {failed} of {} textures", ids.len());
    }

    info!("Dumped {} textures into '{}'", ids.len(), args.output_dir);
    Ok(ids.len())
}
