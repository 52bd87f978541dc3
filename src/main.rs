use std::time::Duration;

use color_eyre::eyre::Result;
use dotenvy::dotenv;
use pretty_env_logger::formatted_timed_builder;
use texsnap::{
    args::{parse_args, Args, SubCommand},
    commands::{dump::run_dump, index::run_index},
};
use tokio::runtime::Builder;

extern crate pretty_env_logger;

const DEFAULT_DEBUG_LOG_LEVEL: &str = "texsnap=trace";
const DEFAULT_RELEASE_LOG_LEVEL: &str = "texsnap=info";

async fn async_main(args: Args) -> Result<()> {
    match args.subcmd {
        SubCommand::Index(index_args) => {
            run_index(index_args).await?;
        }
        SubCommand::Dump(dump_args) => {
            run_dump(dump_args).await?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // Load vars inside .env into env vars, does nothing if the file does not exist.
    let _ = dotenv();

    let default_log_level = if cfg!(debug_assertions) {
        DEFAULT_DEBUG_LOG_LEVEL
    } else {
        DEFAULT_RELEASE_LOG_LEVEL
    };

    let mut log_builder = formatted_timed_builder();
    log_builder.parse_filters(
        &std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_level.to_string()),
    );
    log_builder.try_init()?;

    let args = parse_args();

    let runtime = Builder::new_multi_thread()
        .thread_keep_alive(Duration::from_secs(20))
        .enable_all()
        .build()?;
    runtime.block_on(async_main(args))
}
