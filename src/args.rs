use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser, Debug, Clone)]
pub enum SubCommand {
    #[clap(name = "index")]
    Index(IndexArgs),

    #[clap(name = "dump")]
    Dump(DumpArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    #[clap(help = "Path to the snapshot textures file.")]
    pub snapshot_path: String,

    #[clap(short, long, help = "Path to a loader config yaml file.")]
    pub config: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DumpArgs {
    #[clap(help = "Path to the snapshot textures file.")]
    pub snapshot_path: String,

    #[clap(help = "Path to the dir to write texture payloads into.")]
    pub output_dir: String,

    #[clap(
        long,
        value_delimiter = ',',
        help = "Texture ids to dump, all indexed textures when not set."
    )]
    pub ids: Vec<u32>,

    #[clap(
        short,
        long,
        default_value = "4096",
        help = "Number of payload bytes to read for each texture."
    )]
    pub length: usize,

    #[clap(short, long, help = "Path to a loader config yaml file.")]
    pub config: Option<String>,
}

#[must_use]
pub fn parse_args() -> Args {
    Args::parse()
}
