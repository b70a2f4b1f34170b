//! ratedata CLI - splits GAIN Capital weekly tick archives into per-day files.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use commands::download::DownloadArgs;

#[derive(Parser)]
#[command(name = "ratedata")]
#[command(about = "Download weekly GAIN Capital tick archives and split them by day", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download bundles and write one file per day
    Download {
        /// Currency pairs (e.g. EUR_USD, usd/jpy). Prompts when omitted.
        symbols: Vec<String>,

        /// First month (YYYY-MM or YYYY/M)
        #[arg(long, default_value = "2014-01")]
        from: String,

        /// Last month, inclusive (YYYY-MM or YYYY/M)
        #[arg(long, default_value = "2016-11")]
        to: String,

        /// Directory receiving <SYMBOL>/<YYYY-MM-DD>.csv
        #[arg(short, long, default_value = "data")]
        data_root: PathBuf,

        /// Read bundles from a local mirror instead of downloading
        #[arg(long)]
        mirror: Option<PathBuf>,

        /// Maximum concurrent downloads
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Retry attempts for transient HTTP failures
        #[arg(long, default_value = "3")]
        retries: u32,

        /// Sync day files to disk before renaming them into place
        #[arg(long)]
        sync: bool,

        /// Write the per-bundle outcomes as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Skip prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Split a local bundle (zip or csv) without downloading
    Split {
        /// Path to a weekly archive or its extracted csv
        input: PathBuf,

        /// Currency pair the bundle belongs to
        #[arg(short, long)]
        symbol: String,

        /// Directory receiving <SYMBOL>/<YYYY-MM-DD>.csv
        #[arg(short, long, default_value = "data")]
        data_root: PathBuf,
    },

    /// List known currency pairs and the days stored for each
    List {
        /// Directory holding previously written day files
        #[arg(short, long, default_value = "data")]
        data_root: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(logging::level_for(cli.verbose, cli.quiet))?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Download {
            symbols,
            from,
            to,
            data_root,
            mirror,
            concurrency,
            retries,
            sync,
            report,
            yes,
        } => {
            commands::download::download(DownloadArgs {
                symbols,
                from,
                to,
                data_root,
                mirror,
                concurrency,
                retries,
                sync,
                report,
                yes,
                quiet: cli.quiet,
            })
            .await
        }
        Commands::Split {
            input,
            symbol,
            data_root,
        } => commands::split::split(&input, &symbol, data_root, cli.quiet),
        Commands::List { data_root } => commands::list::list_symbols(data_root),
    }
}
