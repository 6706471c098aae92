use clap::Parser;

use yt_audio_batch::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = cli.run().await {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }
}
