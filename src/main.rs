mod cli;
mod download;
mod dto;
mod media;
mod server;
mod srt;
mod whisper;

use clap::Parser;
use cli::{Cli, Commands};
use whisper::config::WhisperConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            model,
            language,
            threads,
            no_gpu,
        } => {
            let config = WhisperConfig::resolve(model, language, threads, !no_gpu)?;
            server::run_server(host, port, config).await
        }
        Commands::DownloadModel { model, output_dir } => {
            download::download_model(&model, output_dir.as_deref())
        }
    }
}
