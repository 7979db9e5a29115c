use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "subgen",
    about = "Subgen - Video Subtitle Generation Service",
    long_about = "An HTTP service that extracts the audio track from a video file, transcribes it with a Whisper model, and writes the result as an SRT subtitle file.",
    after_help = "EXAMPLES:\n    # Start the subtitle generation server\n    subgen serve --model models/ggml-base.bin\n\n    # Listen on a different address\n    subgen serve --host 127.0.0.1 --port 8080\n\n    # Fetch a Whisper model first\n    subgen download-model base --output-dir models"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(name = "serve")]
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, default_value = "5000")]
        port: u16,

        /// Path to a ggml Whisper model. Falls back to WHISPER_MODEL_PATH.
        #[arg(long)]
        model: Option<PathBuf>,

        #[arg(long, default_value = "en")]
        language: String,

        #[arg(long, default_value = "2")]
        threads: i32,

        #[arg(long)]
        no_gpu: bool,
    },
    #[command(name = "download-model")]
    DownloadModel {
        model: String,

        #[arg(long)]
        output_dir: Option<String>,
    },
}
