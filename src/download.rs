use anyhow::{Result, anyhow};
use log::info;
use std::path::Path;
use std::process::Command;

const AVAILABLE_MODELS: &[&str] = &[
    "tiny",
    "tiny.en",
    "base",
    "base.en",
    "small",
    "small.en",
    "medium",
    "medium.en",
    "large-v2",
    "large-v3",
    "large-v3-turbo",
];

const MODEL_REPO: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

fn validate_model(model: &str) -> Result<()> {
    if AVAILABLE_MODELS.contains(&model) {
        Ok(())
    } else {
        Err(anyhow!(
            "Unknown model '{}'. Available models: {}",
            model,
            AVAILABLE_MODELS.join(", ")
        ))
    }
}

fn find_download_tool() -> Result<&'static str> {
    for tool in ["curl", "wget"] {
        let found = Command::new("which")
            .arg(tool)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);
        if found {
            return Ok(tool);
        }
    }

    Err(anyhow!(
        "Either curl or wget is required to download models. Please install one of them."
    ))
}

/// Fetches a ggml Whisper model into `output_dir` (current directory by
/// default), skipping the download if the file already exists.
pub fn download_model(model: &str, output_dir: Option<&str>) -> Result<()> {
    validate_model(model)?;

    let dir = output_dir.unwrap_or(".");
    let file_path = Path::new(dir).join(format!("ggml-{model}.bin"));

    if file_path.exists() {
        info!("Model '{model}' already exists at {}", file_path.display());
        return Ok(());
    }

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create directory {}: {}", parent.display(), e))?;
    }

    let url = format!("{MODEL_REPO}/ggml-{model}.bin");
    let output_path = file_path
        .to_str()
        .ok_or_else(|| anyhow!("Output path is not valid UTF-8"))?;

    info!("Downloading model '{model}' from {url}");

    let tool = find_download_tool()?;
    let status = match tool {
        "curl" => Command::new("curl")
            .args(["-L", "--fail", "--output", output_path, &url])
            .status(),
        _ => Command::new("wget")
            .args(["--no-config", "-O", output_path, &url])
            .status(),
    }
    .map_err(|e| anyhow!("Failed to execute {}: {}", tool, e))?;

    if !status.success() {
        return Err(anyhow!("Download of model '{}' failed with {}", model, tool));
    }

    info!("Model '{model}' saved to {}", file_path.display());
    info!("Start the server with: subgen serve --model {output_path}");

    Ok(())
}
