use anyhow::{Result, anyhow};
use std::path::PathBuf;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct WhisperConfig {
    pub model_path: PathBuf,
    pub use_gpu: bool,
    pub language: String,
    pub audio_context: i32,
    pub no_speech_threshold: f32,
    pub num_threads: i32,
}

impl WhisperConfig {
    /// Builds a config from CLI arguments, falling back to the
    /// WHISPER_MODEL_PATH environment variable for the model path.
    pub fn resolve(
        model: Option<PathBuf>,
        language: String,
        num_threads: i32,
        use_gpu: bool,
    ) -> Result<Self> {
        let model_path = match model {
            Some(path) => path,
            None => std::env::var("WHISPER_MODEL_PATH")
                .map(PathBuf::from)
                .map_err(|_| {
                    anyhow!("No model path given: pass --model or set WHISPER_MODEL_PATH")
                })?,
        };

        Ok(Self {
            model_path,
            use_gpu,
            language,
            audio_context: 768,
            no_speech_threshold: 0.5,
            num_threads,
        })
    }
}
