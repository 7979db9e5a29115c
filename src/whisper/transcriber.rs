use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, Mutex};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::whisper::config::WhisperConfig;

/// A contiguous span of transcribed speech. Times are in seconds from the
/// start of the audio; segments are ordered chronologically.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Narrow seam between the subtitle pipeline and the speech-to-text model:
/// audio file in, ordered segments out.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>>;
}

#[derive(Clone)]
pub struct WhisperTranscriber {
    inner: Arc<Mutex<TranscriberInner>>,
    config: WhisperConfig,
}

struct TranscriberInner {
    ctx: WhisperContext,
}

impl WhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self> {
        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(config.use_gpu);

        let model_path = config
            .model_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Model path is not valid UTF-8"))?;

        let ctx = WhisperContext::new_with_params(model_path, ctx_params)
            .map_err(|e| anyhow::anyhow!("Failed to load model: {}", e))?;

        let inner = TranscriberInner { ctx };

        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
            config,
        })
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio_path: &Path) -> Result<Vec<Segment>> {
        let samples = read_wav_samples(audio_path)?;

        if samples.len() < 16000 {
            return Err(anyhow::anyhow!("Audio is too short (less than 1 second)"));
        }

        // Configure transcription parameters
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(&self.config.language));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(true);
        params.set_audio_ctx(self.config.audio_context);
        params.set_no_speech_thold(self.config.no_speech_threshold);
        params.set_n_threads(self.config.num_threads);

        // Lock the context and run transcription
        let inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("Failed to acquire transcriber lock"))?;

        let mut state = inner
            .ctx
            .create_state()
            .map_err(|e| anyhow::anyhow!("Failed to create whisper state: {}", e))?;

        state
            .full(params, &samples)
            .map_err(|e| anyhow::anyhow!("Failed to run transcription: {}", e))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| anyhow::anyhow!("Failed to get segment count: {}", e))?;

        let mut segments = Vec::with_capacity(num_segments as usize);

        for i in 0..num_segments {
            let text = state
                .full_get_segment_text(i)
                .map_err(|e| anyhow::anyhow!("Failed to get segment text: {}", e))?;

            let start = state
                .full_get_segment_t0(i)
                .map_err(|e| anyhow::anyhow!("Failed to get segment start: {}", e))?;

            let end = state
                .full_get_segment_t1(i)
                .map_err(|e| anyhow::anyhow!("Failed to get segment end: {}", e))?;

            // Whisper reports timestamps in centiseconds
            segments.push(Segment {
                start: start as f64 / 100.0,
                end: end as f64 / 100.0,
                text,
            });
        }

        Ok(segments)
    }
}

/// Reads a 16 kHz mono 16-bit PCM WAV (the format audio extraction produces)
/// into f32 samples.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open audio file {}: {}", path.display(), e))?;

    let spec = reader.spec();
    if spec.sample_rate != 16000
        || spec.channels != 1
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(anyhow::anyhow!(
            "Unexpected audio format: {} Hz, {} channels, {}-bit (want 16000 Hz mono 16-bit PCM)",
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        ));
    }

    let pcm: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<Vec<i16>, _>>()
        .map_err(|e| anyhow::anyhow!("Failed to read audio samples: {}", e))?;

    let mut samples = vec![0.0f32; pcm.len()];
    whisper_rs::convert_integer_to_float_audio(&pcm, &mut samples)
        .map_err(|e| anyhow::anyhow!("Failed to convert audio to float: {}", e))?;

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_16khz_mono_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.wav");
        write_wav(&path, 16000, &[0, i16::MAX, i16::MIN]);

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!(samples[1] > 0.99);
    }

    #[test]
    fn rejects_wrong_sample_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.wav");
        write_wav(&path, 44100, &[0; 100]);

        let err = read_wav_samples(&path).unwrap_err();
        assert!(err.to_string().contains("44100"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_wav_samples(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(err.to_string().contains("Failed to open audio file"));
    }
}
