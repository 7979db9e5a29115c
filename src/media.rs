use anyhow::{Result, anyhow};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use uuid::Uuid;

/// Narrow seam between the subtitle pipeline and the media tooling: video
/// file in, extracted audio track out.
pub trait AudioExtractor: Send + Sync {
    fn extract(&self, video_path: &Path, audio_path: &Path) -> Result<()>;
}

/// Extracts the audio track with the ffmpeg CLI, resampled to the 16 kHz
/// mono 16-bit PCM WAV that transcription consumes.
pub struct FfmpegExtractor;

impl AudioExtractor for FfmpegExtractor {
    fn extract(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        debug!(
            "Extracting audio: {} -> {}",
            video_path.display(),
            audio_path.display()
        );

        let output = Command::new("ffmpeg")
            .arg("-i")
            .arg(video_path)
            .args(["-vn", "-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
            .arg(audio_path)
            .args(["-hide_banner", "-y", "-loglevel", "error"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| anyhow!("Failed to run ffmpeg: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Failed to extract audio from {}: {}",
                video_path.display(),
                stderr.trim()
            ));
        }

        Ok(())
    }
}

/// A request-scoped temporary WAV path next to the source video. The name is
/// unique per request so concurrent requests against the same directory
/// cannot clobber each other's audio. The file is removed on drop, on every
/// exit path.
pub struct TempWav {
    path: PathBuf,
}

impl TempWav {
    pub fn alongside(video_path: &Path) -> Self {
        let dir = match video_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let path = dir.join(format!("temp_audio_{}.wav", Uuid::new_v4().simple()));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempWav {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(
                    "Failed to remove temporary audio file {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_wav_lands_next_to_the_video() {
        let temp = TempWav::alongside(Path::new("/videos/movie.mp4"));
        assert_eq!(temp.path().parent(), Some(Path::new("/videos")));

        let name = temp.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("temp_audio_"));
        assert!(name.ends_with(".wav"));
    }

    #[test]
    fn temp_wav_for_bare_filename_uses_current_dir() {
        let temp = TempWav::alongside(Path::new("movie.mp4"));
        assert_eq!(temp.path().parent(), Some(Path::new(".")));
    }

    #[test]
    fn temp_wav_names_are_unique() {
        let video = Path::new("/videos/movie.mp4");
        let a = TempWav::alongside(video);
        let b = TempWav::alongside(video);
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn temp_wav_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("movie.mp4");

        let temp = TempWav::alongside(&video);
        std::fs::write(temp.path(), b"pcm").unwrap();
        let path = temp.path().to_path_buf();
        assert!(path.exists());

        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn temp_wav_drop_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let temp = TempWav::alongside(&dir.path().join("movie.mp4"));
        // Never created; drop must not panic.
        drop(temp);
    }
}
