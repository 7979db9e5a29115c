use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, post, web};
use anyhow::Result;
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::dto::{ProcessRequest, ProcessResponse};
use crate::media::{AudioExtractor, FfmpegExtractor, TempWav};
use crate::srt;
use crate::whisper::config::WhisperConfig;
use crate::whisper::transcriber::{Transcriber, WhisperTranscriber};

pub struct AppState {
    pub extractor: Arc<dyn AudioExtractor>,
    pub transcriber: Arc<dyn Transcriber>,
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    debug!("Health check endpoint called");
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Subtitle generation service is running"
    }))
}

#[post("/process")]
pub async fn process_video(
    data: web::Data<AppState>,
    body: web::Json<ProcessRequest>,
) -> impl Responder {
    let request = body.into_inner();

    if request.video_path.is_empty() || request.subtitle_path.is_empty() {
        warn!("Process request rejected: missing video or subtitle path");
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid input"
        }));
    }

    info!(
        "Processing video {} -> {}",
        request.video_path, request.subtitle_path
    );

    match generate_subtitles(
        data.extractor.as_ref(),
        data.transcriber.as_ref(),
        Path::new(&request.video_path),
        Path::new(&request.subtitle_path),
    ) {
        Ok(segment_count) => {
            info!(
                "Subtitles written to {}: {} entries",
                request.subtitle_path, segment_count
            );
            HttpResponse::Ok().json(ProcessResponse {
                message: "Subtitles generated successfully".to_string(),
                subtitle_path: request.subtitle_path,
            })
        }
        Err(e) => {
            error!("Subtitle generation failed: {e:#}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("{e:#}")
            }))
        }
    }
}

/// Runs the extract -> transcribe -> write pipeline for one request and
/// returns the number of subtitle entries written. The temporary WAV is
/// removed on every exit path; on success it is gone before the subtitle
/// file is written.
fn generate_subtitles(
    extractor: &dyn AudioExtractor,
    transcriber: &dyn Transcriber,
    video_path: &Path,
    subtitle_path: &Path,
) -> Result<usize> {
    let temp_audio = TempWav::alongside(video_path);

    extractor.extract(video_path, temp_audio.path())?;
    let segments = transcriber.transcribe(temp_audio.path())?;
    drop(temp_audio);

    srt::write_srt(subtitle_path, &segments)?;
    Ok(segments.len())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Invalid input"
                })),
            )
            .into()
        })
}

pub async fn run_server(host: String, port: u16, config: WhisperConfig) -> Result<()> {
    info!("Starting subtitle generation service");
    info!(
        "Using configuration: model_path={:?}, use_gpu={}, language={}, num_threads={}",
        config.model_path, config.use_gpu, config.language, config.num_threads
    );

    let transcriber = WhisperTranscriber::new(config)?;
    info!("Whisper transcriber initialized successfully");

    let app_state = web::Data::new(AppState {
        extractor: Arc::new(FfmpegExtractor),
        transcriber: Arc::new(transcriber),
    });

    info!("Starting HTTP server on {host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health_check)
            .service(process_video)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
