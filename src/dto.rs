#[derive(serde::Deserialize)]
pub struct ProcessRequest {
    #[serde(rename = "videoPath", default)]
    pub video_path: String,
    #[serde(rename = "subtitlePath", default)]
    pub subtitle_path: String,
}

#[derive(serde::Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub subtitle_path: String,
}
