use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DubVideoRequest {
    #[validate(length(min = 1, max = 2048))]
    pub link: String,
    #[validate(length(min = 1, max = 8))]
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DubVideoResponse {
    pub session_id: String,
    pub video_id: String,
    pub target_lang: String,
    pub sentence_count: usize,
    pub silent_sentence_count: usize,
    pub timeline_duration_ms: u64,
    pub output_path: Option<String>,
}
