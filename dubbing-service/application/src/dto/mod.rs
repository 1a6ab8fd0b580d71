mod dub_video;

pub use dub_video::{DubVideoRequest, DubVideoResponse};
