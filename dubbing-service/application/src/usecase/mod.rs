mod dub_video;

pub use dub_video::{DubVideoUseCase, DubVideoUseCaseImpl};
