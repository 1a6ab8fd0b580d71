mod download;
mod dub;
mod health;
mod page;

pub use download::play_audio;
pub use dub::submit_dub;
pub use health::health_check;
pub use page::index;
