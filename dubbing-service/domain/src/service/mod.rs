pub mod segmenter;
pub mod timeline;
pub mod translation;
pub mod video_id;

pub use segmenter::{ends_sentence, segment_captions, sentences, Sentences};
pub use timeline::{assemble_timeline, Placement, Timeline};
pub use translation::{search_width, search_width_for_words, TranslationFailurePolicy};
pub use video_id::extract_video_id;
