pub mod language;
pub mod video_url;
