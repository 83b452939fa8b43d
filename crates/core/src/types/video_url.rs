use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoUrl(String);

impl VideoUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn video_id(&self) -> Option<&str> {
        let rest = if let Some((_, rest)) = self.0.split_once("v=") {
            rest
        } else if let Some((_, rest)) = self.0.split_once("be/") {
            rest
        } else {
            return None;
        };
        let end = rest.find(['&', '#', '?']).unwrap_or(rest.len());
        let id = &rest[..end];
        if id.is_empty() { None } else { Some(id) }
    }
}

impl TryFrom<&str> for VideoUrl {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidVideoUrl("empty url".to_string()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidVideoUrl(trimmed.to_string()));
        }
        Ok(VideoUrl(trimmed.to_string()))
    }
}

impl fmt::Display for VideoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for VideoUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_url() {
        assert!(matches!(
            VideoUrl::try_from("   "),
            Err(CoreError::InvalidVideoUrl(_))
        ));
    }

    #[test]
    fn rejects_inner_whitespace() {
        assert!(VideoUrl::try_from("https://youtube.com/watch?v=a b").is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let url = VideoUrl::try_from("  https://youtube.com/watch?v=abc ").unwrap();
        assert_eq!(url.as_str(), "https://youtube.com/watch?v=abc");
    }

    #[test]
    fn video_id_from_watch_url() {
        let url = VideoUrl::try_from("https://www.youtube.com/watch?v=abc123&t=10s").unwrap();
        assert_eq!(url.video_id(), Some("abc123"));
    }

    #[test]
    fn video_id_from_short_url() {
        let url = VideoUrl::try_from("https://youtu.be/xyz789?si=share").unwrap();
        assert_eq!(url.video_id(), Some("xyz789"));
    }

    #[test]
    fn video_id_missing() {
        let url = VideoUrl::try_from("https://example.com/video").unwrap();
        assert_eq!(url.video_id(), None);
    }
}
