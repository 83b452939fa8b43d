use crate::domain::generation::CommentId;
use crate::types::language::CommentLanguage;
use crate::types::video_url::VideoUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub video_url: Option<VideoUrl>,
    pub language: CommentLanguage,
    pub text: String,
    pub comment_id: Option<CommentId>,
}

impl Draft {
    pub fn new(language: CommentLanguage) -> Self {
        Self {
            video_url: None,
            language,
            text: String::new(),
            comment_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn fill(&mut self, text: &str, comment_id: Option<CommentId>) {
        self.text = text.to_string();
        self.comment_id = comment_id;
    }

    pub fn load_unlinked(&mut self, text: &str) {
        self.fill(text, None);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.comment_id = None;
    }
}
