use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Typed,
    File,
    Audio,
    Video,
}

impl SourceKind {
    /// Classifies an uploaded file by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())?;

        match ext.as_str() {
            "pdf" | "docx" | "txt" => Some(SourceKind::File),
            "mp3" | "wav" | "m4a" => Some(SourceKind::Audio),
            "mp4" | "mkv" | "avi" => Some(SourceKind::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
    origin: SourceKind,
}

impl SourceDocument {
    pub fn new(text: impl Into<String>, origin: SourceKind) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> SourceKind {
        self.origin
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_supported_extensions() {
        assert_eq!(SourceKind::from_path(Path::new("notes.PDF")), Some(SourceKind::File));
        assert_eq!(SourceKind::from_path(Path::new("a/b/lecture.m4a")), Some(SourceKind::Audio));
        assert_eq!(SourceKind::from_path(Path::new("class.mkv")), Some(SourceKind::Video));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        assert_eq!(SourceKind::from_path(Path::new("slides.pptx")), None);
        assert_eq!(SourceKind::from_path(Path::new("README")), None);
    }
}
