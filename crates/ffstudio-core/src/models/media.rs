use serde::{Deserialize, Serialize};

/// Category of an uploaded stream. Always derived from the route, never from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Audio,
    Video,
    Image,
}

impl MediaCategory {
    /// Lower-case extensions (without the dot) accepted for this category
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaCategory::Audio => &["mp3", "wav", "aac", "m4a"],
            MediaCategory::Video => &["mp4", "mov", "mkv", "avi"],
            MediaCategory::Image => &["jpg", "jpeg", "png"],
        }
    }

    pub fn allows(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions().contains(&extension.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Audio => "audio",
            MediaCategory::Video => "video",
            MediaCategory::Image => "image",
        }
    }

    /// Content type for a produced file, keyed by its extension
    pub fn content_type_for_extension(extension: &str) -> &'static str {
        match extension.to_lowercase().as_str() {
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "aac" => "audio/aac",
            "m4a" => "audio/mp4",
            "mp4" => "video/mp4",
            "mov" => "video/quicktime",
            "mkv" => "video/x-matroska",
            "avi" => "video/x-msvideo",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
