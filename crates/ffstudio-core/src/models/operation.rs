use serde::{Deserialize, Serialize};

use super::media::MediaCategory;

/// A named multipart file field and the category its contents must belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSlot {
    pub field: &'static str,
    pub category: MediaCategory,
}

const fn slot(field: &'static str, category: MediaCategory) -> UploadSlot {
    UploadSlot { field, category }
}

/// Operations exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    CutAudio,
    CropVideo,
    TrimVideo,
    ReplaceAudio,
    ImageToVideo,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::CutAudio,
        OperationKind::CropVideo,
        OperationKind::TrimVideo,
        OperationKind::ReplaceAudio,
        OperationKind::ImageToVideo,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            OperationKind::CutAudio => "cut-audio",
            OperationKind::CropVideo => "crop-video",
            OperationKind::TrimVideo => "trim-video",
            OperationKind::ReplaceAudio => "replace-audio",
            OperationKind::ImageToVideo => "image-to-video",
        }
    }

    /// Path used by the bundled front-end before the `/api` routes existed
    pub fn legacy_path(&self) -> &'static str {
        match self {
            OperationKind::CutAudio => "/cut-mp3",
            OperationKind::CropVideo => "/crop",
            OperationKind::TrimVideo => "/trim",
            OperationKind::ReplaceAudio => "/replace-audio",
            OperationKind::ImageToVideo => "/image-audio",
        }
    }

    /// File fields in the order the argument builders expect them
    pub fn uploads(&self) -> &'static [UploadSlot] {
        const CUT_AUDIO: [UploadSlot; 1] = [slot("file", MediaCategory::Audio)];
        const SINGLE_VIDEO: [UploadSlot; 1] = [slot("file", MediaCategory::Video)];
        const REPLACE_AUDIO: [UploadSlot; 2] = [
            slot("video", MediaCategory::Video),
            slot("audio", MediaCategory::Audio),
        ];
        const IMAGE_TO_VIDEO: [UploadSlot; 2] = [
            slot("image", MediaCategory::Image),
            slot("audio", MediaCategory::Audio),
        ];

        match self {
            OperationKind::CutAudio => &CUT_AUDIO,
            OperationKind::CropVideo | OperationKind::TrimVideo => &SINGLE_VIDEO,
            OperationKind::ReplaceAudio => &REPLACE_AUDIO,
            OperationKind::ImageToVideo => &IMAGE_TO_VIDEO,
        }
    }

    pub fn upload_slot(&self, field: &str) -> Option<UploadSlot> {
        self.uploads().iter().copied().find(|s| s.field == field)
    }

    /// Text form fields that must be present
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            OperationKind::CutAudio => &["start", "duration"],
            OperationKind::CropVideo => &["x", "y", "w", "h"],
            OperationKind::TrimVideo => &["start", "end"],
            OperationKind::ReplaceAudio | OperationKind::ImageToVideo => &[],
        }
    }

    /// Extension of the produced file. Stream-copy operations keep the
    /// container of their first input.
    pub fn output_extension(&self, primary_input_extension: &str) -> String {
        match self {
            OperationKind::CutAudio | OperationKind::TrimVideo => {
                primary_input_extension.to_lowercase()
            }
            OperationKind::CropVideo
            | OperationKind::ReplaceAudio
            | OperationKind::ImageToVideo => "mp4".to_string(),
        }
    }

    /// Extension of the intermediate artifact, for multi-step operations
    pub fn intermediate_extension(&self) -> Option<&'static str> {
        match self {
            OperationKind::ImageToVideo => Some("png"),
            _ => None,
        }
    }

    /// Suggested filename sent back in `Content-Disposition`
    pub fn download_filename(&self, extension: &str) -> String {
        match self {
            OperationKind::CutAudio => format!("trimmed.{}", extension),
            _ => format!("output.{}", extension),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_slots_follow_route() {
        let slots = OperationKind::ReplaceAudio.uploads();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].field, "video");
        assert_eq!(slots[0].category, MediaCategory::Video);
        assert_eq!(slots[1].category, MediaCategory::Audio);

        assert_eq!(
            OperationKind::CutAudio.upload_slot("file").map(|s| s.category),
            Some(MediaCategory::Audio)
        );
        assert!(OperationKind::CutAudio.upload_slot("video").is_none());
    }

    #[test]
    fn test_output_extension_policy() {
        assert_eq!(OperationKind::CutAudio.output_extension("WAV"), "wav");
        assert_eq!(OperationKind::TrimVideo.output_extension("mkv"), "mkv");
        assert_eq!(OperationKind::CropVideo.output_extension("avi"), "mp4");
        assert_eq!(OperationKind::ImageToVideo.output_extension("png"), "mp4");
    }

    #[test]
    fn test_download_filenames() {
        assert_eq!(OperationKind::CutAudio.download_filename("mp3"), "trimmed.mp3");
        assert_eq!(OperationKind::ReplaceAudio.download_filename("mp4"), "output.mp4");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = OperationKind::ALL.iter().map(|k| k.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), OperationKind::ALL.len());
        assert_eq!(
            serde_json::to_string(&OperationKind::ImageToVideo).unwrap(),
            "\"image-to-video\""
        );
    }
}
