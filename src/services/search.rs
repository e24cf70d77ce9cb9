use std::path::Path;

use crate::error::Result;
use crate::models::matches::{FaceMatch, TimelineMatch};

/// The kind of file a search endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Video,
}

impl UploadKind {
    /// The extensions accepted for this kind, lowercase, without the dot.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["jpg", "jpeg", "png"],
            UploadKind::Video => &["mp4", "avi", "mov", "mkv"],
        }
    }

    /// The subdirectory of the upload root this kind is saved into.
    pub fn subdir(&self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Video => "videos",
        }
    }
}

/// Writes an upload into the kind's directory under an already-sanitized
/// filename. An existing file of the same name is overwritten.
pub async fn save_upload(
    upload_root: &Path,
    kind: UploadKind,
    filename: &str,
    bytes: &[u8],
) -> Result<()> {
    let dir = upload_root.join(kind.subdir());
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;

    tracing::info!("✅ Saved {} upload: {:?} ({} bytes)", kind.subdir(), path, bytes.len());
    Ok(())
}

/// Match candidates for an uploaded query face.
///
/// TODO: replace with a call to the recognition backend once one exists,
/// using the saved file as the query image.
pub fn image_matches() -> &'static [FaceMatch] {
    &[
        FaceMatch { label: "Person_A", score: 0.23, source: "suspect_ali_1.jpg" },
        FaceMatch { label: "Person_B", score: 0.41, source: "suspect_maria_2.png" },
        FaceMatch { label: "Unknown", score: 0.68, source: "unknown_3.png" },
    ]
}

/// Timeline of sightings for an uploaded video.
///
/// TODO: replace with frame-by-frame analysis against the query face once
/// the backend exists.
pub fn video_matches() -> &'static [TimelineMatch] {
    &[
        TimelineMatch { time: "00:05", label: "Person_A", score: 0.27 },
        TimelineMatch { time: "00:23", label: "Person_B", score: 0.35 },
        TimelineMatch { time: "01:02", label: "Unknown", score: 0.62 },
    ]
}
