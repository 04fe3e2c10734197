use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::FormError;

/// Largest résumé the form accepts: 5 MiB. A file of exactly this size is
/// still accepted.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Media types a résumé may carry: PDF, DOC, DOCX.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A candidate résumé held by the form. Size and media type are fixed at
/// construction so selection can be validated without touching the bytes;
/// the contents are only read (and base64-encoded) at submit time.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub media_type: String,
    len: u64,
    contents: FileContents,
}

#[derive(Debug, Clone)]
enum FileContents {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ResumeFile {
    /// A file picked from disk. Size comes from metadata; the media type
    /// is inferred from the extension. Unknown extensions are carried as
    /// `application/octet-stream` and rejected at selection time.
    pub fn from_path(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let media_type = media_type_for(&path).to_string();
        Ok(Self {
            filename,
            media_type,
            len: metadata.len(),
            contents: FileContents::Path(path),
        })
    }

    /// A file already held in memory.
    pub fn from_bytes(
        filename: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            len: bytes.len() as u64,
            contents: FileContents::Bytes(bytes),
        }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the file and base64-encodes it. The read is the one async
    /// suspend point of the encoding step; a failed read aborts the
    /// submission as `EncodingFailed`.
    pub async fn read_base64(&self) -> Result<String, FormError> {
        let encoded = match &self.contents {
            FileContents::Bytes(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
            FileContents::Path(path) => {
                let bytes = tokio::fs::read(path).await?;
                base64::engine::general_purpose::STANDARD.encode(bytes)
            }
        };
        Ok(encoded)
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_media_type_inference() {
        assert_eq!(media_type_for(Path::new("cv.pdf")), "application/pdf");
        assert_eq!(media_type_for(Path::new("cv.PDF")), "application/pdf");
        assert_eq!(media_type_for(Path::new("cv.doc")), "application/msword");
        assert_eq!(
            media_type_for(Path::new("cv.docx")),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            media_type_for(Path::new("photo.png")),
            "application/octet-stream"
        );
        assert_eq!(
            media_type_for(Path::new("no-extension")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_bytes_backed_file_encodes_contents() {
        let file = ResumeFile::from_bytes("cv.pdf", "application/pdf", b"resume bytes".to_vec());
        assert_eq!(file.len(), 12);
        let encoded = file.read_base64().await.unwrap();
        assert_eq!(encoded, "cmVzdW1lIGJ5dGVz");
    }

    #[tokio::test]
    async fn test_path_backed_file_reads_from_disk() {
        let mut temp = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        temp.write_all(b"resume bytes").unwrap();

        let file = ResumeFile::from_path(temp.path()).unwrap();
        assert_eq!(file.media_type, "application/pdf");
        assert_eq!(file.len(), 12);
        assert_eq!(file.read_base64().await.unwrap(), "cmVzdW1lIGJ5dGVz");
    }

    #[tokio::test]
    async fn test_missing_file_fails_encoding() {
        let mut temp = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        temp.write_all(b"resume bytes").unwrap();
        let file = ResumeFile::from_path(temp.path()).unwrap();
        temp.close().unwrap(); // deletes the file

        assert!(matches!(
            file.read_base64().await,
            Err(FormError::EncodingFailed(_))
        ));
    }
}
