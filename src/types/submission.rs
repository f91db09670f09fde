//! Form submission inputs.

use std::fmt;
use std::path::Path;

use bon::Builder;
use uuid::Uuid;

use crate::error::{FormError, Result};

/// A local image chosen through the file input.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read an image from disk, guessing the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                FormError::InvalidArgument(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        let data = std::fs::read(path)?;
        let mime_type = mime_type_for_file_name(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            data,
        })
    }
}

/// MIME type a browser would attach to a file with this name.
pub fn mime_type_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Where the preview image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    /// Locally synthesized reference to the selected file.
    ObjectUrl(String),
    /// The URL the user typed, used as-is.
    Remote(String),
}

impl PreviewSource {
    pub fn src(&self) -> &str {
        match self {
            Self::ObjectUrl(src) | Self::Remote(src) => src,
        }
    }
}

/// The form contents for one submission.
///
/// Both inputs are sent when both are set; the backend decides which one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct Submission {
    pub file: Option<ImageFile>,
    #[builder(into)]
    pub url: Option<String>,
}

impl Submission {
    pub fn from_file(file: ImageFile) -> Self {
        Self {
            file: Some(file),
            url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            file: None,
            url: Some(url.into()),
        }
    }

    /// URL field value as the form would encode it.
    pub fn url_value(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// Preview for immediate display. The file wins over the URL.
    pub fn preview_source(&self) -> Option<PreviewSource> {
        if self.file.is_some() {
            return Some(PreviewSource::ObjectUrl(format!(
                "blob:vision-form/{}",
                Uuid::new_v4()
            )));
        }
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| PreviewSource::Remote(url.to_string()))
    }
}
