//! Successful analysis results, one shape per endpoint.

use base64::Engine;
use serde::Serialize;
use serde_json::Value;

use super::endpoint::Endpoint;
use crate::error::{FormError, Result};

/// Prefix for rendering a base64 JPEG payload as an image source.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// The decoded success body of one endpoint.
///
/// Fields are only presence-checked; anything missing or of the wrong JSON
/// type is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Caption {
        caption: Option<String>,
    },
    Detection {
        image_data: Option<String>,
    },
    Combined {
        image_data: Option<String>,
        caption: Option<String>,
        tags: Vec<String>,
    },
}

impl AnalysisResult {
    /// Extract the endpoint-specific fields from a success body.
    pub fn from_body(endpoint: Endpoint, body: &Value) -> Self {
        let caption = string_field(body, "caption");
        let image_data = string_field(body, "image_data");
        match endpoint {
            Endpoint::GenerateCaption => Self::Caption { caption },
            Endpoint::DetectObjects => Self::Detection { image_data },
            Endpoint::ProcessImage => Self::Combined {
                image_data,
                caption,
                tags: body
                    .get("tags")
                    .and_then(Value::as_array)
                    .map(|tags| {
                        tags.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Caption { caption } | Self::Combined { caption, .. } => caption.as_deref(),
            Self::Detection { .. } => None,
        }
    }

    /// Raw base64 payload, if this result carries an image.
    pub fn image_data(&self) -> Option<&str> {
        match self {
            Self::Detection { image_data } | Self::Combined { image_data, .. } => {
                image_data.as_deref()
            }
            Self::Caption { .. } => None,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Combined { tags, .. } => tags,
            _ => &[],
        }
    }

    /// Image source for the annotated image, e.g. `data:image/jpeg;base64,...`.
    pub fn image_data_uri(&self) -> Option<String> {
        self.image_data().map(jpeg_data_uri)
    }

    /// Decode the base64 image payload into JPEG bytes.
    pub fn decode_image(&self) -> Result<Option<Vec<u8>>> {
        self.image_data()
            .map(|data| {
                base64::engine::general_purpose::STANDARD
                    .decode(data)
                    .map_err(|e| FormError::InvalidArgument(format!("Invalid base64 image: {e}")))
            })
            .transpose()
    }
}

pub fn jpeg_data_uri(base64_data: &str) -> String {
    format!("{JPEG_DATA_URI_PREFIX}{base64_data}")
}

fn string_field(body: &Value, name: &str) -> Option<String> {
    body.get(name).and_then(Value::as_str).map(str::to_string)
}
