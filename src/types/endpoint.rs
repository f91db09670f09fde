//! Backend endpoints and their per-page labels.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the backend analysis endpoints a form can be bound to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    /// `/generate_caption`: returns a caption.
    #[strum(to_string = "generate_caption", serialize = "caption")]
    GenerateCaption,
    /// `/detect_objects`: returns an annotated JPEG.
    #[strum(to_string = "detect_objects", serialize = "detect")]
    DetectObjects,
    /// `/process_image`: returns an annotated JPEG, a caption and tags.
    #[strum(to_string = "process_image", serialize = "analyze")]
    ProcessImage,
}

impl Endpoint {
    /// Request path, relative to the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::GenerateCaption => "/generate_caption",
            Self::DetectObjects => "/detect_objects",
            Self::ProcessImage => "/process_image",
        }
    }

    /// Submit label while no request is in flight.
    pub fn idle_label(self) -> &'static str {
        match self {
            Self::GenerateCaption => "Generate Caption",
            Self::DetectObjects => "Detect Objects",
            Self::ProcessImage => "Analyze Image",
        }
    }

    /// Submit label while a request is in flight.
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::GenerateCaption => "Generating...",
            Self::DetectObjects => "Detecting...",
            Self::ProcessImage => "Analyzing...",
        }
    }

    pub fn renders_caption(self) -> bool {
        matches!(self, Self::GenerateCaption | Self::ProcessImage)
    }

    pub fn renders_image(self) -> bool {
        matches!(self, Self::DetectObjects | Self::ProcessImage)
    }

    pub fn renders_tags(self) -> bool {
        matches!(self, Self::ProcessImage)
    }
}
