//! Convenience re-exports for common use.

pub use crate::config::ClientConfig;
pub use crate::controller::{FormController, UiState};
pub use crate::error::{FormError, Result};
pub use crate::transport::{Backend, HttpBackend};
pub use crate::types::{AnalysisResult, Endpoint, ImageFile, PreviewSource, Submission};
pub use crate::view::{ElementId, MemoryView, View};
