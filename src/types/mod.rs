//! Core types for vision-form.

pub mod endpoint;
pub mod result;
pub mod submission;

pub use endpoint::*;
pub use result::*;
pub use submission::*;
