//! vision-form: form submission controllers for an image-analysis backend.
//!
//! Each page of the analysis UI (captioning, object detection, combined
//! analysis) is one [`FormController`](controller::FormController) bound to
//! one [`Endpoint`](types::Endpoint). The controller posts the form as
//! multipart to the backend and renders the JSON reply into a
//! [`View`](view::View).
//!
//! # Quick Start
//!
//! ```no_run
//! use vision_form::prelude::*;
//!
//! # async fn example() -> vision_form::error::Result<()> {
//! let backend = HttpBackend::new(ClientConfig::load(None)?)?;
//! let view = MemoryView::page(Endpoint::GenerateCaption.idle_label());
//! let mut controller = FormController::new(Endpoint::GenerateCaption, backend, view)?;
//!
//! controller.on_url_input("https://example.com/dog.jpg");
//! let result = controller.submit().await?;
//! println!("{}", result.caption().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod prelude;
pub mod transport;
pub mod types;
pub mod util;
pub mod view;

#[cfg(feature = "cli")]
pub mod cli;
