//! CLI entry point for vision-form.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::ClientConfig;
use crate::controller::FormController;
use crate::error::{FormError, Result};
use crate::transport::HttpBackend;
use crate::types::{AnalysisResult, Endpoint, ImageFile, Submission};
use crate::view::{ElementId, MemoryView, View};

/// Submit images to the analysis backend
#[derive(Parser, Debug)]
#[command(name = "vision-form", version, about = "Image captioning and object detection client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a caption for an image
    Caption(ImageArgs),
    /// Detect objects and save the annotated image
    Detect(ImageArgs),
    /// Caption, tag and annotate an image
    Analyze(ImageArgs),
}

impl Commands {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Caption(_) => Endpoint::GenerateCaption,
            Self::Detect(_) => Endpoint::DetectObjects,
            Self::Analyze(_) => Endpoint::ProcessImage,
        }
    }

    pub fn args(&self) -> &ImageArgs {
        match self {
            Self::Caption(args) | Self::Detect(args) | Self::Analyze(args) => args,
        }
    }
}

/// Arguments shared by every analysis subcommand.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Local image to upload
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Remote image URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Backend base URL (overrides config and environment)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Config file (defaults to ~/.vision-form/vision-form.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write the returned JPEG
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl ImageArgs {
    pub fn submission(&self) -> Result<Submission> {
        let file = self.file.as_deref().map(ImageFile::from_path).transpose()?;
        Ok(Submission {
            file,
            url: self.url.clone(),
        })
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::load(self.config.as_deref())?;
        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }
}

/// Run one subcommand, printing the rendered page.
///
/// Returns `Ok(false)` when the submission failed and its error message has
/// already been printed; `Err` is reserved for failures before submitting
/// or while saving the image.
pub async fn run(command: Commands) -> Result<bool> {
    let endpoint = command.endpoint();
    let args = command.args();

    let backend = HttpBackend::new(args.client_config()?)?;
    let view = MemoryView::page(endpoint.idle_label());
    let mut controller = FormController::new(endpoint, backend, view)?;
    controller.set_form(args.submission()?);

    let outcome = controller.submit().await;
    let view = controller.into_view();

    match outcome {
        Ok(result) => {
            print_result(&view, endpoint);
            match &args.out {
                Some(out) => write_image(&result, out)?,
                None => {
                    if let Some(line) = unsaved_image_summary(&result)? {
                        println!("{line}");
                    }
                }
            }
            Ok(true)
        }
        Err(err) => {
            tracing::debug!(error = %err, category = ?err.category(), "Submission failed");
            eprintln!("{}", view.text(ElementId::ErrorMessage).unwrap_or_default());
            Ok(false)
        }
    }
}

fn print_result(view: &MemoryView, endpoint: Endpoint) {
    if endpoint.renders_caption() {
        if let Some(caption) = view.element(ElementId::CaptionOutput) {
            println!("Caption: {}", caption.text);
        }
    }
    if endpoint.renders_tags() {
        if let Some(tags) = view.element(ElementId::TagList) {
            if tags.children.is_empty() {
                println!("Tags: {}", tags.text);
            } else {
                println!("Tags: {}", tags.children.join(", "));
            }
        }
    }
}

/// One-line note for an annotated image that was returned but not saved.
fn unsaved_image_summary(result: &AnalysisResult) -> Result<Option<String>> {
    Ok(result.decode_image()?.map(|bytes| {
        format!("Image: {} bytes (not saved; pass --out to write it)", bytes.len())
    }))
}

fn write_image(result: &AnalysisResult, out: &Path) -> Result<()> {
    let bytes = result.decode_image()?.ok_or_else(|| {
        FormError::InvalidArgument("The backend returned no image to write".to_string())
    })?;
    std::fs::write(out, bytes)?;
    println!("Image: {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detect_with_url_and_out() {
        let cli = Cli::try_parse_from([
            "vision-form",
            "detect",
            "--url",
            "https://example.com/street.jpg",
            "--out",
            "boxes.jpg",
        ])
        .unwrap();

        assert_eq!(cli.command.endpoint(), Endpoint::DetectObjects);
        let args = cli.command.args();
        assert_eq!(args.url.as_deref(), Some("https://example.com/street.jpg"));
        assert_eq!(args.out.as_deref(), Some(Path::new("boxes.jpg")));
    }

    #[test]
    fn parse_analyze_with_base_url() {
        let cli = Cli::try_parse_from([
            "vision-form",
            "analyze",
            "-f",
            "cat.png",
            "--base-url",
            "http://gpu-box:5000",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Analyze(_)));
        assert_eq!(cli.command.args().base_url.as_deref(), Some("http://gpu-box:5000"));
    }

    #[test]
    fn returned_image_is_summarised_without_out() {
        let body = serde_json::json!({"image_data": "AAECAw=="});
        let result = AnalysisResult::from_body(Endpoint::DetectObjects, &body);
        assert_eq!(
            unsaved_image_summary(&result).unwrap().as_deref(),
            Some("Image: 4 bytes (not saved; pass --out to write it)")
        );

        let caption = AnalysisResult::from_body(
            Endpoint::GenerateCaption,
            &serde_json::json!({"caption": "a dog"}),
        );
        assert_eq!(unsaved_image_summary(&caption).unwrap(), None);
    }

    #[test]
    fn missing_file_is_reported_before_submitting() {
        let args = ImageArgs {
            file: Some(PathBuf::from("/definitely/not/here.png")),
            url: None,
            base_url: None,
            config: None,
            out: None,
        };
        assert!(matches!(args.submission(), Err(FormError::Io(_))));
    }
}
