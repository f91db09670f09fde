//! Form submission controller: one form, one endpoint, one view.
//!
//! A controller owns the form's inputs and the page's UI state. Each
//! submission walks `Idle -> Submitting -> Success | Failure`; the backend
//! call is the only suspension point, and every path ends with the submit
//! control enabled and its original label restored.

mod render;

pub use render::{LOADING_TEXT, NO_TAGS_TEXT};

use strum::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::{FormError, Result};
use crate::transport::Backend;
use crate::types::{AnalysisResult, Endpoint, ImageFile, Submission};
use crate::view::{ElementId, View};

/// Where the page is in its submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UiState {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight; the submit control is disabled.
    Submitting,
    /// The last submission rendered a result.
    Success,
    /// The last submission rendered an error.
    Failure,
}

impl UiState {
    /// Whether the form accepts a new submission.
    pub fn is_settled(self) -> bool {
        self != Self::Submitting
    }
}

/// Elements a controller for `endpoint` cannot work without.
pub fn required_elements(endpoint: Endpoint) -> Vec<ElementId> {
    let mut ids = vec![
        ElementId::Form,
        ElementId::FileInput,
        ElementId::UrlInput,
        ElementId::SubmitButton,
        ElementId::ResultPanel,
        ElementId::ImagePreview,
        ElementId::ErrorPanel,
        ElementId::ErrorMessage,
    ];
    if endpoint.renders_caption() {
        ids.push(ElementId::CaptionOutput);
    }
    if endpoint.renders_image() {
        ids.push(ElementId::ResultImage);
    }
    if endpoint.renders_tags() {
        ids.push(ElementId::TagList);
    }
    ids
}

/// Mediates one form's lifecycle against one backend endpoint.
pub struct FormController<B, V> {
    endpoint: Endpoint,
    backend: B,
    view: V,
    form: Submission,
    state: UiState,
    submit_label: String,
}

impl<B: Backend, V: View> FormController<B, V> {
    /// Bind a controller to a view, checking that every element it needs exists.
    pub fn new(endpoint: Endpoint, backend: B, view: V) -> Result<Self> {
        if let Some(missing) = required_elements(endpoint)
            .into_iter()
            .find(|id| !view.has_element(*id))
        {
            error!(%endpoint, element = %missing, "Form is missing a required element");
            return Err(FormError::MissingElement(missing));
        }

        let submit_label = view
            .text(ElementId::SubmitButton)
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| endpoint.idle_label().to_string());

        Ok(Self {
            endpoint,
            backend,
            view,
            form: Submission::default(),
            state: UiState::Idle,
            submit_label,
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Current form contents.
    pub fn form(&self) -> &Submission {
        &self.form
    }

    /// Replace the form contents wholesale, e.g. from a script.
    pub fn set_form(&mut self, submission: Submission) {
        let file_name = submission
            .file
            .as_ref()
            .map(|f| f.file_name.clone())
            .unwrap_or_default();
        self.view.set_value(ElementId::FileInput, &file_name);
        self.view.set_value(ElementId::UrlInput, submission.url_value());
        self.form = submission;
    }

    /// File input changed: take the file and clear the URL input.
    pub fn on_file_change(&mut self, file: Option<ImageFile>) {
        let name = file.as_ref().map(|f| f.file_name.as_str()).unwrap_or_default();
        self.view.set_value(ElementId::FileInput, name);
        self.view.set_value(ElementId::UrlInput, "");
        self.form.file = file;
        self.form.url = None;
    }

    /// URL input edited: take the URL and clear the file input.
    pub fn on_url_input(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.view.set_value(ElementId::UrlInput, &url);
        self.view.set_value(ElementId::FileInput, "");
        self.form.file = None;
        self.form.url = Some(url);
    }

    /// Submit the form and render the outcome.
    ///
    /// The returned error has already been rendered into the error panel;
    /// the controller stays usable either way.
    pub async fn submit(&mut self) -> Result<AnalysisResult> {
        self.run(None).await
    }

    /// Like [`submit`](Self::submit), settling as a failure if `cancel`
    /// fires before the backend answers.
    pub async fn submit_with_cancel(&mut self, cancel: CancellationToken) -> Result<AnalysisResult> {
        self.run(Some(cancel)).await
    }

    async fn run(&mut self, cancel: Option<CancellationToken>) -> Result<AnalysisResult> {
        self.begin();

        let request = self.backend.submit(self.endpoint, &self.form);
        let reply = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(FormError::Cancelled),
                reply = request => reply,
            },
            None => request.await,
        };

        let outcome = reply.map(|body| AnalysisResult::from_body(self.endpoint, &body));
        self.settle(&outcome);
        outcome
    }

    fn begin(&mut self) {
        debug!(endpoint = %self.endpoint, "Submitting form");
        self.state = UiState::Submitting;

        self.view.set_hidden(ElementId::ResultPanel, true);
        self.view.set_hidden(ElementId::ErrorPanel, true);
        self.view.set_disabled(ElementId::SubmitButton, true);
        self.view
            .set_text(ElementId::SubmitButton, self.endpoint.busy_label());

        render::clear_result(&mut self.view, self.endpoint);
        if self.endpoint.renders_caption() {
            self.view.set_text(ElementId::CaptionOutput, LOADING_TEXT);
        }

        match self.form.preview_source() {
            Some(preview) => {
                self.view.set_src(ElementId::ImagePreview, Some(preview.src()));
                self.view.set_hidden(ElementId::ResultPanel, false);
            }
            None => self.view.set_src(ElementId::ImagePreview, None),
        }
    }

    fn settle(&mut self, outcome: &Result<AnalysisResult>) {
        match outcome {
            Ok(result) => {
                render::render_result(&mut self.view, self.endpoint, result);
                self.view.set_hidden(ElementId::ResultPanel, false);
                self.state = UiState::Success;
                info!(endpoint = %self.endpoint, "Rendered analysis result");
            }
            Err(err) => {
                render::clear_result(&mut self.view, self.endpoint);
                self.view.set_hidden(ElementId::ResultPanel, true);
                self.view
                    .set_text(ElementId::ErrorMessage, &err.user_message());
                self.view.set_hidden(ElementId::ErrorPanel, false);
                self.state = UiState::Failure;
                warn!(endpoint = %self.endpoint, error = %err, "Submission failed");
            }
        }

        self.view.set_disabled(ElementId::SubmitButton, false);
        self.view
            .set_text(ElementId::SubmitButton, &self.submit_label);
    }
}
