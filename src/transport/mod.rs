//! Backend transport: one multipart POST per submission.

pub mod http;
pub mod multipart;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{FormError, Result};
use crate::types::{Endpoint, Submission};
use crate::util::timeout::within;

pub use http::{shared_client, status_to_error};
pub use multipart::build_form_multipart;

/// Something that can accept a form submission for an endpoint.
///
/// Implementations return the parsed JSON body of a 2xx response, a
/// [`FormError::Application`] for any other status, and a transport-class
/// error when no usable response was obtained.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn submit(&self, endpoint: Endpoint, submission: &Submission) -> Result<Value>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn submit(&self, endpoint: Endpoint, submission: &Submission) -> Result<Value> {
        (**self).submit(endpoint, submission).await
    }
}

/// The analysis backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Bind to the backend described by `config`.
    ///
    /// The base URL is checked here so a misconfiguration is reported before
    /// any form is wired up, never as a submission failure.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client: shared_client().clone(),
        })
    }

    async fn submit_once(&self, url: String, submission: &Submission) -> Result<Value> {
        let boundary = format!("vision-form-{}", Uuid::new_v4().simple());
        let body = build_form_multipart(&boundary, submission);
        let content_type =
            HeaderValue::from_str(&format!("multipart/form-data; boundary={boundary}")).map_err(
                |e| FormError::InvalidArgument(format!("Failed to build multipart content-type: {e}")),
            )?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(status_to_error(status.as_u16(), &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn submit(&self, endpoint: Endpoint, submission: &Submission) -> Result<Value> {
        let url = self.config.endpoint_url(endpoint)?;
        debug!(%endpoint, %url, has_file = submission.file.is_some(), "Posting form");

        within(self.config.timeout(), self.submit_once(url, submission)).await
    }
}
