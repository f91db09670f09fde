//! Shared test helpers: backend doubles and view assertions.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use vision_form::config::ClientConfig;
use vision_form::controller::FormController;
use vision_form::error::{FormError, Result};
use vision_form::transport::{Backend, HttpBackend};
use vision_form::types::{Endpoint, Submission};
use vision_form::view::{Element, ElementId, MemoryView, View};

/// Controller against a real HTTP backend at `base_url`, over a fresh page.
pub fn http_controller(endpoint: Endpoint, base_url: &str) -> FormController<HttpBackend, MemoryView> {
    let backend = HttpBackend::new(ClientConfig::new(base_url)).unwrap();
    FormController::new(endpoint, backend, MemoryView::page(endpoint.idle_label())).unwrap()
}

pub fn element(view: &MemoryView, id: ElementId) -> &Element {
    view.element(id).unwrap_or_else(|| panic!("missing element {id}"))
}

/// Result and error panels are never both visible, and the submit control
/// is back to its idle state.
pub fn assert_settled(view: &MemoryView, endpoint: Endpoint) {
    assert!(
        !(view.is_visible(ElementId::ResultPanel) && view.is_visible(ElementId::ErrorPanel)),
        "result and error panels are both visible"
    );
    let submit = element(view, ElementId::SubmitButton);
    assert!(!submit.disabled, "submit control left disabled");
    assert_eq!(submit.text, endpoint.idle_label());
}

/// A [`View`] whose state can be observed from elsewhere while a request
/// is in flight.
#[derive(Clone)]
pub struct SharedView(pub Arc<Mutex<MemoryView>>);

impl SharedView {
    pub fn page(label: &str) -> Self {
        Self(Arc::new(Mutex::new(MemoryView::page(label))))
    }

    pub fn snapshot(&self) -> MemoryView {
        self.0.lock().unwrap().clone()
    }
}

impl View for SharedView {
    fn has_element(&self, id: ElementId) -> bool {
        self.0.lock().unwrap().has_element(id)
    }

    fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        self.0.lock().unwrap().set_hidden(id, hidden);
    }

    fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.0.lock().unwrap().set_disabled(id, disabled);
    }

    fn text(&self, id: ElementId) -> Option<String> {
        self.0.lock().unwrap().text(id)
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        self.0.lock().unwrap().set_text(id, text);
    }

    fn set_src(&mut self, id: ElementId, src: Option<&str>) {
        self.0.lock().unwrap().set_src(id, src);
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        self.0.lock().unwrap().set_value(id, value);
    }

    fn clear_children(&mut self, id: ElementId) {
        self.0.lock().unwrap().clear_children(id);
    }

    fn append_child(&mut self, id: ElementId, text: &str) {
        self.0.lock().unwrap().append_child(id, text);
    }
}

/// Backend double that records what the view looked like mid-request and
/// then returns a canned reply.
pub struct SnoopingBackend {
    view: SharedView,
    reply: Mutex<Option<Result<Value>>>,
    seen: Mutex<Vec<(Submission, MemoryView)>>,
}

impl SnoopingBackend {
    pub fn new(view: SharedView, reply: Result<Value>) -> Self {
        Self {
            view,
            reply: Mutex::new(Some(reply)),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<(Submission, MemoryView)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for SnoopingBackend {
    async fn submit(&self, _endpoint: Endpoint, submission: &Submission) -> Result<Value> {
        self.seen
            .lock()
            .unwrap()
            .push((submission.clone(), self.view.snapshot()));
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(FormError::InvalidArgument("no reply queued".to_string())))
    }
}
