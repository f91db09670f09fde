//! Rendering a successful result into the view.

use crate::types::{AnalysisResult, Endpoint};
use crate::view::{ElementId, View};

pub const LOADING_TEXT: &str = "Loading...";

pub const NO_TAGS_TEXT: &str = "No tags were generated.";

pub(super) fn render_result<V: View>(view: &mut V, endpoint: Endpoint, result: &AnalysisResult) {
    if endpoint.renders_caption() {
        view.set_text(ElementId::CaptionOutput, result.caption().unwrap_or_default());
    }

    if endpoint.renders_image() {
        let src = result.image_data_uri();
        view.set_src(ElementId::ResultImage, src.as_deref());
    }

    if endpoint.renders_tags() {
        view.clear_children(ElementId::TagList);
        let tags = result.tags();
        if tags.is_empty() {
            view.set_text(ElementId::TagList, NO_TAGS_TEXT);
        }
        for tag in tags {
            view.append_child(ElementId::TagList, tag);
        }
    }
}

/// Drop whatever the previous submission rendered.
pub(super) fn clear_result<V: View>(view: &mut V, endpoint: Endpoint) {
    if endpoint.renders_caption() {
        view.set_text(ElementId::CaptionOutput, "");
    }
    if endpoint.renders_image() {
        view.set_src(ElementId::ResultImage, None);
    }
    if endpoint.renders_tags() {
        view.clear_children(ElementId::TagList);
    }
}
