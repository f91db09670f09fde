//! The element tree a form controller renders into.

mod memory;

pub use memory::{Element, MemoryView};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Identifiers of the page elements a controller touches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ElementId {
    Form,
    FileInput,
    UrlInput,
    SubmitButton,
    /// Panel revealed on success; also hosts the preview.
    ResultPanel,
    ImagePreview,
    CaptionOutput,
    /// Annotated image returned by the backend.
    ResultImage,
    TagList,
    ErrorPanel,
    ErrorMessage,
}

/// Mutable element tree, the controller's only output channel.
///
/// Operations on an element that does not exist are ignored; controllers
/// check for their elements once, up front, with [`View::has_element`].
pub trait View {
    fn has_element(&self, id: ElementId) -> bool;

    fn set_hidden(&mut self, id: ElementId, hidden: bool);

    fn set_disabled(&mut self, id: ElementId, disabled: bool);

    /// Text content of an element, if it exists.
    fn text(&self, id: ElementId) -> Option<String>;

    /// Replace the element's text content, dropping any children.
    fn set_text(&mut self, id: ElementId, text: &str);

    /// Set or remove an image source.
    fn set_src(&mut self, id: ElementId, src: Option<&str>);

    /// Set an input's value; an empty string clears it.
    fn set_value(&mut self, id: ElementId, value: &str);

    fn clear_children(&mut self, id: ElementId);

    /// Append a child element carrying `text`.
    fn append_child(&mut self, id: ElementId, text: &str);
}
