use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::{ElementId, View};

/// State of a single element in a [`MemoryView`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub hidden: bool,
    pub disabled: bool,
    pub text: String,
    pub src: Option<String>,
    pub value: String,
    pub children: Vec<String>,
}

/// Headless in-memory [`View`].
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    elements: HashMap<ElementId, Element>,
}

impl MemoryView {
    /// A view with no elements at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A view with every known element, panels hidden and the submit
    /// control labelled `submit_label`.
    pub fn page(submit_label: &str) -> Self {
        let mut view = Self::default();
        for id in ElementId::iter() {
            view.elements.insert(id, Element::default());
        }
        view.set_hidden(ElementId::ResultPanel, true);
        view.set_hidden(ElementId::ErrorPanel, true);
        view.set_text(ElementId::SubmitButton, submit_label);
        view
    }

    pub fn with_element(mut self, id: ElementId) -> Self {
        self.elements.entry(id).or_default();
        self
    }

    pub fn without_element(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Whether the element exists and is not hidden.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|el| !el.hidden)
    }

    fn update(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.elements.get_mut(&id) {
            f(el);
        }
    }
}

impl View for MemoryView {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        self.update(id, |el| el.hidden = hidden);
    }

    fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.update(id, |el| el.disabled = disabled);
    }

    fn text(&self, id: ElementId) -> Option<String> {
        self.element(id).map(|el| el.text.clone())
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        self.update(id, |el| {
            el.children.clear();
            el.text = text.to_string();
        });
    }

    fn set_src(&mut self, id: ElementId, src: Option<&str>) {
        self.update(id, |el| el.src = src.map(str::to_string));
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        self.update(id, |el| el.value = value.to_string());
    }

    fn clear_children(&mut self, id: ElementId) {
        self.update(id, |el| {
            el.children.clear();
            el.text.clear();
        });
    }

    fn append_child(&mut self, id: ElementId, text: &str) {
        self.update(id, |el| el.children.push(text.to_string()));
    }
}
