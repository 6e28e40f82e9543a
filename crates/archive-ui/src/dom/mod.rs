//! The slice of the DOM the enhancements touch.
//!
//! [`web`] drives the browser through `web-sys`. Unit tests run against the
//! headless `memory` document instead.

use crate::error::EnhanceError;

#[cfg(test)]
pub mod memory;
pub mod web;

pub trait Document: Clone + 'static {
    type Element: Element;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, EnhanceError>;

    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, EnhanceError>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

pub trait Element: Clone + 'static {
    /// Keeps the handler registered while alive.
    type Listener;

    /// First descendant matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self>, EnhanceError>;

    /// Rendered text of the element and its descendants.
    fn text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn set_text_color(&self, color: &str);

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Self::Listener;
}

/// One-shot deferred tasks.
pub trait Scheduler: Clone + 'static {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}
