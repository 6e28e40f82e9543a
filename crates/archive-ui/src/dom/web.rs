use super::{Document, Element, Scheduler};
use crate::error::EnhanceError;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use log::warn;
use wasm_bindgen::JsCast;

#[derive(Clone)]
pub struct WebDocument(pub web_sys::Document);

impl WebDocument {
    /// The document of the global `window`.
    pub fn current() -> Result<Self, EnhanceError> {
        let window = web_sys::window().ok_or(EnhanceError::NoWindow)?;
        let document = window.document().ok_or(EnhanceError::NoDocument)?;
        Ok(Self(document))
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<WebElement>, EnhanceError> {
        let nodes = self
            .0
            .query_selector_all(selector)
            .map_err(|err| EnhanceError::from_js(selector, &err))?;
        Ok((0..nodes.length())
            .filter_map(|idx| nodes.get(idx))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect())
    }

    fn query_selector(&self, selector: &str) -> Result<Option<WebElement>, EnhanceError> {
        self.0
            .query_selector(selector)
            .map(|found| found.map(WebElement))
            .map_err(|err| EnhanceError::from_js(selector, &err))
    }

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }
}

#[derive(Clone)]
pub struct WebElement(pub web_sys::Element);

impl Element for WebElement {
    type Listener = EventListener;

    fn query_selector(&self, selector: &str) -> Result<Option<Self>, EnhanceError> {
        self.0
            .query_selector(selector)
            .map(|found| found.map(WebElement))
            .map_err(|err| EnhanceError::from_js(selector, &err))
    }

    fn text(&self) -> String {
        match self.0.dyn_ref::<web_sys::HtmlElement>() {
            Some(html_el) => html_el.inner_text(),
            None => self.0.text_content().unwrap_or_default(),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            warn!("Cannot add class `{class}` - {err:?}");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            warn!("Cannot remove class `{class}` - {err:?}");
        }
    }

    fn set_text_color(&self, color: &str) {
        if let Some(html_el) = self.0.dyn_ref::<web_sys::HtmlElement>()
            && let Err(err) = html_el.style().set_property("color", color)
        {
            warn!("Cannot set color `{color}` - {err:?}");
        }
    }

    fn on_click(&self, mut handler: Box<dyn FnMut()>) -> EventListener {
        EventListener::new(&self.0, "click", move |_event| handler())
    }
}

/// Deferred tasks on the browser's timer queue.
#[derive(Clone, Copy, Default)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // Fire-and-forget: the timer drops itself after running.
        Timeout::new(delay_ms, task).forget();
    }
}
