//! Headless document and manual clock for unit tests.
//!
//! Selectors support what the archive markup uses: comma-separated compounds of
//! an optional tag name followed by `.class` and `#id` parts.

use super::{Document, Element, Scheduler};
use crate::error::EnhanceError;
use hashbrown::HashMap;
use std::cell::RefCell;
use std::rc::Rc;

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    text: String,
    color: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
    handlers: Vec<Handler>,
}

#[derive(Clone, Default)]
pub struct MemoryDocument {
    nodes: Rc<RefCell<Vec<NodeData>>>,
}

#[derive(Clone)]
pub struct MemoryElement {
    doc: MemoryDocument,
    idx: usize,
}

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

fn parse_selector(selector: &str) -> Result<Vec<Compound>, EnhanceError> {
    selector
        .split(',')
        .map(|part| parse_compound(selector, part.trim()))
        .collect()
}

fn parse_compound(selector: &str, part: &str) -> Result<Compound, EnhanceError> {
    if part.is_empty() || part.contains(char::is_whitespace) {
        return Err(EnhanceError::invalid_selector(selector, "unsupported selector"));
    }
    let mut compound = Compound::default();
    let (tag, mut rest) = part.split_at(part.find(['.', '#']).unwrap_or(part.len()));
    if !tag.is_empty() {
        compound.tag = Some(tag.to_string());
    }
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        let starts_with_digit = name.starts_with(|c: char| c.is_ascii_digit());
        if name.is_empty() || starts_with_digit {
            return Err(EnhanceError::invalid_selector(selector, "bad identifier"));
        }
        if marker == '.' {
            compound.classes.push(name.to_string());
        } else {
            compound.id = Some(name.to_string());
        }
        rest = &body[end..];
    }
    Ok(compound)
}

impl Compound {
    fn matches(&self, node: &NodeData) -> bool {
        self.tag.as_ref().is_none_or(|tag| *tag == node.tag)
            && self
                .id
                .as_ref()
                .is_none_or(|id| node.attributes.get("id") == Some(id))
            && self.classes.iter().all(|class| node.classes.contains(class))
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, tag: &str, parent: Option<&MemoryElement>) -> MemoryElement {
        let mut nodes = self.nodes.borrow_mut();
        let idx = nodes.len();
        nodes.push(NodeData {
            tag: tag.to_string(),
            parent: parent.map(|p| p.idx),
            ..NodeData::default()
        });
        if let Some(parent) = parent {
            nodes[parent.idx].children.push(idx);
        }
        MemoryElement {
            doc: self.clone(),
            idx,
        }
    }

    fn descendants(&self, root: Option<usize>) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut stack: Vec<usize> = match root {
            Some(idx) => nodes[idx].children.iter().rev().copied().collect(),
            None => (0..nodes.len())
                .rev()
                .filter(|idx| nodes[*idx].parent.is_none())
                .collect(),
        };
        let mut order = Vec::new();
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(nodes[idx].children.iter().rev().copied());
        }
        order
    }

    fn select(&self, root: Option<usize>, selector: &str) -> Result<Vec<MemoryElement>, EnhanceError> {
        let compounds = parse_selector(selector)?;
        let candidates = self.descendants(root);
        let nodes = self.nodes.borrow();
        Ok(candidates
            .into_iter()
            .filter(|idx| compounds.iter().any(|c| c.matches(&nodes[*idx])))
            .map(|idx| MemoryElement {
                doc: self.clone(),
                idx,
            })
            .collect())
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<MemoryElement>, EnhanceError> {
        self.select(None, selector)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<MemoryElement>, EnhanceError> {
        Ok(self.select(None, selector)?.into_iter().next())
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let found = self
            .descendants(None)
            .into_iter()
            .find(|idx| self.nodes.borrow()[*idx].attributes.get("id").map(String::as_str) == Some(id));
        found.map(|idx| MemoryElement {
            doc: self.clone(),
            idx,
        })
    }
}

impl MemoryElement {
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.doc.nodes.borrow_mut()[self.idx]
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.doc.nodes.borrow_mut()[self.idx].text = text.to_string();
        self
    }

    pub fn color(&self) -> Option<String> {
        self.doc.nodes.borrow()[self.idx].color.clone()
    }

    pub fn class_count(&self, class: &str) -> usize {
        self.doc.nodes.borrow()[self.idx]
            .classes
            .iter()
            .filter(|c| *c == class)
            .count()
    }

    /// Runs the click handlers. They may mutate the document.
    pub fn click(&self) {
        let handlers = self.doc.nodes.borrow()[self.idx].handlers.clone();
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (*handler)();
        }
    }
}

impl Element for MemoryElement {
    type Listener = ();

    fn query_selector(&self, selector: &str) -> Result<Option<Self>, EnhanceError> {
        Ok(self.doc.select(Some(self.idx), selector)?.into_iter().next())
    }

    fn text(&self) -> String {
        let mut text = self.doc.nodes.borrow()[self.idx].text.clone();
        for idx in self.doc.descendants(Some(self.idx)) {
            text.push_str(&self.doc.nodes.borrow()[idx].text);
        }
        text
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.doc.nodes.borrow()[self.idx].attributes.get(name).cloned()
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_count(class) > 0
    }

    fn add_class(&self, class: &str) {
        let mut nodes = self.doc.nodes.borrow_mut();
        let classes = &mut nodes[self.idx].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.doc.nodes.borrow_mut()[self.idx]
            .classes
            .retain(|c| c != class);
    }

    fn set_text_color(&self, color: &str) {
        self.doc.nodes.borrow_mut()[self.idx].color = Some(color.to_string());
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Self::Listener {
        self.doc.nodes.borrow_mut()[self.idx]
            .handlers
            .push(Rc::new(RefCell::new(handler)));
    }
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    pending: Vec<(u64, Box<dyn FnOnce()>)>,
}

/// A clock that only moves when told to.
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<Clock>>);

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Moves time forward, running due tasks in deadline order.
    pub fn advance(&self, ms: u64) {
        let deadline = self.0.borrow().now_ms + ms;
        loop {
            let next = {
                let mut clock = self.0.borrow_mut();
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _))| *at <= deadline)
                    .min_by_key(|(_, (at, _))| *at)
                    .map(|(pos, _)| pos);
                due.map(|pos| clock.pending.remove(pos))
            };
            let Some((at, task)) = next else { break };
            self.0.borrow_mut().now_ms = at;
            task();
        }
        self.0.borrow_mut().now_ms = deadline;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut clock = self.0.borrow_mut();
        let at = clock.now_ms + u64::from(delay_ms);
        clock.pending.push((at, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_class_id_and_tag() {
        let doc = MemoryDocument::new();
        let log = doc.create("div", None).with_class("log").with_attribute("id", "msg-1");
        let speaker = doc.create("span", Some(&log)).with_class("speaker").with_text("Alice");
        doc.create("a", None).with_class("reply-to-link");

        assert_eq!(1, doc.query_selector_all(".log").unwrap().len());
        assert_eq!(2, doc.query_selector_all(".log, a.reply-to-link").unwrap().len());
        assert!(doc.query_selector("div#msg-1.log").unwrap().is_some());
        assert!(doc.query_selector("span.log").unwrap().is_none());
        let found = log.query_selector(".speaker").unwrap().unwrap();
        assert_eq!(speaker.idx, found.idx);
        assert_eq!("Alice", log.text());
    }

    #[test]
    fn rejects_unsupported_selectors() {
        let doc = MemoryDocument::new();
        assert!(doc.query_selector("#123").is_err());
        assert!(doc.query_selector(".log .speaker").is_err());
        assert!(doc.query_selector("").is_err());
    }

    #[test]
    fn clock_runs_tasks_when_due() {
        let scheduler = ManualScheduler::default();
        let fired = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "late"), (100, "early")] {
            let fired = fired.clone();
            scheduler.schedule(delay, Box::new(move || fired.borrow_mut().push(label)));
        }
        scheduler.advance(99);
        assert!(fired.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(vec!["early"], *fired.borrow());
        scheduler.advance(500);
        assert_eq!(vec!["early", "late"], *fired.borrow());
        assert_eq!(0, scheduler.pending());
    }
}
