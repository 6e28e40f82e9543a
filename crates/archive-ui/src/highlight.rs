//! Flashes the message a reply points at when its reply link is clicked.

use crate::config::Markup;
use crate::dom::{Document, Element, Scheduler};
use crate::error::EnhanceError;
use log::{debug, trace, warn};
use std::rc::Rc;

/// Where a reply link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTarget {
    /// Bare fragment after `#`, looked up as an element id.
    Id(String),
    Selector(String),
}

/// Characters that make a fragment part of a larger selector.
const SELECTOR_SYNTAX: &[char] = &['.', '#', '>', '+', '~', '[', ']', '(', ')', ':', ',', '*', '=', '"', '\''];

fn is_bare_fragment(fragment: &str) -> bool {
    !fragment
        .chars()
        .any(|c| c.is_whitespace() || SELECTOR_SYNTAX.contains(&c))
}

/// Empty, or a page address such as `/archive/3/`, `log.html` or `?page=2`.
fn is_url_prefix(prefix: &str) -> bool {
    prefix.is_empty()
        || (!prefix.contains(char::is_whitespace)
            && (prefix.contains('/')
                || prefix.starts_with('?')
                || prefix.ends_with(".html")
                || prefix.ends_with(".htm")))
}

impl ReplyTarget {
    /// `#msg-1` and `page.html#msg-1` name an element id. Everything else,
    /// such as `#msg-1 > .body` or `div#msg-1`, is a selector.
    pub fn parse(reference: &str) -> Option<ReplyTarget> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        match reference.split_once('#') {
            Some((prefix, fragment)) if is_url_prefix(prefix) && is_bare_fragment(fragment) => {
                (!fragment.is_empty()).then(|| ReplyTarget::Id(fragment.to_string()))
            }
            _ => Some(ReplyTarget::Selector(reference.to_string())),
        }
    }

    pub fn resolve<D: Document>(&self, document: &D) -> Result<Option<D::Element>, EnhanceError> {
        match self {
            ReplyTarget::Id(id) => Ok(document.element_by_id(id)),
            ReplyTarget::Selector(selector) => document.query_selector(selector),
        }
    }
}

struct Flash<D, S> {
    document: D,
    scheduler: S,
    target_attribute: String,
    class: Rc<str>,
    delay_ms: u32,
}

impl<D: Document, S: Scheduler> Flash<D, S> {
    fn on_click(&self, link: &D::Element) {
        let Some(reference) = link.attribute(&self.target_attribute) else {
            debug!("Reply link has no `{}` attribute", self.target_attribute);
            return;
        };
        let Some(target) = ReplyTarget::parse(&reference) else {
            debug!("Reply link points nowhere: `{reference}`");
            return;
        };
        let element = match target.resolve(&self.document) {
            Ok(Some(element)) => element,
            Ok(None) => {
                debug!("Reply target {target:?} is not on this page");
                return;
            }
            Err(err) => {
                warn!("Cannot resolve reply target - {err}");
                return;
            }
        };
        trace!("Highlighting {target:?}");
        element.remove_class(&self.class);
        let class = self.class.clone();
        self.scheduler
            .schedule(self.delay_ms, Box::new(move || element.add_class(&class)));
    }
}

/// Holds the click listeners of every reply link present at attach time.
pub struct ReplyHighlighter<E: Element> {
    listeners: Vec<E::Listener>,
}

impl<E: Element> ReplyHighlighter<E> {
    pub fn attach<D, S>(
        document: &D,
        scheduler: &S,
        markup: &Markup,
        delay_ms: u32,
    ) -> Result<Self, EnhanceError>
    where
        D: Document<Element = E>,
        S: Scheduler,
    {
        let flash = Rc::new(Flash {
            document: document.clone(),
            scheduler: scheduler.clone(),
            target_attribute: markup.reply_target_attribute.clone(),
            class: Rc::from(markup.highlight_class.as_str()),
            delay_ms,
        });
        let listeners: Vec<_> = document
            .query_selector_all(&markup.reply_link)?
            .into_iter()
            .map(|link| {
                let flash = flash.clone();
                let clicked = link.clone();
                link.on_click(Box::new(move || flash.on_click(&clicked)))
            })
            .collect();
        debug!("Attached {} reply link(s)", listeners.len());
        Ok(Self { listeners })
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
