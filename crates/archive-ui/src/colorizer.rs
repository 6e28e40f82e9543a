use crate::config::Markup;
use crate::dom::{Document, Element};
use crate::error::EnhanceError;
use crate::util::color::ColorScheme;
use crate::util::name_cache::NameColorCache;
use log::{debug, trace};

/// Paints speaker and character names in their hashed colors.
pub struct NameColorizer<S> {
    cache: NameColorCache<S>,
}

impl<S: ColorScheme> NameColorizer<S> {
    pub fn new(scheme: S) -> Self {
        Self {
            cache: NameColorCache::new(scheme),
        }
    }

    pub fn cache(&self) -> &NameColorCache<S> {
        &self.cache
    }

    /// Colors log entries, reply previews and character references.
    /// Returns how many elements were colored.
    pub fn colorize<D: Document>(&mut self, document: &D, markup: &Markup) -> Result<usize, EnhanceError> {
        let mut colored = 0;
        for container in [&markup.log_entry, &markup.reply_preview] {
            for entry in document.query_selector_all(container)? {
                // The entry carries the color so the speaker and its text share it.
                if let Some(speaker) = entry.query_selector(&markup.speaker)?
                    && self.paint(&entry, &speaker.text())
                {
                    colored += 1;
                }
            }
        }
        for character in document.query_selector_all(&markup.character)? {
            if self.paint(&character, &character.text()) {
                colored += 1;
            }
        }
        debug!(
            "Colored {colored} element(s) using {} distinct name(s)",
            self.cache.len()
        );
        Ok(colored)
    }

    /// Leading and trailing whitespace is trimmed before hashing, so a name
    /// padded by template indentation keeps its color. Names with inner
    /// whitespace are hashed as rendered.
    fn paint<E: Element>(&mut self, element: &E, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let color = self.cache.color_of(name);
        trace!("{name} -> {color}");
        element.set_text_color(color);
        true
    }
}
