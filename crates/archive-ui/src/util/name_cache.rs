use super::color::ColorScheme;
use hashbrown::HashMap;

/// Name to CSS color, filled on first use and kept for the page session.
///
/// Entries are never evicted: an archive page lists a bounded cast of speakers.
pub struct NameColorCache<S> {
    scheme: S,
    colors: HashMap<String, String>,
}

impl<S: ColorScheme> NameColorCache<S> {
    pub fn new(scheme: S) -> Self {
        Self {
            scheme,
            colors: HashMap::new(),
        }
    }

    pub fn color_of(&mut self, name: &str) -> &str {
        let scheme = &self.scheme;
        self.colors
            .entry_ref(name)
            .or_insert_with(|| scheme.color(name).to_string())
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
