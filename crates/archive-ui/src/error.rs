use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("no global `window` is available")]
    NoWindow,
    #[error("`window` has no document")]
    NoDocument,
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("cannot parse configuration")]
    Config(#[from] serde_json::Error),
    #[error("invalid color range: {0}")]
    InvalidColorRange(String),
}

impl EnhanceError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        EnhanceError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    /// Maps a `SyntaxError` thrown by `querySelector` and friends.
    pub(crate) fn from_js(selector: &str, err: &JsValue) -> Self {
        let reason = err
            .as_string()
            .unwrap_or_else(|| format!("{err:?}"));
        Self::invalid_selector(selector, reason)
    }
}
