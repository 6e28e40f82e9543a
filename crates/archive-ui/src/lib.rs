//! Enhancements for the rendered chat-log archive: reply links flash their target
//! message, and every speaker and character name gets a stable hashed color.

pub mod colorizer;
pub mod config;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod util;

use colorizer::NameColorizer;
use config::EnhanceConfig;
use dom::{Document, Scheduler};
use error::EnhanceError;
use highlight::ReplyHighlighter;
use log::debug;
use util::color::ColorStrategy;

/// Live state of an enhanced page. Dropping it detaches the reply links.
pub struct Enhancement<D: Document> {
    pub highlighter: ReplyHighlighter<D::Element>,
    pub colorizer: NameColorizer<ColorStrategy>,
}

/// Colors the names on the page and wires up its reply links.
pub fn enhance<D: Document, S: Scheduler>(
    document: &D,
    scheduler: &S,
    config: &EnhanceConfig,
) -> Result<Enhancement<D>, EnhanceError> {
    config.colors.validate()?;
    let mut colorizer = NameColorizer::new(config.colors);
    colorizer.colorize(document, &config.markup)?;
    let highlighter = ReplyHighlighter::attach(
        document,
        scheduler,
        &config.markup,
        config.highlight_delay_ms,
    )?;
    debug!("Archive page enhanced");
    Ok(Enhancement {
        highlighter,
        colorizer,
    })
}
