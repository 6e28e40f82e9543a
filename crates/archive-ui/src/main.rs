use anyhow::Context as _;
use archive_ui::{
    config::EnhanceConfig,
    dom::web::{WebDocument, WebScheduler},
    enhance,
};
use log::error;

fn main() {
    init_logging();
    if let Err(err) = run() {
        // The archive stays readable without the enhancements.
        error!("Archive enhancements disabled: {err:?}");
    }
}

fn run() -> anyhow::Result<()> {
    let document = WebDocument::current()?;
    let config = EnhanceConfig::load(&document).context("cannot load configuration")?;
    let enhancement =
        enhance(&document, &WebScheduler, &config).context("cannot enhance archive page")?;
    // Listeners and the color cache live as long as the page.
    std::mem::forget(enhancement);
    Ok(())
}

fn init_logging() {
    use log::Level;
    use wasm_logger::Config;

    // use debug level for debug builds, warn level for production builds.
    #[cfg(debug_assertions)]
    let level = Level::Trace;
    #[cfg(not(debug_assertions))]
    let level = Level::Warn;

    wasm_logger::init(Config::new(level));
}
