//! Binary entry point: read the config, load the quotes, and drive the Ratatui
//! event loop until the user exits. Any failure before the screen comes up is
//! fatal because there is nothing useful to show without quotes.
use anyhow::Context;
use quote_spark::{logging, run_app, App, Config, MailShare, QuotePicker, SystemClipboard};

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let config = Config::load().context("failed to load configuration")?;
    let store = config
        .load_quotes()
        .context("failed to load the quote collection")?;
    tracing::info!(origin = store.origin(), count = store.len(), "starting QuoteSpark");

    let mut app = App::new(
        store,
        QuotePicker::new(),
        Box::new(SystemClipboard::new()),
        Box::new(MailShare::new(config.share.subject)),
    )?;

    let result = run_app(&mut app);
    if let Err(err) = &result {
        tracing::error!(error = ?err, "terminal loop failed");
    }
    result
}
