pub mod ask;
pub mod chat;
pub mod stats;

use docqa_core::{PipelineConfig, Session};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr while a slow call runs
pub fn spinner(message: impl Into<String>) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(120));
    Ok(spinner)
}

/// Build the session and wait for the index.
///
/// `None` means initialization failed and the reason was already printed.
pub async fn open_session() -> anyhow::Result<Option<Session>> {
    let session = Session::from_env(PipelineConfig::default());

    let progress = spinner(format!(
        "Indexing {}...",
        session.config().document_path.display()
    ))?;
    let result = session.ready().await.map(|_| ());
    progress.finish_and_clear();

    if let Err(e) = result {
        eprintln!("Error initializing components: {}", e);
        eprintln!("Failed to initialize RAG components. Please check your API keys and try again.");
        return Ok(None);
    }

    Ok(Some(session))
}
