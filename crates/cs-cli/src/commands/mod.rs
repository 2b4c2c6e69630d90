pub mod account;
pub mod leaderboard;
pub mod play;
pub mod support;

use std::path::Path;

use colored::{ColoredString, Colorize};
use cs_core::{FileStore, MemoryStore, Message, MessageKind};
use cs_web::{MockAuthService, WebConfig, WebsiteSession};

/// Settings shared by the website commands.
pub struct WebOptions<'a> {
    pub data_dir: &'a Path,
    pub latency_ms: u64,
}

/// A website session whose remembered token lives in `data_dir`.
fn open_session(options: &WebOptions<'_>) -> WebsiteSession<MockAuthService> {
    let config = WebConfig::default().with_latency_ms(options.latency_ms);
    WebsiteSession::new(
        MockAuthService::new(&config),
        Box::new(FileStore::new(options.data_dir)),
        Box::new(MemoryStore::new()),
    )
}

/// Drive one async website call to completion.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;
    Ok(runtime.block_on(future))
}

/// Style a logged message by kind.
fn styled(message: &Message) -> ColoredString {
    let text = message.text.as_str();
    match message.kind {
        MessageKind::Player => text.bold(),
        MessageKind::System => text.cyan(),
        MessageKind::Combat => text.yellow(),
        MessageKind::Success => text.green(),
        MessageKind::Error => text.red(),
        MessageKind::Info => text.blue(),
    }
}
