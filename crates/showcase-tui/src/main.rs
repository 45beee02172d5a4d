mod app;
mod mpv;
mod theme;
mod ui;
mod view;

use tokio::sync::mpsc;

use showcase_core::config::Config;
use showcase_core::content::Content;
use showcase_core::platform;
use showcase_core::sink::SinkEvent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("showcase.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("showcase log: {}", log_path.display());

    tracing::info!("showcase starting…");

    let config = Config::load().unwrap_or_default();
    let content = Content::load_or_default(&config.paths.content_file);
    tracing::info!(
        "content: {} sections, {} tracks ({} profile)",
        content.sections.len(),
        content.tracks.len(),
        if config.display.profile.is_mobile() {
            "mobile"
        } else {
            "desktop"
        }
    );

    // ── Sink event channel (mpv driver → coordinator) ────────────────────────
    let (sink_tx, sink_rx) = mpsc::channel::<SinkEvent>(64);
    let sink = mpv::spawn(sink_tx);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config, content, sink);
    app.run(sink_rx).await?;

    Ok(())
}
