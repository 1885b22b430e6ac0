use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Arxena extension launcher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging (to a temp-dir log file in interactive mode)
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Origin serving the extension archive (overrides config)
    #[arg(long)]
    server_url: Option<String>,

    /// Seconds between automatic refreshes (overrides config)
    #[arg(long)]
    interval: Option<u64>,

    /// Keep the extension updated without the status page, until Ctrl+C
    #[arg(long)]
    headless: bool,
}

mod handlers;
mod ui;

use arx_launcher::api::ExtensionClient;
use arx_launcher::cancel::CancelToken;
use arx_launcher::config::{self, Config};
use arx_launcher::installer::ExtensionInstaller;
use arx_launcher::logging;
use arx_launcher::services::bridge::{spawn_bridge_service, Subscription};
use arx_launcher::services::updater::{spawn_periodic_updater, startup_sync, StartupSync};
use arx_launcher::services::{BridgeRequest, BridgeResponse, HostBridge};
use arx_launcher::settings::SettingsStore;
// Paths used by the ui and handlers modules
use arx_launcher::{logic, model, services, EXTENSION_DIR_NAME};

pub struct App {
    pub model: model::Model,

    bridge_tx: UnboundedSender<BridgeRequest>,
    bridge_rx: UnboundedReceiver<BridgeResponse>,
    updates: Subscription,

    /// Cancels the UI-initiated download in flight, if any
    pub active_download: Option<CancelToken>,

    /// Prefill for the install location dialog when nothing is stored
    pub default_path: PathBuf,
}

impl App {
    /// Wire the page to the host bridge
    ///
    /// Subscribes to update notifications before returning so none sent
    /// after construction are missed.
    fn new(bridge: HostBridge, config: &Config) -> Self {
        let updates = bridge.subscribe();
        let default_path = bridge.default_path().to_path_buf();
        let server_url = bridge.server_url().to_string();
        let (bridge_tx, bridge_rx) = spawn_bridge_service(bridge);

        Self {
            model: model::Model::new(server_url, config.refresh_interval()),
            bridge_tx,
            bridge_rx,
            updates,
            active_download: None,
            default_path,
        }
    }

    pub fn request_extension_info(&self) {
        if self.bridge_tx.send(BridgeRequest::GetExtensionInfo).is_err() {
            tracing::warn!("Bridge service is gone, cannot request extension info");
        }
    }

    /// Ask the host to download, returns false if one is already running
    pub fn start_download(&mut self, save_path: Option<PathBuf>) -> bool {
        if !self.model.begin_download() {
            return false;
        }

        let cancel = CancelToken::new();
        let request = BridgeRequest::DownloadExtension {
            save_path,
            cancel: cancel.clone(),
        };
        if self.bridge_tx.send(request).is_err() {
            tracing::warn!("Bridge service is gone, cannot start download");
            self.model.apply_download_result(&services::DownloadResult {
                success: false,
                path: String::new(),
                message: "Failed to download extension: host is not running".to_string(),
            });
            return true;
        }

        self.active_download = Some(cancel);
        true
    }

    pub fn cancel_active_download(&mut self) {
        if let Some(cancel) = self.active_download.take() {
            tracing::debug!("Cancelling in-flight download");
            cancel.cancel();
        }
    }

    /// Drain bridge responses and update notifications (non-blocking)
    fn process_background_messages(&mut self) {
        while let Ok(response) = self.bridge_rx.try_recv() {
            handlers::handle_bridge_response(self, response);
        }

        while let Some(event) = self.updates.try_recv() {
            handlers::handle_extension_updated(self, event);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_tracing(args.debug, args.headless)?;

    let mut config = match config::find_config_path(args.config.as_deref())? {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading config");
            Config::load(&path)?
        }
        None => {
            tracing::info!("No config file found, using defaults");
            Config::default()
        }
    };

    // Override config with CLI flags
    if let Some(server_url) = args.server_url {
        config.server_url = server_url;
    }
    if let Some(interval) = args.interval {
        config.refresh_interval_secs = interval;
    }

    let settings = Arc::new(SettingsStore::open_default()?);
    tracing::info!(path = %settings.path().display(), "Using settings file");

    let client = ExtensionClient::new(config.server_url.clone(), config.request_timeout())?;
    let installer = Arc::new(ExtensionInstaller::new(client, settings));
    let bridge = HostBridge::new(installer, config.default_extension_path());
    let shutdown = CancelToken::new();

    if args.headless {
        return run_headless(bridge, &config, shutdown).await;
    }

    // Subscribe before the startup sync can publish anything
    let mut app = App::new(bridge.clone(), &config);

    let startup = {
        let bridge = bridge.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            log_startup_sync(&startup_sync(&bridge, &shutdown).await);
        })
    };
    let updater = spawn_periodic_updater(bridge, config.refresh_interval(), shutdown.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.cancel_active_download();
    shutdown.cancel();
    if let Err(e) = startup.await {
        tracing::warn!(error = %e, "Startup sync task ended abnormally");
    }
    if let Err(e) = updater.await {
        tracing::warn!(error = %e, "Refresh timer task ended abnormally");
    }

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    // The page asks for info, then starts its own download
    app.request_extension_info();
    app.start_download(None);

    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.should_dismiss_toast() {
            app.model.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        app.process_background_messages();
        app.model.extension.roll_refresh_schedule();

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handlers::handle_key(app, key)?;
            }
        }
    }

    Ok(())
}

/// Startup sync plus the refresh timer, logging to stderr, until Ctrl+C
async fn run_headless(bridge: HostBridge, config: &Config, shutdown: CancelToken) -> Result<()> {
    tracing::info!(
        server = %config.server_url,
        interval_secs = config.refresh_interval().as_secs(),
        "Running headless"
    );

    let mut updates = bridge.subscribe();

    tokio::select! {
        outcome = startup_sync(&bridge, &shutdown) => log_startup_sync(&outcome),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted during startup sync");
            shutdown.cancel();
            return Ok(());
        }
    }

    let updater = spawn_periodic_updater(bridge, config.refresh_interval(), shutdown.clone());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            event = updates.recv() => match event {
                Some(event) => tracing::info!(
                    path = %event.path,
                    updated = %logic::formatting::format_timestamp(event.timestamp),
                    "Extension refreshed"
                ),
                None => break,
            },
        }
    }

    updates.unsubscribe();
    shutdown.cancel();
    updater.await?;
    Ok(())
}

fn log_startup_sync(outcome: &StartupSync) {
    match outcome {
        StartupSync::FirstInstall(result) if result.success => {
            tracing::info!(path = %result.path, "First download complete");
        }
        StartupSync::FirstInstall(result) => {
            tracing::warn!(message = %result.message, "First download failed");
        }
        StartupSync::Refreshed(Some(event)) => {
            tracing::info!(path = %event.path, "Startup refresh complete");
        }
        StartupSync::Refreshed(None) => {
            tracing::debug!("Startup refresh did not update the extension");
        }
    }
}
