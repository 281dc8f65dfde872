mod config;
mod host;
mod messages;
mod notification;
mod reminder;
#[cfg(test)]
mod testutil;
mod tick;
mod title_flash;
mod ui;

use config::{JsonFileStore, SettingsStore};
use messages::Event;
use notification::{DesktopNotifier, NotificationChannel};
use reminder::ReminderController;
use tick::{RodioBackend, TickChannel};
use title_flash::{TerminalTitle, TitleFlashChannel};
use ui::{ControlPanel, LogPanel};

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

const APP_TITLE: &str = "reminderd";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting reminderd new-message reminder daemon");

    let store = JsonFileStore::default_location()?;
    let settings = store.load()?;

    let panel: Arc<dyn ControlPanel> = Arc::new(LogPanel);
    let title_flash = TitleFlashChannel::new(Arc::new(TerminalTitle::new(APP_TITLE)));

    let mut tick = TickChannel::new(Arc::new(RodioBackend::new(Arc::clone(&panel))));
    if let Err(e) = tick.load(&settings.tick_sound_path) {
        // terminal for the session; sync_panel below leaves the sound
        // controls disabled
        panel.show_error(&format!("Tick sound could not be loaded: {e:#}"));
    }

    let notification = NotificationChannel::new(Arc::new(DesktopNotifier::new()));

    let mut controller = ReminderController::new(
        settings,
        Box::new(store),
        Arc::clone(&panel),
        title_flash,
        notification,
        tick,
    );
    controller.sync_panel();

    let (tx, mut rx) = mpsc::channel(16);
    tokio::spawn(async move {
        if let Err(e) = host::read_stdin(tx).await {
            tracing::warn!("Host bridge terminated: {:#}", e);
        }
    });

    tracing::info!(
        "Ready! Commands: msg, hide, show, on/off <master|reminder|notify|tick>, perm, test, quit"
    );

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(Event::Host(event)) => controller.handle_host_event(event),
                Some(Event::Ui(event)) => controller.handle_ui_event(event).await,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    controller.shutdown();
    tracing::info!("reminderd shutdown complete");
    Ok(())
}
