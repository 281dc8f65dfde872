use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Fixed alert string combined with the captured title while flashing.
const ALERT_PREFIX: &str = "[New message]";

/// Period of the title alternation.
pub const FLASH_PERIOD: Duration = Duration::from_secs(1);

/// The window title as seen by this process.
pub trait TitleSurface: Send + Sync {
    fn title(&self) -> String;
    fn set_title(&self, title: &str);
}

/// Sets the terminal title through crossterm.
///
/// Terminals cannot be queried for their title, so the surface remembers
/// the last value it set.
pub struct TerminalTitle {
    current: Mutex<String>,
}

impl TerminalTitle {
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let surface = Self {
            current: Mutex::new(String::new()),
        };
        surface.set_title(&initial);
        surface
    }
}

impl TitleSurface for TerminalTitle {
    fn title(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn set_title(&self, title: &str) {
        use crossterm::{execute, terminal::SetTitle};

        if let Err(e) = execute!(std::io::stdout(), SetTitle(title)) {
            tracing::warn!("Failed to set terminal title: {}", e);
        }
        *self.current.lock().unwrap() = title.to_string();
    }
}

/// Flashes the window title once per second until stopped.
///
/// Idle -> (activate) -> Flashing -> (stop) -> Idle. The interval task is
/// the only recurring background work in the daemon; its `JoinHandle` is
/// the cancellation handle, and it is aborted on stop and on drop so it
/// can never outlive the channel.
pub struct TitleFlashChannel {
    surface: Arc<dyn TitleSurface>,
    original_title: String,
    task: Option<JoinHandle<()>>,
}

impl TitleFlashChannel {
    pub fn new(surface: Arc<dyn TitleSurface>) -> Self {
        let original_title = surface.title();
        Self {
            surface,
            original_title,
            task: None,
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.task.is_some()
    }

    /// Start alternating the title. No-op when already flashing: at most
    /// one timer task is alive at a time.
    pub fn activate(&mut self) {
        if self.task.is_some() {
            return;
        }

        self.original_title = self.surface.title();
        tracing::debug!("Title flash started");

        let surface = Arc::clone(&self.surface);
        let original = self.original_title.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FLASH_PERIOD);
            // the first tick completes immediately; the first visible
            // change lands one full period after activation
            ticker.tick().await;

            let mut alerting = false;
            loop {
                ticker.tick().await;
                alerting = !alerting;
                if alerting {
                    surface.set_title(&format!("{ALERT_PREFIX} {original}"));
                } else {
                    surface.set_title(&original);
                }
            }
        }));
    }

    /// Clear the timer if one is running and restore the captured title.
    /// Safe to call redundantly, including before the first activation.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Title flash stopped");
        }
        self.surface.set_title(&self.original_title);
    }
}

impl Drop for TitleFlashChannel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
