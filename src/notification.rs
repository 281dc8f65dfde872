use crate::config::Settings;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const APP_NAME: &str = "reminderd";
const NOTIFY_SUMMARY: &str = "New message";
const NOTIFY_BODY: &str = "A new message arrived while you were away.";
const NOTIFY_ICON: &str = "mail-message-new";
const NOTIFY_TIMEOUT_MS: u32 = 10_000;

/// Platform-owned permission state. Transitions Default -> Granted or
/// Default -> Denied happen only through an explicit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

/// What to do with a requested notification-toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDecision {
    Commit,
    Revert { reason: &'static str },
}

/// Platform notification capability.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether the platform has a notification capability at all.
    fn supported(&self) -> bool;

    fn permission(&self) -> Permission;

    /// May transition Default to Granted or Denied. Never re-prompts once
    /// denied.
    async fn request_permission(&self) -> Permission;

    /// Fire-and-forget delivery of a single alert.
    fn show(&self, summary: &str, body: &str);
}

/// notify-rust backed notifier.
///
/// Desktops have no permission prompt, so the request shows a confirmation
/// notification and treats a delivery failure as denial.
pub struct DesktopNotifier {
    permission: Mutex<Permission>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            permission: Mutex::new(Permission::Default),
        }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    fn supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Permission {
        let current = self.permission();
        if current != Permission::Default {
            return current;
        }

        let probe = tokio::task::spawn_blocking(|| {
            notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary("Notifications enabled")
                .body("You will be notified about new messages.")
                .icon(NOTIFY_ICON)
                .timeout(notify_rust::Timeout::Milliseconds(NOTIFY_TIMEOUT_MS))
                .show()
        })
        .await;

        let granted = match probe {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::warn!("Notification server rejected the probe: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!("Permission probe task failed: {}", e);
                false
            }
        };

        let next = if granted {
            Permission::Granted
        } else {
            Permission::Denied
        };
        *self.permission.lock().unwrap() = next;
        tracing::info!("Notification permission resolved to {:?}", next);
        next
    }

    fn show(&self, summary: &str, body: &str) {
        let summary = summary.to_owned();
        let body = body.to_owned();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&summary)
                .body(&body)
                .icon(NOTIFY_ICON)
                .timeout(notify_rust::Timeout::Milliseconds(NOTIFY_TIMEOUT_MS))
                .show()
            {
                tracing::warn!("Failed to show notification: {}", e);
            }
        });
    }
}

/// Wraps permission handling and the single-shot alert.
pub struct NotificationChannel {
    notifier: Arc<dyn Notifier>,
}

impl NotificationChannel {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Resolves to whether permission is granted. Capability absence and
    /// request errors both count as not granted.
    pub async fn request_permission(&self) -> bool {
        if !self.notifier.supported() {
            tracing::info!("Desktop notifications are not supported on this platform");
            return false;
        }
        self.notifier.request_permission().await == Permission::Granted
    }

    /// Fire the fixed alert. Guarded by the master toggle, the
    /// notification toggle, and the current permission state.
    pub fn send(&self, settings: &Settings) {
        if !settings.enabled || !settings.enable_notification {
            tracing::debug!("Notification skipped: disabled by settings");
            return;
        }
        if self.notifier.permission() != Permission::Granted {
            tracing::debug!("Notification skipped: permission not granted");
            return;
        }
        self.notifier.show(NOTIFY_SUMMARY, NOTIFY_BODY);
    }

    /// Decide whether a requested toggle state may be committed.
    ///
    /// Turning on while denied is refused outright: the platform will not
    /// prompt again, the user has to change it in system settings. Turning
    /// on without a grant prompts first, but only for a real click; a
    /// programmatic UI sync must never trigger the prompt.
    pub async fn on_toggle_requested(
        &self,
        requested_on: bool,
        user_initiated: bool,
    ) -> ToggleDecision {
        if !requested_on {
            return ToggleDecision::Commit;
        }

        match self.notifier.permission() {
            Permission::Granted => ToggleDecision::Commit,
            Permission::Denied => ToggleDecision::Revert {
                reason: "Notifications are blocked. Allow them for this app in your \
                         system settings, then try again.",
            },
            Permission::Default => {
                if !user_initiated {
                    return ToggleDecision::Commit;
                }
                if self.request_permission().await {
                    ToggleDecision::Commit
                } else {
                    ToggleDecision::Revert {
                        reason: "Notification permission was not granted.",
                    }
                }
            }
        }
    }
}
