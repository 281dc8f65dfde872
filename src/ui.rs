/// The controls of the host-injected settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Master,
    Reminder,
    Notification,
    TickSound,
    RequestPermission,
    TestSound,
}

/// Opaque seam to the settings panel the host injects.
///
/// The panel's markup belongs to the host; this side only mirrors checkbox
/// state, flips controls between enabled and disabled, and surfaces
/// user-facing errors.
pub trait ControlPanel: Send + Sync {
    fn set_checked(&self, control: ControlId, checked: bool);
    fn set_enabled(&self, control: ControlId, enabled: bool);
    fn show_error(&self, message: &str);
}

/// Panel stand-in for headless runs: mirrors everything into the log.
pub struct LogPanel;

impl ControlPanel for LogPanel {
    fn set_checked(&self, control: ControlId, checked: bool) {
        tracing::debug!("[panel] {:?} checked={}", control, checked);
    }

    fn set_enabled(&self, control: ControlId, enabled: bool) {
        tracing::debug!("[panel] {:?} enabled={}", control, enabled);
    }

    fn show_error(&self, message: &str) {
        tracing::error!("[panel] {}", message);
    }
}
