/// Signals from the chat host's event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A new message finished arriving. No payload is consumed beyond the
    /// occurrence itself.
    MessageReceived,
    /// The host's view was hidden or brought back to the foreground.
    VisibilityChanged { hidden: bool },
}

/// Interactions coming from the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    MasterToggled(bool),
    ReminderToggled(bool),
    /// `user_initiated` distinguishes a click from a programmatic UI sync;
    /// only clicks may trigger a permission prompt.
    NotificationToggled { on: bool, user_initiated: bool },
    TickSoundToggled(bool),
    RequestPermissionPressed,
    TestSoundPressed,
}

/// Everything the event loop dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Host(HostEvent),
    Ui(UiEvent),
}
