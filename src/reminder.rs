use crate::config::{Settings, SettingsStore};
use crate::messages::{HostEvent, UiEvent};
use crate::notification::{NotificationChannel, ToggleDecision};
use crate::tick::TickChannel;
use crate::title_flash::TitleFlashChannel;
use crate::ui::{ControlId, ControlPanel};
use std::sync::Arc;

/// The orchestrator: receives host and panel events, consults the
/// settings, and drives the three alert channels.
///
/// Everything runs on the single event-processing context, so the
/// settings object is mutated from one place only and needs no locking.
pub struct ReminderController {
    settings: Settings,
    store: Box<dyn SettingsStore>,
    panel: Arc<dyn ControlPanel>,
    title_flash: TitleFlashChannel,
    notification: NotificationChannel,
    tick: TickChannel,
    hidden: bool,
}

impl ReminderController {
    pub fn new(
        settings: Settings,
        store: Box<dyn SettingsStore>,
        panel: Arc<dyn ControlPanel>,
        title_flash: TitleFlashChannel,
        notification: NotificationChannel,
        tick: TickChannel,
    ) -> Self {
        Self {
            settings,
            store,
            panel,
            title_flash,
            notification,
            tick,
            // the host starts in the foreground
            hidden: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Push current settings into the panel and mirror the master toggle
    /// onto the dependent controls. Called once at startup and after every
    /// master-toggle change.
    pub fn sync_panel(&self) {
        self.panel.set_checked(ControlId::Master, self.settings.enabled);
        self.panel
            .set_checked(ControlId::Reminder, self.settings.enable_reminder);
        self.panel
            .set_checked(ControlId::Notification, self.settings.enable_notification);
        self.panel
            .set_checked(ControlId::TickSound, self.settings.enable_tick_sound);
        self.apply_control_states();
    }

    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::MessageReceived => self.on_message_received(),
            HostEvent::VisibilityChanged { hidden } => self.on_visibility_changed(hidden),
        }
    }

    pub async fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::MasterToggled(on) => self.on_master_toggled(on),
            UiEvent::ReminderToggled(on) => {
                self.settings.enable_reminder = on;
                self.persist();
            }
            UiEvent::TickSoundToggled(on) => {
                self.settings.enable_tick_sound = on;
                self.persist();
            }
            UiEvent::NotificationToggled { on, user_initiated } => {
                self.on_notification_toggled(on, user_initiated).await;
            }
            UiEvent::RequestPermissionPressed => self.on_request_permission().await,
            UiEvent::TestSoundPressed => self.tick.test_play(),
        }
    }

    /// Stops the flash so the title is back to normal before exit.
    pub fn shutdown(&mut self) {
        self.title_flash.stop();
    }

    fn on_message_received(&mut self) {
        if !self.settings.enabled {
            tracing::debug!("Message ignored: extension disabled");
            return;
        }

        if self.hidden {
            if self.settings.enable_reminder {
                self.title_flash.activate();
            }
            if self.settings.enable_notification {
                self.notification.send(&self.settings);
            }
        }

        // the tick fires even when the view is visible
        self.tick.play(&self.settings);
    }

    fn on_visibility_changed(&mut self, hidden: bool) {
        self.hidden = hidden;
        if !hidden {
            self.title_flash.stop();
        }
    }

    fn on_master_toggled(&mut self, on: bool) {
        let was_on = self.settings.enabled;
        self.settings.enabled = on;
        self.persist();

        if was_on && !on {
            // master-off also tears down a running flash
            self.title_flash.stop();
        }
        self.panel.set_checked(ControlId::Master, on);
        self.apply_control_states();
    }

    async fn on_notification_toggled(&mut self, on: bool, user_initiated: bool) {
        match self.notification.on_toggle_requested(on, user_initiated).await {
            ToggleDecision::Commit => {
                self.settings.enable_notification = on;
                self.persist();
                self.panel.set_checked(ControlId::Notification, on);
            }
            ToggleDecision::Revert { reason } => {
                self.panel
                    .set_checked(ControlId::Notification, self.settings.enable_notification);
                self.panel.show_error(reason);
            }
        }
    }

    async fn on_request_permission(&mut self) {
        if self.notification.request_permission().await {
            tracing::info!("Notification permission granted");
        } else {
            self.panel.show_error(
                "Notification permission was not granted. Allow notifications for \
                 this app in your system settings.",
            );
        }
    }

    /// The three sub-toggles and both buttons mirror the master toggle;
    /// the sound controls additionally stay off after a failed load.
    fn apply_control_states(&self) {
        let master = self.settings.enabled;
        self.panel.set_enabled(ControlId::Reminder, master);
        self.panel.set_enabled(ControlId::Notification, master);
        self.panel.set_enabled(ControlId::RequestPermission, master);

        let audio_ok = !self.tick.is_failed();
        self.panel
            .set_enabled(ControlId::TickSound, master && audio_ok);
        self.panel
            .set_enabled(ControlId::TestSound, master && audio_ok);
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::error!("Failed to save settings: {:#}", e);
        }
    }
}
