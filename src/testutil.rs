//! Shared fakes for the channel and controller tests.

use crate::config::{Settings, SettingsStore};
use crate::notification::{Notifier, Permission};
use crate::tick::AudioBackend;
use crate::title_flash::TitleSurface;
use crate::ui::{ControlId, ControlPanel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory title surface recording every mutation.
pub struct FakeTitle {
    current: Mutex<String>,
    sets: AtomicUsize,
}

impl FakeTitle {
    pub fn new(title: &str) -> Self {
        Self {
            current: Mutex::new(title.to_string()),
            sets: AtomicUsize::new(0),
        }
    }

    pub fn current(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

impl TitleSurface for FakeTitle {
    fn title(&self) -> String {
        self.current()
    }

    fn set_title(&self, title: &str) {
        *self.current.lock().unwrap() = title.to_string();
        self.sets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Panel recording the latest state pushed per control.
#[derive(Default)]
pub struct RecordingPanel {
    checked: Mutex<Vec<(ControlId, bool)>>,
    enabled: Mutex<Vec<(ControlId, bool)>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingPanel {
    pub fn last_checked(&self, control: ControlId) -> Option<bool> {
        last_for(&self.checked.lock().unwrap(), control)
    }

    pub fn last_enabled(&self, control: ControlId) -> Option<bool> {
        last_for(&self.enabled.lock().unwrap(), control)
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

fn last_for(records: &[(ControlId, bool)], control: ControlId) -> Option<bool> {
    records
        .iter()
        .rev()
        .find(|(recorded, _)| *recorded == control)
        .map(|(_, value)| *value)
}

impl ControlPanel for RecordingPanel {
    fn set_checked(&self, control: ControlId, checked: bool) {
        self.checked.lock().unwrap().push((control, checked));
    }

    fn set_enabled(&self, control: ControlId, enabled: bool) {
        self.enabled.lock().unwrap().push((control, enabled));
    }

    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Backend counting play requests instead of touching an audio device.
#[derive(Default)]
pub struct CountingBackend {
    plays: AtomicUsize,
}

impl CountingBackend {
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AudioBackend for CountingBackend {
    fn play(&self, _sound: Arc<[u8]>) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted notifier: fixed support flag, settable permission, and a
/// canned answer for permission requests.
pub struct FakeNotifier {
    supported: bool,
    permission: Mutex<Permission>,
    grant_on_request: bool,
    requests: AtomicUsize,
    shown: AtomicUsize,
}

impl FakeNotifier {
    pub fn with_permission(permission: Permission) -> Self {
        Self {
            supported: true,
            permission: Mutex::new(permission),
            grant_on_request: false,
            requests: AtomicUsize::new(0),
            shown: AtomicUsize::new(0),
        }
    }

    pub fn granting_on_request() -> Self {
        Self {
            grant_on_request: true,
            ..Self::with_permission(Permission::Default)
        }
    }

    pub fn denying_on_request() -> Self {
        Self::with_permission(Permission::Default)
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::with_permission(Permission::Default)
        }
    }

    pub fn set_permission(&self, permission: Permission) {
        *self.permission.lock().unwrap() = permission;
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    fn supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Permission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let next = if self.grant_on_request {
            Permission::Granted
        } else {
            Permission::Denied
        };
        self.set_permission(next);
        next
    }

    fn show(&self, _summary: &str, _body: &str) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store that keeps everything in memory and counts save requests.
#[derive(Default)]
pub struct NullStore {
    saves: AtomicUsize,
}

impl NullStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsStore for NullStore {
    fn load(&self) -> Result<Settings> {
        Ok(Settings::default())
    }

    fn save(&self, _settings: &Settings) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// Lets a test hold on to the store it handed the controller.
impl SettingsStore for Arc<NullStore> {
    fn load(&self) -> Result<Settings> {
        SettingsStore::load(self.as_ref())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        SettingsStore::save(self.as_ref(), settings)
    }
}

/// Smallest decodable sound: a 16-bit mono PCM WAV with a few silent
/// samples.
pub fn wav_bytes() -> Vec<u8> {
    const SAMPLES: u32 = 16;
    let data_len = SAMPLES * 2;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
    bytes.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend(std::iter::repeat(0u8).take(data_len as usize));
    bytes
}
