use crate::config::Settings;
use crate::ui::ControlPanel;
use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Load state of the preloaded tick sound. `Loaded` and `Failed` are
/// terminal once resolved; the resource is created once at startup and
/// never recreated.
#[derive(Debug, Clone)]
pub enum LoadState {
    Pending,
    Loaded(Arc<[u8]>),
    Failed,
}

/// Fire-and-forget playback of preloaded sound bytes.
pub trait AudioBackend: Send + Sync {
    fn play(&self, sound: Arc<[u8]>);
}

/// rodio playback in a blocking task.
///
/// Playback failures land after `play` has returned, so the backend holds
/// the panel handle and surfaces them itself.
pub struct RodioBackend {
    panel: Arc<dyn ControlPanel>,
}

impl RodioBackend {
    pub fn new(panel: Arc<dyn ControlPanel>) -> Self {
        Self { panel }
    }
}

impl AudioBackend for RodioBackend {
    fn play(&self, sound: Arc<[u8]>) {
        let panel = Arc::clone(&self.panel);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = play_blocking(sound) {
                tracing::warn!("Tick playback failed: {:#}", e);
                panel.show_error(&format!(
                    "Could not play the tick sound ({e:#}). Check your audio output device and try again."
                ));
            }
        });
    }
}

fn play_blocking(sound: Arc<[u8]>) -> Result<()> {
    let stream_handle = rodio::OutputStreamBuilder::open_default_stream()
        .context("no audio output available")?;

    // fresh source per play, so playback always starts at the top
    let sink = rodio::play(stream_handle.mixer(), Cursor::new(sound))
        .context("failed to start playback")?;
    sink.sleep_until_end();

    Ok(())
}

/// Owns the one preloadable tick sound and its guarded play operation.
pub struct TickChannel {
    backend: Arc<dyn AudioBackend>,
    state: LoadState,
}

impl TickChannel {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            state: LoadState::Pending,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed)
    }

    /// Preload the sound exactly once at startup.
    ///
    /// The bytes are decode-validated here so a missing or broken file
    /// fails at load time rather than on the first message. Looks next to
    /// the binary, under assets/, then under the system share directory,
    /// like the other sound paths the daemon ships.
    pub fn load(&mut self, path: &str) -> Result<()> {
        let result = read_sound(path)
            .with_context(|| format!("Failed to read tick sound {path:?}"))
            .and_then(|bytes| self.install(bytes));

        if let Err(e) = &result {
            tracing::error!("Tick sound unavailable: {:#}", e);
        }
        result
    }

    /// Validate and adopt the sound bytes.
    pub(crate) fn install(&mut self, bytes: Vec<u8>) -> Result<()> {
        let bytes: Arc<[u8]> = bytes.into();
        match rodio::Decoder::new(Cursor::new(Arc::clone(&bytes))) {
            Ok(_) => {
                self.state = LoadState::Loaded(bytes);
                Ok(())
            }
            Err(e) => {
                self.state = LoadState::Failed;
                Err(e).context("Unsupported audio format")
            }
        }
    }

    /// Guarded play for the message path. Guard order: master toggle, tick
    /// toggle, then the resource guards shared with `test_play`.
    pub fn play(&self, settings: &Settings) {
        if !settings.enabled {
            tracing::debug!("Tick skipped: extension disabled");
            return;
        }
        if !settings.enable_tick_sound {
            tracing::debug!("Tick skipped: tick sound disabled");
            return;
        }
        self.fire();
    }

    /// Play for the panel's test button: the user asked explicitly, so the
    /// toggle gates are skipped, but a missing or broken resource still
    /// never plays. The button is disabled while the master toggle is off.
    pub fn test_play(&self) {
        self.fire();
    }

    fn fire(&self) {
        match &self.state {
            LoadState::Failed => {
                tracing::debug!("Tick skipped: sound failed to load");
            }
            LoadState::Pending => {
                tracing::warn!("Tick sound not loaded yet, skipping playback");
            }
            LoadState::Loaded(sound) => {
                self.backend.play(Arc::clone(sound));
            }
        }
    }
}

fn read_sound(path: &str) -> std::io::Result<Vec<u8>> {
    std::fs::read(path)
        .or_else(|_| std::fs::read(Path::new("assets").join(path)))
        .or_else(|_| std::fs::read(Path::new("/usr/share/reminderd/assets").join(path)))
}
