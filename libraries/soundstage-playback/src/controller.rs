//! Playback controller
//!
//! Owns the loaded buffer and the render pipeline, and runs one background
//! worker per play session:
//!
//! ```text
//! Idle ──play()──▶ Rendering ──submit ok──▶ Playing ──backend done──▶ Idle
//!   ▲                  │                        │
//!   └─────stop()───────┴────────stop()──────────┘
//! ```
//!
//! The worker gets an immutable snapshot (shared buffer plus a copy of the
//! settings) when the session starts, so settings changed afterwards only take
//! effect on the next `play()`. Cancellation is cooperative: the worker checks
//! its token after rendering, before submitting and at every poll.

use crate::cancel::CancellationToken;
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::types::{ControllerConfig, PlaybackState};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use soundstage_audio::pcm::{load_buffer, to_i16, PcmSamples};
use soundstage_audio::pipeline::{render, Pipeline, PipelineSettings};
use soundstage_audio::preview::preview_or_silence;
use soundstage_core::{AudioBuffer, AudioEncoder, PlaybackBackend, PlaybackHandle};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

/// State shared between the controller and its workers
#[derive(Default)]
struct SessionState {
    state: PlaybackState,
    /// Incremented for every new session and on every stop
    generation: u64,
    handle: Option<Box<dyn PlaybackHandle>>,
    last_error: Option<String>,
}

struct Shared {
    inner: Mutex<SessionState>,
    events: Sender<PlaybackEvent>,
    /// Receiving side kept to evict the oldest event when the queue is full
    backlog: Receiver<PlaybackEvent>,
}

impl Shared {
    fn new(event_capacity: usize) -> Self {
        let (events, backlog) = bounded(event_capacity.max(1));
        Self {
            inner: Mutex::new(SessionState::default()),
            events,
            backlog,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an event, dropping the oldest one if nobody is draining the queue
    fn emit(&self, mut event: PlaybackEvent) {
        loop {
            match self.events.try_send(event) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    if let Ok(dropped) = self.backlog.try_recv() {
                        trace!("Event queue full, dropping {:?}", dropped);
                    }
                    event = rejected;
                }
                // Both ends live in `self`
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    /// Move to `next` if `generation` is still the current session
    fn transition(&self, generation: u64, next: PlaybackState) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        let changed = Self::set_state(&mut inner, next);
        drop(inner);
        if changed {
            self.emit(PlaybackEvent::StateChanged { state: next });
        }
        true
    }

    fn set_state(inner: &mut SessionState, next: PlaybackState) -> bool {
        if inner.state == next {
            return false;
        }
        debug!("Playback state: {:?} -> {:?}", inner.state, next);
        inner.state = next;
        true
    }

    /// Store the backend handle and enter Playing, unless the session is stale
    fn install_handle(&self, generation: u64, handle: Box<dyn PlaybackHandle>) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            drop(inner);
            handle.stop();
            return false;
        }
        inner.handle = Some(handle);
        let changed = Self::set_state(&mut inner, PlaybackState::Playing);
        drop(inner);
        if changed {
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Playing,
            });
        }
        true
    }

    /// Whether the current session's handle is still playing
    ///
    /// `None` when the session is stale.
    fn is_playing(&self, generation: u64) -> Option<bool> {
        let inner = self.lock();
        if inner.generation != generation {
            return None;
        }
        Some(inner.handle.as_ref().is_some_and(|h| h.is_playing()))
    }

    /// Natural end of a session
    fn finish(&self, generation: u64) {
        {
            let mut inner = self.lock();
            if inner.generation != generation {
                return;
            }
            inner.handle = None;
        }
        if self.transition(generation, PlaybackState::Idle) {
            info!("Playback finished");
            self.emit(PlaybackEvent::Finished);
        }
    }

    /// Failed session: record, report and return to Idle
    fn fail(&self, generation: u64, err: &PlaybackError) {
        let message = err.message();
        let handle = {
            let mut inner = self.lock();
            if inner.generation != generation {
                debug!("Ignoring failure from stale session: {}", message);
                return;
            }
            inner.last_error = Some(message.clone());
            inner.handle.take()
        };
        // Stopped outside the lock; a backend may block in stop()
        if let Some(handle) = handle {
            handle.stop();
        }
        error!("Playback session failed: {}", message);
        self.transition(generation, PlaybackState::Idle);
        self.emit(PlaybackEvent::Error { message });
    }
}

/// Running worker session
struct Session {
    token: CancellationToken,
    /// Disconnects when the worker exits
    done: Receiver<()>,
    thread: JoinHandle<()>,
}

/// Everything a worker needs, moved onto its thread
struct WorkerContext {
    generation: u64,
    buffer: Arc<AudioBuffer>,
    settings: PipelineSettings,
    backend: Arc<dyn PlaybackBackend>,
    token: CancellationToken,
    shared: Arc<Shared>,
    config: ControllerConfig,
}

impl WorkerContext {
    fn run(self, _done: Sender<()>) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.session()));
        let failure = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(payload) => Some(PlaybackError::WorkerPanicked(panic_message(&*payload))),
        };
        if let Some(err) = failure {
            self.shared.fail(self.generation, &err);
        }
    }

    fn session(&self) -> Result<()> {
        let rendered = render(&self.buffer, &self.settings);
        if self.token.is_cancelled() {
            debug!("Session {} cancelled after render", self.generation);
            return Ok(());
        }

        let samples = to_i16(&rendered);
        if self.token.is_cancelled() {
            return Ok(());
        }
        let handle = self
            .backend
            .submit(samples, rendered.channels, rendered.sample_rate)?;

        if !self.shared.install_handle(self.generation, handle) {
            debug!("Session {} superseded before playback", self.generation);
            return Ok(());
        }

        loop {
            if self.token.is_cancelled() {
                return Ok(());
            }
            match self.shared.is_playing(self.generation) {
                Some(true) => thread::sleep(self.config.poll_interval),
                Some(false) => break,
                None => return Ok(()),
            }
        }

        self.shared.finish(self.generation);
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Render-then-play controller
///
/// All methods are called from one owning thread; the worker only touches the
/// shared session state.
pub struct PlaybackController {
    backend: Arc<dyn PlaybackBackend>,
    config: ControllerConfig,
    pipeline: Pipeline,
    buffer: Option<Arc<AudioBuffer>>,
    shared: Arc<Shared>,
    session: Option<Session>,
}

impl PlaybackController {
    /// Create a controller with default timing
    pub fn new(backend: Arc<dyn PlaybackBackend>) -> Self {
        Self::with_config(backend, ControllerConfig::default())
    }

    /// Create a controller with explicit timing
    pub fn with_config(backend: Arc<dyn PlaybackBackend>, config: ControllerConfig) -> Self {
        Self {
            backend,
            config,
            pipeline: Pipeline::new(),
            buffer: None,
            shared: Arc::new(Shared::new(config.event_capacity)),
            session: None,
        }
    }

    /// Timing configuration
    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.shared.lock().state
    }

    /// Message of the most recent session failure
    pub fn last_error(&self) -> Option<String> {
        self.shared.lock().last_error.clone()
    }

    /// Receiver for state changes, completions and failures
    ///
    /// The queue holds at most `event_capacity` events; when nobody drains it
    /// the oldest are dropped.
    pub fn events(&self) -> Receiver<PlaybackEvent> {
        self.shared.backlog.clone()
    }

    /// Replace the loaded buffer, stopping any session first
    pub fn load(&mut self, buffer: AudioBuffer) {
        self.stop();
        info!(
            "Loaded buffer: {} frames, {} Hz, {} channels",
            buffer.frames(),
            buffer.sample_rate,
            buffer.channels
        );
        self.buffer = Some(Arc::new(buffer));
    }

    /// Normalize decoded PCM and load it
    pub fn load_pcm(&mut self, samples: PcmSamples, sample_rate: u32, channels: u16) -> Result<()> {
        let buffer = load_buffer(samples, sample_rate, channels)?;
        self.load(buffer);
        Ok(())
    }

    /// Loaded buffer, if any
    pub fn buffer(&self) -> Option<&AudioBuffer> {
        self.buffer.as_deref()
    }

    /// Render pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable render pipeline
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// Current settings
    pub fn settings(&self) -> &PipelineSettings {
        self.pipeline.settings()
    }

    /// Mutable settings; changes apply from the next render
    pub fn settings_mut(&mut self) -> &mut PipelineSettings {
        self.pipeline.settings_mut()
    }

    /// Render the loaded buffer with the current settings
    pub fn render(&self) -> Option<AudioBuffer> {
        self.buffer.as_deref().map(|buffer| self.pipeline.render(buffer))
    }

    /// Waveform preview of the loaded (unprocessed) buffer
    pub fn preview(&self) -> Vec<f32> {
        preview_or_silence(self.buffer.as_deref())
    }

    /// Start a new play session
    ///
    /// Any running session is stopped first. Without a loaded buffer this is a
    /// no-op.
    pub fn play(&mut self) -> Result<()> {
        let Some(buffer) = self.buffer.clone() else {
            debug!("play() with no buffer loaded");
            return Ok(());
        };

        self.stop();

        let settings = self.pipeline.snapshot();
        let token = CancellationToken::new();
        let generation = {
            let mut inner = self.shared.lock();
            inner.generation += 1;
            inner.generation
        };
        self.shared.transition(generation, PlaybackState::Rendering);

        let (done_tx, done_rx) = crossbeam_channel::bounded(0);
        let context = WorkerContext {
            generation,
            buffer,
            settings,
            backend: Arc::clone(&self.backend),
            token: token.clone(),
            shared: Arc::clone(&self.shared),
            config: self.config,
        };

        let spawned = thread::Builder::new()
            .name(format!("soundstage-playback-{generation}"))
            .spawn(move || context.run(done_tx));

        match spawned {
            Ok(thread) => {
                info!("Started playback session {}", generation);
                self.session = Some(Session {
                    token,
                    done: done_rx,
                    thread,
                });
                Ok(())
            }
            Err(e) => {
                let err = PlaybackError::Spawn(e);
                self.shared.fail(generation, &err);
                Err(err)
            }
        }
    }

    /// Stop the current session
    ///
    /// Cancels the worker, halts the backend immediately and waits up to
    /// `stop_timeout` for the worker to exit. Always leaves the controller Idle.
    pub fn stop(&mut self) {
        let handle = {
            let mut inner = self.shared.lock();
            inner.generation += 1;
            inner.handle.take()
        };
        if let Some(handle) = handle {
            handle.stop();
        }

        if let Some(session) = self.session.take() {
            session.token.cancel();
            match session.done.recv_timeout(self.config.stop_timeout) {
                Err(RecvTimeoutError::Disconnected) | Ok(()) => {
                    if session.thread.join().is_err() {
                        warn!("Playback worker exited with a panic");
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(
                        "Playback worker did not exit within {:?}; detaching",
                        self.config.stop_timeout
                    );
                }
            }
        }

        let changed = {
            let mut inner = self.shared.lock();
            Shared::set_state(&mut inner, PlaybackState::Idle)
        };
        if changed {
            info!("Playback stopped");
            self.shared.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Idle,
            });
        }
    }

    /// Render synchronously and hand the result to `encoder`
    ///
    /// Playback state is not touched. Without a loaded buffer this is a no-op.
    pub fn save(&self, encoder: &dyn AudioEncoder, path: &Path) -> Result<()> {
        let Some(rendered) = self.render() else {
            debug!("save() with no buffer loaded");
            return Ok(());
        };
        encoder.encode(&rendered, path)?;
        info!("Saved rendered audio to {}", path.display());
        Ok(())
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state())
            .field("config", &self.config)
            .field("loaded", &self.buffer.is_some())
            .field("settings", self.pipeline.settings())
            .finish()
    }
}
