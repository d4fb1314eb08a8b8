//! Mock playback backend and helpers shared by the controller tests
#![allow(dead_code)]

use crossbeam_channel::Receiver;
use soundstage_core::{AudioBuffer, PlaybackBackend, PlaybackHandle, Result, SoundstageError};
use soundstage_playback::{ControllerConfig, PlaybackEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// How the mock backend behaves on submit
#[derive(Debug, Clone, Copy)]
pub enum Mode {
    /// Play for the given time, then report completion
    PlayFor(Duration),
    /// Play until stopped
    Forever,
    /// Refuse the submission
    Fail,
    /// Panic inside submit
    Panic,
    /// Block inside submit before playing forever
    SlowSubmit(Duration),
}

/// One recorded submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub samples: Vec<i16>,
    pub channels: u16,
    pub sample_rate: u32,
}

#[derive(Debug)]
pub struct HandleState {
    started: Instant,
    duration: Option<Duration>,
    stopped: AtomicBool,
}

impl HandleState {
    pub fn was_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

struct MockHandle(Arc<HandleState>);

impl PlaybackHandle for MockHandle {
    fn is_playing(&self) -> bool {
        if self.0.stopped.load(Ordering::SeqCst) {
            return false;
        }
        match self.0.duration {
            Some(d) => self.0.started.elapsed() < d,
            None => true,
        }
    }

    fn stop(&self) {
        self.0.stopped.store(true, Ordering::SeqCst);
    }
}

pub struct MockBackend {
    mode: Mode,
    submissions: Mutex<Vec<Submission>>,
    handles: Mutex<Vec<Arc<HandleState>>>,
}

impl MockBackend {
    pub fn new(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            submissions: Mutex::new(Vec::new()),
            handles: Mutex::new(Vec::new()),
        })
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn handles(&self) -> Vec<Arc<HandleState>> {
        self.handles.lock().unwrap().clone()
    }

    fn handle(&self, duration: Option<Duration>) -> Box<dyn PlaybackHandle> {
        let state = Arc::new(HandleState {
            started: Instant::now(),
            duration,
            stopped: AtomicBool::new(false),
        });
        self.handles.lock().unwrap().push(Arc::clone(&state));
        Box::new(MockHandle(state))
    }
}

impl PlaybackBackend for MockBackend {
    fn submit(
        &self,
        samples: Vec<i16>,
        channels: u16,
        sample_rate: u32,
    ) -> Result<Box<dyn PlaybackHandle>> {
        self.submissions.lock().unwrap().push(Submission {
            samples,
            channels,
            sample_rate,
        });

        match self.mode {
            Mode::PlayFor(d) => Ok(self.handle(Some(d))),
            Mode::Forever => Ok(self.handle(None)),
            Mode::Fail => Err(SoundstageError::backend("device unavailable")),
            Mode::Panic => panic!("driver crashed"),
            Mode::SlowSubmit(delay) => {
                thread::sleep(delay);
                Ok(self.handle(None))
            }
        }
    }
}

/// Fast polling so tests finish quickly
pub fn fast_config() -> ControllerConfig {
    ControllerConfig::default()
        .with_poll_interval(Duration::from_millis(5))
        .with_stop_timeout(Duration::from_secs(1))
}

/// Short stereo test tone
pub fn test_buffer() -> AudioBuffer {
    let left: Vec<f32> = (0..4_410)
        .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44_100.0).sin())
        .collect();
    AudioBuffer::from_channels(&left, &left, 44_100)
}

/// Wait for the first event matching `pred`, collecting everything seen
pub fn wait_for(
    events: &Receiver<PlaybackEvent>,
    timeout: Duration,
    pred: impl Fn(&PlaybackEvent) -> bool,
) -> Vec<PlaybackEvent> {
    let deadline = Instant::now() + timeout;
    let mut seen = Vec::new();
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match events.recv_timeout(remaining) {
            Ok(event) => {
                let done = pred(&event);
                seen.push(event);
                if done {
                    return seen;
                }
            }
            Err(_) => break,
        }
    }
    panic!("timed out waiting for event; saw {seen:?}");
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
