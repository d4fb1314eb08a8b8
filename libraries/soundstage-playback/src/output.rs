//! CPAL-based playback backend (audio thread owns the stream)
use crate::error::PlaybackError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::{bounded, Receiver, Sender};
use soundstage_core::{PlaybackBackend, PlaybackHandle, SoundstageError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// Scale from i16 back to f32 for the device callback
const I16_TO_F32: f32 = 1.0 / 32_768.0;

/// Commands sent to the audio thread
enum AudioCommand {
    /// Build a stream for a new block and start it
    Play {
        block: Arc<Block>,
        reply: Sender<Result<(), PlaybackError>>,
    },
    /// Drop the stream if it is still playing `block`
    Stop { block: Arc<Block> },
    /// Shutdown the audio thread
    Shutdown,
}

/// One submitted block and its playback cursor
struct Block {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
    /// Position in samples, not frames
    position: AtomicUsize,
    playing: AtomicBool,
}

/// Handle returned by [`CpalBackend::submit`]
pub struct CpalHandle {
    block: Arc<Block>,
    command_tx: Sender<AudioCommand>,
}

impl PlaybackHandle for CpalHandle {
    fn is_playing(&self) -> bool {
        self.block.playing.load(Ordering::Acquire)
    }

    fn stop(&self) {
        self.block.playing.store(false, Ordering::Release);
        let _ = self.command_tx.send(AudioCommand::Stop {
            block: Arc::clone(&self.block),
        });
    }
}

/// CPAL playback backend
///
/// Uses a dedicated audio thread that owns the CPAL `Stream`; the controller
/// talks to it over a channel, which keeps `Stream` (not `Send` on every
/// platform) off the worker threads.
pub struct CpalBackend {
    command_tx: Sender<AudioCommand>,
    audio_thread: Option<JoinHandle<()>>,
}

impl CpalBackend {
    /// Create a backend on the default output device
    ///
    /// # Errors
    /// Returns an error if no output device is available
    pub fn new() -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlaybackError::Backend("no output device found".into()))?;
        Self::with_device(device)
    }

    /// Create a backend on a specific device
    pub fn with_device(device: Device) -> Result<Self, PlaybackError> {
        let (command_tx, command_rx) = bounded::<AudioCommand>(32);
        let audio_thread = thread::Builder::new()
            .name("soundstage-audio-output".into())
            .spawn(move || Self::audio_thread_run(&device, &command_rx))?;

        Ok(Self {
            command_tx,
            audio_thread: Some(audio_thread),
        })
    }

    /// Audio thread main loop
    fn audio_thread_run(device: &Device, command_rx: &Receiver<AudioCommand>) {
        let mut stream: Option<Stream> = None;
        let mut current: Option<Arc<Block>> = None;

        while let Ok(cmd) = command_rx.recv() {
            match cmd {
                AudioCommand::Play { block, reply } => {
                    stream = None;
                    current = None;
                    let result = Self::start_stream(device, Arc::clone(&block));
                    let outcome = match result {
                        Ok(s) => {
                            stream = Some(s);
                            current = Some(block);
                            Ok(())
                        }
                        Err(e) => {
                            block.playing.store(false, Ordering::Release);
                            Err(e)
                        }
                    };
                    let _ = reply.send(outcome);
                }
                AudioCommand::Stop { block } => {
                    if is_current(current.as_ref(), &block) {
                        stream = None;
                        current = None;
                    } else {
                        debug!("Ignoring stop for a block that is no longer playing");
                    }
                }
                AudioCommand::Shutdown => break,
            }
        }

        drop(stream);
        debug!("Audio output thread exiting");
    }

    fn start_stream(device: &Device, block: Arc<Block>) -> Result<Stream, PlaybackError> {
        let config = StreamConfig {
            channels: block.channels,
            sample_rate: block.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let callback_block = Arc::clone(&block);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    Self::audio_callback(data, &callback_block);
                },
                |err| error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| PlaybackError::Backend(e.to_string()))?;

        stream
            .play()
            .map_err(|e| PlaybackError::Backend(e.to_string()))?;
        Ok(stream)
    }

    /// Audio callback function (runs in real-time audio thread)
    fn audio_callback(output: &mut [f32], block: &Block) {
        if !block.playing.load(Ordering::Acquire) {
            output.fill(0.0);
            return;
        }

        let mut pos = block.position.load(Ordering::Relaxed);
        let len = block.samples.len();
        for out_sample in output.iter_mut() {
            if pos < len {
                *out_sample = f32::from(block.samples[pos]) * I16_TO_F32;
                pos += 1;
            } else {
                *out_sample = 0.0;
            }
        }

        block.position.store(pos, Ordering::Relaxed);
        if pos >= len {
            // Reached end
            block.playing.store(false, Ordering::Release);
        }
    }
}

/// Whether `block` is the one the audio thread is currently streaming
fn is_current(current: Option<&Arc<Block>>, block: &Arc<Block>) -> bool {
    current.is_some_and(|c| Arc::ptr_eq(c, block))
}

impl PlaybackBackend for CpalBackend {
    fn submit(
        &self,
        samples: Vec<i16>,
        channels: u16,
        sample_rate: u32,
    ) -> soundstage_core::Result<Box<dyn PlaybackHandle>> {
        let block = Arc::new(Block {
            samples,
            channels,
            sample_rate,
            position: AtomicUsize::new(0),
            playing: AtomicBool::new(true),
        });

        let (reply_tx, reply_rx) = bounded(1);
        self.command_tx
            .send(AudioCommand::Play {
                block: Arc::clone(&block),
                reply: reply_tx,
            })
            .map_err(|_| SoundstageError::backend("audio thread is gone"))?;

        reply_rx
            .recv()
            .map_err(|_| SoundstageError::backend("audio thread is gone"))?
            .map_err(|e| SoundstageError::backend(e.to_string()))?;

        Ok(Box::new(CpalHandle {
            block,
            command_tx: self.command_tx.clone(),
        }))
    }
}

impl Drop for CpalBackend {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Shutdown);
        if let Some(thread) = self.audio_thread.take() {
            if thread.join().is_err() {
                warn!("Audio output thread panicked");
            }
        }
    }
}
