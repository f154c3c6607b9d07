pub mod mock;

pub use mock::MockEngine;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::tts::request::SynthesisRequest;
use crate::infrastructure::config::{Config, EngineBackend};

/// Decoded audio returned by an engine: raw samples plus their sample rate,
/// prior to container encoding.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Interface to a text-to-speech synthesis backend.
///
/// The backend is an opaque collaborator: it owns the model, its weights and
/// any device-resident state. Implementations receive their target device at
/// construction time; no global loader state is patched.
///
/// `synthesize` is blocking compute and is expected to be long-running. The
/// service layer dispatches it to the blocking pool; implementations must not
/// assume they run on the async executor.
pub trait TtsEngine: Send {
    /// Device the backend was initialized on ("cpu", "cuda", ...)
    fn device(&self) -> &str;

    /// Fixed output sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Deterministically reseed every random-number source the backend uses,
    /// including any accelerator-side generator.
    fn reseed(&mut self, seed: u64);

    /// Synthesize a waveform for the request, optionally steered by a
    /// reference voice clip on disk. Exactly one call is made per request.
    fn synthesize(
        &mut self,
        request: &SynthesisRequest,
        audio_prompt: Option<&Path>,
    ) -> anyhow::Result<Waveform>;
}

/// Process-wide handle to the loaded engine.
///
/// Created once at startup and shared read-only across requests. The mutex
/// serializes all engine invocations: backend-internal mutable state (RNG,
/// device context) is never touched by two requests at once, so seeded
/// determinism holds under concurrency.
#[derive(Clone)]
pub struct EngineHandle {
    engine: Arc<Mutex<Box<dyn TtsEngine>>>,
    device: String,
    sample_rate: u32,
}

impl EngineHandle {
    pub fn new(engine: Box<dyn TtsEngine>) -> Self {
        let device = engine.device().to_string();
        let sample_rate = engine.sample_rate();
        Self {
            engine: Arc::new(Mutex::new(engine)),
            device,
            sample_rate,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Exclusive access to the backend for the duration of one invocation.
    /// A poisoned lock is recovered: the backend trait has no invariant that
    /// survives a panic half-way through synthesis anyway.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn TtsEngine>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One-time engine initialization.
///
/// Returns `None` when no backend is configured or loading fails; the server
/// still starts and reports `model_loaded: false`, and synthesis requests are
/// rejected with 503 until restarted with a working backend.
pub fn load_engine(config: &Config) -> Option<EngineHandle> {
    match config.engine {
        EngineBackend::Disabled => {
            tracing::warn!(
                "No TTS engine backend configured (TTS_ENGINE=disabled); \
                 synthesis requests will be rejected"
            );
            None
        }
        EngineBackend::Mock => {
            let engine = MockEngine::new(&config.device);
            Some(EngineHandle::new(Box::new(engine)))
        }
    }
}
