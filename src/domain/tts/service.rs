use std::path::PathBuf;

use async_trait::async_trait;

use super::error::SynthesisError;
use super::request::SynthesisRequest;
use crate::infrastructure::engine::{EngineHandle, Waveform};

/// Dispatches validated requests into the synthesis engine.
pub struct TtsService {
    engine: Option<EngineHandle>,
}

impl TtsService {
    pub fn new(engine: Option<EngineHandle>) -> Self {
        Self { engine }
    }

    /// Whether an engine was loaded at startup
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }
}

#[async_trait]
pub trait SynthesisApi: Send + Sync {
    /// Run one synthesis invocation.
    ///
    /// This operation:
    /// - Fails fast when no engine handle exists
    /// - Applies the deterministic seed (when non-zero) under the engine lock,
    ///   immediately before invocation
    /// - Makes exactly one engine call, with no retries
    ///
    /// The call is blocking compute and runs on the blocking pool; the engine
    /// lock is held for its full duration so concurrent seeded requests do not
    /// race on generator state.
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        audio_prompt: Option<PathBuf>,
    ) -> Result<Waveform, SynthesisError>;
}

#[async_trait]
impl SynthesisApi for TtsService {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        audio_prompt: Option<PathBuf>,
    ) -> Result<Waveform, SynthesisError> {
        let engine = self
            .engine
            .clone()
            .ok_or(SynthesisError::ModelUnavailable)?;

        let preview: String = request.text.chars().take(30).collect();
        tracing::info!(
            text_preview = %preview,
            language_id = %request.language_id,
            seed = request.seed,
            has_audio_prompt = audio_prompt.is_some(),
            "TTS synthesis request"
        );

        let waveform = tokio::task::spawn_blocking(move || {
            let mut engine = engine.lock();
            if request.seed != 0 {
                engine.reseed(request.seed as u64);
            }
            engine.synthesize(&request, audio_prompt.as_deref())
        })
        .await
        .map_err(|err| SynthesisError::Task(err.to_string()))?
        .map_err(|err| SynthesisError::Engine(err.to_string()))?;

        tracing::info!(
            samples = waveform.samples.len(),
            sample_rate = waveform.sample_rate,
            duration_secs = waveform.duration_secs(),
            "TTS synthesis complete"
        );

        Ok(waveform)
    }
}
