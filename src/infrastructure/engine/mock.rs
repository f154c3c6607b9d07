use std::path::Path;

use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{TtsEngine, Waveform};
use crate::domain::tts::request::SynthesisRequest;

/// Output sample rate of the mock backend
const SAMPLE_RATE: u32 = 24_000;

/// Samples emitted per character of input text (~100ms of audio each)
const SAMPLES_PER_CHAR: usize = 2_400;

/// Development backend for running the server without model weights.
///
/// Produces noise whose length tracks the input text, from a seedable
/// generator, so the full request lifecycle (reference-clip intake, seeding,
/// encoding, cleanup) can be exercised end to end. Not a synthesis algorithm.
pub struct MockEngine {
    device: String,
    rng: StdRng,
}

impl MockEngine {
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
            rng: StdRng::from_os_rng(),
        }
    }
}

impl TtsEngine for MockEngine {
    fn device(&self) -> &str {
        &self.device
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn synthesize(
        &mut self,
        request: &SynthesisRequest,
        audio_prompt: Option<&Path>,
    ) -> anyhow::Result<Waveform> {
        // A real backend would condition on the reference clip; here we only
        // verify it is a readable file, which keeps the temp-file lifecycle
        // honest in development and in tests.
        if let Some(path) = audio_prompt {
            std::fs::read(path).context("reading reference audio clip")?;
        }

        let chars = request.text.chars().count().max(1);
        let samples = (0..chars * SAMPLES_PER_CHAR)
            .map(|_| self.rng.random::<f32>() * 2.0 - 1.0)
            .collect();

        Ok(Waveform {
            samples,
            sample_rate: SAMPLE_RATE,
        })
    }
}
