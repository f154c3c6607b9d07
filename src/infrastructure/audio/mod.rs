use std::io::{Cursor, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::AppError;
use crate::infrastructure::engine::Waveform;

/// Uploads below this size cannot be a usable voice sample
pub const MIN_REFERENCE_BYTES: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("File audio reference is empty or too small.")]
    TooSmall,

    #[error("could not persist reference clip: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AudioError> for AppError {
    fn from(err: AudioError) -> Self {
        AppError::AudioProcessing(err.to_string())
    }
}

/// An uploaded voice sample, materialized as a uniquely named temporary
/// `.wav` file for the duration of one request.
///
/// The backing file is removed when the value drops, which covers every exit
/// path: success, validation failure, engine failure and unwinding. If writing
/// the content fails half-way, the partially written file is removed before
/// the error propagates (the temp file guard never escapes this constructor).
#[derive(Debug)]
pub struct ReferenceAudio {
    len: usize,
    file: NamedTempFile,
}

impl ReferenceAudio {
    /// Materialize an uploaded clip. Fails without retaining any file when
    /// the content is empty or below [`MIN_REFERENCE_BYTES`].
    pub fn from_upload(content: &[u8]) -> Result<Self, AudioError> {
        if content.len() < MIN_REFERENCE_BYTES {
            return Err(AudioError::TooSmall);
        }

        let mut file = tempfile::Builder::new()
            .prefix("voice-ref-")
            .suffix(".wav")
            .tempfile()?;
        file.write_all(content)?;
        file.flush()?;

        Ok(Self {
            len: content.len(),
            file,
        })
    }

    /// Location of the backing file; valid only while `self` is alive.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("could not encode WAV output: {0}")]
pub struct EncodingError(#[from] hound::Error);

impl From<EncodingError> for AppError {
    fn from(err: EncodingError) -> Self {
        AppError::Generation(err.to_string())
    }
}

/// Serialize a waveform into an in-memory WAV container (mono, 32-bit float)
/// at the engine-reported sample rate. Nothing touches persistent storage.
pub fn encode_wav(waveform: &Waveform) -> Result<Vec<u8>, EncodingError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buffer, spec)?;
        for &sample in &waveform.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }

    Ok(buffer.into_inner())
}
