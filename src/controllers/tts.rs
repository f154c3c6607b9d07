use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::sync::Arc;

use crate::{
    domain::tts::{SynthesisApi, SynthesisForm, SynthesisRequest, TtsService},
    error::{AppError, AppResult},
    infrastructure::audio::{encode_wav, ReferenceAudio},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /generate-tts - Synthesize speech from a multipart form
    pub async fn generate(
        State(controller): State<Arc<TtsController>>,
        multipart: Multipart,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        // 1. Read the multipart form
        let (form, upload) = read_form(multipart).await?;

        // 2. Engine presence is checked before anything else; an uninitialized
        //    model rejects every request with 503, valid or not
        if !controller.tts_service.is_ready() {
            return Err(AppError::ModelUnavailable);
        }

        // 3. Coerce submitted fields into a typed request
        let request = SynthesisRequest::from_form(form)?;

        // 4. Materialize the optional reference clip. Its temp file lives in
        //    `reference` and is removed when this scope exits, on every path
        let reference = upload
            .as_deref()
            .map(ReferenceAudio::from_upload)
            .transpose()?;
        let audio_prompt = reference.as_ref().map(|clip| clip.path().to_path_buf());

        // 5. Single engine invocation
        let waveform = controller
            .tts_service
            .synthesize(request, audio_prompt)
            .await?;

        // 6. Encode the complete WAV body; the response is never a partial
        //    stream followed by an error
        let audio = encode_wav(&waveform)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=tts_output.wav"),
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}

/// Collect the submitted fields and the optional reference clip.
///
/// An upload part with an empty filename counts as "no upload": no bytes are
/// read and no temp resource is ever created for it. Unknown fields are
/// ignored.
async fn read_form(mut multipart: Multipart) -> AppResult<(SynthesisForm, Option<Vec<u8>>)> {
    let mut form = SynthesisForm::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Validation(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "audio_prompt_path_input" {
            let has_filename = field.file_name().is_some_and(|name| !name.is_empty());
            if has_filename {
                let content = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::AudioProcessing(err.to_string()))?;
                upload = Some(content.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| AppError::Validation(err.to_string()))?;

        match name.as_str() {
            "text_input" => form.text_input = Some(value),
            "language_id" => form.language_id = Some(value),
            "exaggeration_input" => form.exaggeration_input = Some(value),
            "cfgw_input" => form.cfgw_input = Some(value),
            "temperature_input" => form.temperature_input = Some(value),
            "seed_num_input" => form.seed_num_input = Some(value),
            _ => {}
        }
    }

    Ok((form, upload))
}
