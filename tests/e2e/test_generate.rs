use crate::helpers;

use hyper::StatusCode;
use pretty_assertions::assert_eq;
use std::io::Cursor;

#[tokio::test]
async fn it_should_synthesize_without_reference_audio() {
    let (app, probe) = helpers::test_app();

    let response = helpers::post_form(app, &helpers::valid_fields(), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type").as_deref(), Some("audio/wav"));
    assert_eq!(
        response.header("content-disposition").as_deref(),
        Some("attachment; filename=tts_output.wav")
    );
    assert!(!response.body.is_empty());
    assert_eq!(probe.call_count(), 1);

    // The body is a complete WAV container at the engine's sample rate
    let reader = hound::WavReader::new(Cursor::new(response.body)).unwrap();
    assert_eq!(reader.spec().sample_rate, 24_000);
    assert!(reader.duration() > 0);
}

#[tokio::test]
async fn it_should_reject_a_reference_clip_below_100_bytes() {
    let (app, probe) = helpers::test_app();

    let tiny = vec![0u8; 50];
    let response =
        helpers::post_form(app, &helpers::valid_fields(), Some(("ref.wav", &tiny))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.detail().contains("too small"));
    // Rejected before the engine is ever invoked
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn it_should_return_503_when_the_engine_is_not_initialized() {
    let app = helpers::test_app_without_engine();

    let response = helpers::post_form(app.clone(), &helpers::valid_fields(), None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.detail().contains("not initialized"));

    // Even malformed requests see the 503
    let response = helpers::post_form(
        app,
        &[("text_input", "Hello"), ("exaggeration_input", "abc")],
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn it_should_produce_identical_audio_for_identical_seeds() {
    let (app, probe) = helpers::test_app();

    let mut fields = helpers::valid_fields();
    fields.push(("seed_num_input", "42"));

    let first = helpers::post_form(app.clone(), &fields, None).await;
    let second = helpers::post_form(app, &fields, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(probe.call_count(), 2);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn it_should_reject_non_numeric_exaggeration() {
    let (app, probe) = helpers::test_app();

    let mut fields = helpers::valid_fields();
    fields.push(("exaggeration_input", "abc"));

    let response = helpers::post_form(app, &fields, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let detail = response.detail();
    assert!(detail.contains("validation failed"));
    assert!(detail.contains("exaggeration_input"));
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn it_should_enumerate_all_invalid_fields_in_one_response() {
    let (app, _probe) = helpers::test_app();

    let mut fields = helpers::valid_fields();
    fields.push(("exaggeration_input", "abc"));
    fields.push(("seed_num_input", "1.5"));

    let response = helpers::post_form(app, &fields, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let detail = response.detail();
    assert!(detail.contains("exaggeration_input"));
    assert!(detail.contains("seed_num_input"));
}

#[tokio::test]
async fn it_should_reject_a_form_missing_required_fields() {
    let (app, probe) = helpers::test_app();

    let response = helpers::post_form(app, &[("language_id", "en")], None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.detail().contains("text_input"));
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn it_should_accept_a_wellformed_reference_clip_and_clean_up() {
    let (app, probe) = helpers::test_app();

    let clip = helpers::wav_clip(5.0);
    let response =
        helpers::post_form(app, &helpers::valid_fields(), Some(("voice.wav", &clip))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(probe.call_count(), 1);

    // The engine saw a .wav temp path, and it is gone once the request is done
    let prompt = probe.last_prompt().expect("engine received no audio prompt");
    assert_eq!(prompt.extension().and_then(|e| e.to_str()), Some("wav"));
    assert!(!prompt.exists());
}

#[tokio::test]
async fn it_should_treat_an_empty_filename_upload_as_no_clip() {
    let (app, probe) = helpers::test_app();

    let clip = helpers::wav_clip(1.0);
    let response = helpers::post_form(app, &helpers::valid_fields(), Some(("", &clip))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(probe.call_count(), 1);
    assert_eq!(probe.last_prompt(), None);
}

#[tokio::test]
async fn it_should_ignore_unknown_form_fields() {
    let (app, _probe) = helpers::test_app();

    let mut fields = helpers::valid_fields();
    fields.push(("unexpected_field", "whatever"));

    let response = helpers::post_form(app, &fields, None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn it_should_pass_parameters_through_without_range_checks() {
    let (app, probe) = helpers::test_app();

    let mut fields = helpers::valid_fields();
    fields.push(("exaggeration_input", "2.0"));
    fields.push(("cfgw_input", "0.3"));
    fields.push(("temperature_input", "5.0"));

    let response = helpers::post_form(app, &fields, None).await;

    // Out-of-range values are the engine's concern, not the validator's
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(probe.call_count(), 1);
}
