use std::fmt::Display;
use std::str::FromStr;

use super::error::{FieldError, ValidationError};

pub const DEFAULT_EXAGGERATION: f32 = 0.5;
pub const DEFAULT_CFG_WEIGHT: f32 = 0.5;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Raw multipart fields as submitted, before coercion.
/// Field names mirror the wire form.
#[derive(Debug, Default)]
pub struct SynthesisForm {
    pub text_input: Option<String>,
    pub language_id: Option<String>,
    pub exaggeration_input: Option<String>,
    pub cfgw_input: Option<String>,
    pub temperature_input: Option<String>,
    pub seed_num_input: Option<String>,
}

/// A well-formed synthesis request, built once per call.
///
/// No range bounds are enforced on the numeric parameters; out-of-range
/// values are the engine's concern. `seed == 0` means no explicit seed.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub language_id: String,
    pub exaggeration: f32,
    pub cfg_weight: f32,
    pub temperature: f32,
    pub seed: i64,
}

impl SynthesisRequest {
    /// Coerce the submitted form into a typed request, or fail with a
    /// [`ValidationError`] naming every field that did not parse.
    pub fn from_form(form: SynthesisForm) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        let text = required(&mut errors, "text_input", form.text_input);
        let language_id = required(&mut errors, "language_id", form.language_id);

        let exaggeration = coerce(
            &mut errors,
            "exaggeration_input",
            form.exaggeration_input,
            DEFAULT_EXAGGERATION,
        );
        let cfg_weight = coerce(&mut errors, "cfgw_input", form.cfgw_input, DEFAULT_CFG_WEIGHT);
        let temperature = coerce(
            &mut errors,
            "temperature_input",
            form.temperature_input,
            DEFAULT_TEMPERATURE,
        );
        let seed = coerce(&mut errors, "seed_num_input", form.seed_num_input, 0i64);

        if !errors.is_empty() {
            return Err(ValidationError { fields: errors });
        }

        Ok(Self {
            text,
            language_id,
            exaggeration,
            cfg_weight,
            temperature,
            seed,
        })
    }
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> String {
    match value {
        Some(value) => value,
        None => {
            errors.push(FieldError {
                field,
                message: "missing required field".to_string(),
            });
            String::new()
        }
    }
}

/// Parse an optional textual field into its numeric type, falling back to the
/// default when absent. A present but non-coercible value is recorded as a
/// field error, never silently defaulted.
fn coerce<T>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    raw: Option<String>,
    default: T,
) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(err) => {
            errors.push(FieldError {
                field,
                message: format!("{err} (got {raw:?})"),
            });
            default
        }
    }
}
