pub mod error;
pub mod request;
pub mod service;

pub use request::{SynthesisForm, SynthesisRequest};
pub use service::{SynthesisApi, TtsService};
