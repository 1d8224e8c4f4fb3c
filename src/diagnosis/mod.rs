//! Plant diagnosis against the Gemini vision model.
//!
//! A diagnosis is one model call followed by normalization of whatever text
//! comes back. Failures at the model (policy blocks, network or quota errors)
//! are reported as negative diagnoses rather than HTTP errors; only text that
//! cannot be turned into a `DiagnosisResult` escalates to a 502.
//!
//! # Submodules
//!
//! - `prompt`: The fixed instruction sent with each image.
//! - `client`: Request construction and failure fallbacks.
//! - `normalizer`: Code-fence stripping, JSON parsing and schema validation.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod client;
pub mod normalizer;
pub mod prompt;

pub use client::{build_request, diagnose};
pub use normalizer::{normalize, strip_code_fence};
pub use prompt::PLANT_DIAGNOSIS_PROMPT;
