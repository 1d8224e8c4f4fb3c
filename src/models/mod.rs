// Data models for the public API and the upstream Gemini API
// Author: kelexine (https://github.com/kelexine)

pub mod diagnosis;
pub mod gemini;

pub use diagnosis::DiagnosisResult;
