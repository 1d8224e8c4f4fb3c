//! Upload validation and image preparation for the vision model.
//!
//! Uploads pass through two steps before the model sees them: the declared
//! content type is checked against an allow-list, then the bytes are decoded
//! and re-encoded into the format that content type names.
//!
//! # Submodules
//!
//! - `models`: Supported formats, the content-type gate and `ImagePart`.
//! - `adapter`: Decoding and re-encoding of uploaded bytes.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod adapter;
pub mod models;

pub use adapter::{adapt_upload, to_image_part};
pub use models::{validate_content_type, ImageFormat, ImagePart, ALLOWED_MIME_TYPES};
