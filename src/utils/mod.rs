pub mod files;
pub mod text;

pub use files::{MAX_TRANSCRIPT_BYTES, validate_file_size};
pub use text::{single_line, strip_control_sequences};
