pub mod log_codec;
pub mod log_file;
