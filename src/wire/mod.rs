pub mod decode;
pub mod envelope;
