//! Test doubles for the encoder seam.

mod mock_encoder;

pub use mock_encoder::MockEncoder;
