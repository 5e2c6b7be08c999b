//! Bearer token encoding, decoding, and claims management.

pub mod claims;
pub mod codec;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
