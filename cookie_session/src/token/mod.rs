mod codec;
mod errors;
mod types;

pub use codec::{SessionTokenCodec, TokenCodec};
pub use errors::TokenError;
pub use types::SessionClaims;
