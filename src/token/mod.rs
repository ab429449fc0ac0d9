mod builder;
mod decoded;
mod header;
mod parsed;

pub use builder::TokenBuilder;
pub use decoded::DecodedToken;
pub use header::{Header, TOKEN_TYPE};
pub use parsed::decode;

pub(crate) use parsed::parse;
