pub mod signing_key;

pub use signing_key::SigningKey;
