pub mod token;

pub use token::{IssuedToken, TenantSession, TokenClaims};
