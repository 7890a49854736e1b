pub mod authenticated_identity;
pub mod authentication_request;

pub use authenticated_identity::{AuthenticatedIdentity, OptionalIdentity};
pub use authentication_request::{AuthMode, RequiredPermission};
