pub mod permission_resolver;

pub use permission_resolver::{PermissionResolver, WILDCARD_PERMISSION};
