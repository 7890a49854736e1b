pub mod role;

pub use role::{Role, effective_permissions};
