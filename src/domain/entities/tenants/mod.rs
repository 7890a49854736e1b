pub mod tenant_user;

pub use tenant_user::TenantUser;
