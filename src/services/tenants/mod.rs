pub mod tenant_session_service;

pub use tenant_session_service::TenantSessionService;
