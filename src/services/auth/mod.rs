pub mod authentication_service;
pub mod token_transport;

pub use authentication_service::AuthenticationService;
pub use token_transport::CookieTokenTransport;
