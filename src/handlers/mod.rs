//! # HTTP Request Handlers Module
//!
//! 얇은 HTTP 계층입니다. 각 핸들러는 `web::Data<AppContext>`에서 서비스를 꺼내
//! 호출하고, 실패는 `AppError`의 `ResponseError` 구현으로 변환됩니다.
//!
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | `GET` | `/.well-known/jwks.json` | [`jwks::jwks_handler`] |
//! | `GET` | `/api/v1/session` | [`session::current_session`] |
//! | `POST` | `/api/v1/session/logout` | [`session::logout`] |
//! | `POST` | `/api/v1/tenants/{tenant_id}/session` | [`tenants::enter_tenant`] |
//! | `GET` | `/api/v1/permissions/check` | [`permissions::check_permission`] |
//! | `POST` | `/api/v1/keys` | [`keys::rotate_key`] |
//!
//! 인증은 라우트 스코프에 붙은 `AuthMiddleware`가 처리하고,
//! 핸들러는 `AuthenticatedIdentity` 추출자로 결과만 받습니다.

pub mod jwks;
pub mod keys;
pub mod permissions;
pub mod session;
pub mod tenants;
