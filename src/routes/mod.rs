//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별 스코프로 묶고, 스코프마다 인증 레벨을 지정합니다.
//!
//! # Auth Middleware Usage
//!
//! ## 선택적 인증
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/session")
//!         .wrap(AuthMiddleware::optional())
//!         .service(handlers::session::logout)   // 토큰 없이도 호출 가능
//! );
//! ```
//!
//! ## 인증 필요 + 전역 권한 검증
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/keys")
//!         .wrap(AuthMiddleware::required_with_permission("keys:rotate"))
//!         .service(handlers::keys::rotate_key)
//! );
//! ```
//!
//! 핸들러는 `web::Data<AppContext>`가 앱에 등록되어 있다고 가정합니다.

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::core::AppContext;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 키 회전 권한
pub const KEY_ROTATION_PERMISSION: &str = "keys:rotate";

/// 모든 라우트를 설정합니다
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new()
///     .app_data(web::Data::new(context))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // 공개 키 세트
    cfg.service(handlers::jwks::jwks_handler);

    configure_session_routes(cfg);
    configure_tenant_routes(cfg);
    configure_permission_routes(cfg);
    configure_key_routes(cfg);
}

/// 세션 라우트
///
/// - `GET /api/v1/session` - 현재 신원 (쿠키 토큰 필요)
/// - `POST /api/v1/session/logout` - 쿠키 만료
///
/// ```bash
/// curl --cookie "mosaic_token=eyJ..." http://localhost:8080/api/v1/session
/// ```
fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/session")
            .wrap(AuthMiddleware::optional())
            .service(handlers::session::current_session)
            .service(handlers::session::logout)
    );
}

/// 테넌트 진입 라우트
///
/// - `POST /api/v1/tenants/{tenant_id}/session`
fn configure_tenant_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tenants")
            .wrap(AuthMiddleware::required())
            .service(handlers::tenants::enter_tenant)
    );
}

/// 권한 검사 라우트
///
/// - `GET /api/v1/permissions/check?permission=docs:read&tenant_id=acme`
fn configure_permission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/permissions")
            .wrap(AuthMiddleware::required())
            .service(handlers::permissions::check_permission)
    );
}

/// 키 관리 라우트 (`keys:rotate` 전역 권한 필요)
fn configure_key_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/keys")
            .wrap(AuthMiddleware::required_with_permission(KEY_ROTATION_PERMISSION))
            .service(handlers::keys::rotate_key)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "mosaic_boot",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {
///     "storage": "MongoDB",
///     "token_transport": "http-only cookie"
///   }
/// }
/// ```
#[get("/health")]
async fn health_check(context: web::Data<AppContext>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "mosaic_boot",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "storage": context.config.storage.as_str(),
            "token_transport": "http-only cookie",
            "cached_keys": context.key_cache.entry_count(),
        }
    }))
}
