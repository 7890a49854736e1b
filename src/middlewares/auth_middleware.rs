//! 쿠키 기반 인증 미들웨어
//!
//! 요청 쿠키에서 토큰을 꺼내 `AuthenticationService`로 검증하고,
//! 성공하면 [`AuthenticatedIdentity`](crate::domain::models::auth::AuthenticatedIdentity)를
//! Request Extensions에 넣습니다.
//!
//! ```rust,ignore
//! web::scope("/api/v1/keys")
//!     .wrap(AuthMiddleware::required_with_permission("keys:rotate"))
//!     .service(handlers::keys::rotate_key)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};

use crate::domain::models::auth::{AuthMode, RequiredPermission};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
    required_permission: Option<RequiredPermission>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_permission: None,
        }
    }

    pub fn new_with_permission(mode: AuthMode, required_permission: RequiredPermission) -> Self {
        Self {
            mode,
            required_permission: Some(required_permission),
        }
    }

    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 선택적 인증 + 권한이 있을 때만 신원 노출
    pub fn optional_with_permission(permission: &str) -> Self {
        Self::new_with_permission(
            AuthMode::Optional,
            RequiredPermission::Single(permission.to_string())
        )
    }

    /// 인증 필수 + 전역 권한 하나 필요
    pub fn required_with_permission(permission: &str) -> Self {
        Self::new_with_permission(
            AuthMode::Required,
            RequiredPermission::Single(permission.to_string())
        )
    }

    /// 인증 필수 + 나열된 전역 권한 중 하나 필요
    pub fn required_with_any_permission(permissions: Vec<&str>) -> Self {
        let permission_strings: Vec<String> = permissions.into_iter().map(|s| s.to_string()).collect();
        Self::new_with_permission(
            AuthMode::Required,
            RequiredPermission::Any(permission_strings)
        )
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_permission: self.required_permission.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use super::*;
    use crate::config::AppConfig;
    use crate::core::{AppContext, DataStores};
    use crate::domain::entities::roles::Role;
    use crate::domain::entities::users::User;
    use crate::domain::models::auth::OptionalIdentity;

    async fn context_with_users() -> web::Data<AppContext> {
        let context = AppContext::assemble(AppConfig::in_memory(), DataStores::in_memory())
            .await
            .unwrap();
        context
            .stores
            .users
            .save(&User::new("admin", "Admin", vec![Role::new("ops", ["keys:rotate"])]))
            .await
            .unwrap();
        context
            .stores
            .users
            .save(&User::new("member", "Member", vec![Role::new("reader", ["docs:read"])]))
            .await
            .unwrap();
        web::Data::new(context)
    }

    async fn cookie_for(context: &AppContext, user_id: &str) -> actix_web::cookie::Cookie<'static> {
        let issued = context.auth.issue_token(user_id, BTreeMap::new()).await.unwrap();
        context.transport.build_cookie(Some(&issued.token))
    }

    async fn whoami(identity: OptionalIdentity) -> HttpResponse {
        match identity.0 {
            Some(identity) => HttpResponse::Ok().body(identity.user_id().to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_required_rejects_missing_cookie() {
        let context = context_with_users().await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/secure")
                    .wrap(AuthMiddleware::required())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/secure").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_required_accepts_valid_cookie() {
        let context = context_with_users().await;
        let cookie = cookie_for(&context, "member").await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/secure")
                    .wrap(AuthMiddleware::required())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/secure").cookie(cookie).to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "member");
    }

    #[actix_web::test]
    async fn test_optional_treats_invalid_token_as_anonymous() {
        let context = context_with_users().await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/open")
                    .wrap(AuthMiddleware::optional())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let cookie = context.transport.build_cookie(Some("not-a-token"));
        let req = test::TestRequest::get().uri("/open").cookie(cookie).to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_required_permission_is_enforced() {
        let context = context_with_users().await;
        let admin = cookie_for(&context, "admin").await;
        let member = cookie_for(&context, "member").await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/keys")
                    .wrap(AuthMiddleware::required_with_permission("keys:rotate"))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/keys").cookie(admin).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/keys").cookie(member).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_optional_permission_hides_identity_without_grant() {
        let context = context_with_users().await;
        let admin = cookie_for(&context, "admin").await;
        let member = cookie_for(&context, "member").await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/open")
                    .wrap(AuthMiddleware::optional_with_permission("keys:rotate"))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/open").cookie(admin).to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "admin");

        let req = test::TestRequest::get().uri("/open").cookie(member).to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "anonymous");
    }

    #[actix_web::test]
    async fn test_optional_permission_with_unknown_user_is_server_error() {
        let context = context_with_users().await;
        let ghost = cookie_for(&context, "ghost").await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/open")
                    .wrap(AuthMiddleware::optional_with_permission("keys:rotate"))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/open").cookie(ghost).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_unknown_user_with_permission_check_is_server_error() {
        let context = context_with_users().await;
        let ghost = cookie_for(&context, "ghost").await;
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/keys")
                    .wrap(AuthMiddleware::required_with_any_permission(vec!["keys:rotate", "keys:read"]))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/keys").cookie(ghost).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
