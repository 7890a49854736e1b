use actix_web::{get, web, HttpResponse};

use crate::core::{AppContext, AppError};
use crate::domain::dto::{ApiResponse, PermissionCheckQuery, PermissionCheckResponse};
use crate::domain::models::auth::AuthenticatedIdentity;

/// 현재 신원이 권한을 갖는지 확인합니다.
///
/// `tenant_id`가 없으면 전역 역할, 있으면 해당 테넌트 역할 기준입니다.
/// 빈 `permission`은 역할과 무관하게 허용됩니다.
#[get("/check")]
pub async fn check_permission(
    context: web::Data<AppContext>,
    identity: AuthenticatedIdentity,
    query: web::Query<PermissionCheckQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();

    let granted = context
        .permissions
        .check(&identity, &query.permission, query.tenant_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PermissionCheckResponse {
        permission: query.permission,
        tenant_id: query.tenant_id,
        granted,
    })))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::DataStores;
    use crate::domain::entities::roles::Role;
    use crate::domain::entities::users::User;
    use crate::middlewares::AuthMiddleware;

    async fn context() -> web::Data<AppContext> {
        let context = AppContext::assemble(AppConfig::in_memory(), DataStores::in_memory())
            .await
            .unwrap();
        context
            .stores
            .users
            .save(&User::new("user-1", "User", vec![Role::new("reader", ["docs:read"])]))
            .await
            .unwrap();
        web::Data::new(context)
    }

    async fn check(context: &web::Data<AppContext>, user_id: &str, query: &str) -> (StatusCode, Value) {
        let issued = context.auth.issue_token(user_id, BTreeMap::new()).await.unwrap();
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/api/v1/permissions")
                    .wrap(AuthMiddleware::required())
                    .service(check_permission),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/permissions/check?{}", query))
            .cookie(context.transport.build_cookie(Some(&issued.token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_global_permission_check() {
        let context = context().await;

        let (status, body) = check(&context, "user-1", "permission=docs:read").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["granted"], true);

        let (_, body) = check(&context, "user-1", "permission=docs:delete").await;
        assert_eq!(body["data"]["granted"], false);
    }

    #[actix_web::test]
    async fn test_explicit_empty_permission_is_wildcard() {
        let context = context().await;
        let (_, body) = check(&context, "user-1", "permission=").await;
        assert_eq!(body["data"]["permission"], "");
        assert_eq!(body["data"]["granted"], true);
    }

    #[actix_web::test]
    async fn test_missing_permission_parameter_is_bad_request() {
        let context = context().await;
        let issued = context.auth.issue_token("user-1", BTreeMap::new()).await.unwrap();
        let app = test::init_service(
            App::new().app_data(context.clone()).service(
                web::scope("/api/v1/permissions")
                    .wrap(AuthMiddleware::required())
                    .service(check_permission),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/permissions/check")
            .cookie(context.transport.build_cookie(Some(&issued.token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_tenant_check_without_session_is_denied() {
        let context = context().await;
        let (status, body) = check(&context, "user-1", "permission=docs:read&tenant_id=acme").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["tenant_id"], "acme");
        assert_eq!(body["data"]["granted"], false);
    }

    #[actix_web::test]
    async fn test_unknown_user_is_server_error() {
        let context = context().await;
        let (status, body) = check(&context, "ghost", "permission=docs:read").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }
}
