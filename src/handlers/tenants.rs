use actix_web::{post, web, HttpResponse};

use crate::core::{AppContext, AppError};
use crate::domain::dto::{ApiResponse, SessionResponse};
use crate::domain::models::auth::AuthenticatedIdentity;

/// 테넌트 진입
///
/// 소속이 확인되면 해당 테넌트 세션이 추가된 토큰을 새로 발급해 쿠키에 저장합니다.
#[post("/{tenant_id}/session")]
pub async fn enter_tenant(
    context: web::Data<AppContext>,
    identity: AuthenticatedIdentity,
    tenant_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let issued = context.tenant_sessions.enter_tenant(&identity, &tenant_id).await?;

    // 응답 본문은 새 토큰의 클레임 기준
    let refreshed = context
        .auth
        .validate_token(&issued.token)
        .await
        .ok_or_else(|| AppError::InternalError("freshly issued token failed validation".to_string()))?;

    let mut response = HttpResponse::Ok().json(ApiResponse::success(SessionResponse::from(&refreshed)));
    context.transport.store(&mut response, Some(&issued.token))?;
    Ok(response)
}
