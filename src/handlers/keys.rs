use actix_web::{post, web, HttpResponse};

use crate::core::{AppContext, AppError};
use crate::domain::dto::{ApiResponse, KeyRotationResponse};
use crate::domain::models::auth::AuthenticatedIdentity;

/// 새 EC 서명 키를 생성해 현재 키로 교체합니다.
///
/// 이전 키로 서명된 토큰은 저장소에 키가 남아 있으므로 만료 전까지 계속 검증됩니다.
#[post("")]
pub async fn rotate_key(
    context: web::Data<AppContext>,
    identity: AuthenticatedIdentity,
) -> Result<HttpResponse, AppError> {
    let key_id = context.auth.generate_key().await?;

    log::info!("🔄 서명 키 회전: kid={}, 요청자={}", key_id, identity.user_id());
    Ok(HttpResponse::Created().json(ApiResponse::success(KeyRotationResponse { key_id })))
}
