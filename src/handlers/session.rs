//! 세션 조회 / 로그아웃 핸들러

use actix_web::{get, post, web, HttpResponse};

use crate::core::{AppContext, AppError};
use crate::domain::dto::{ApiResponse, SessionResponse};
use crate::domain::models::auth::AuthenticatedIdentity;

/// 현재 쿠키 토큰의 신원 정보
#[get("")]
pub async fn current_session(identity: AuthenticatedIdentity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionResponse::from(&identity))))
}

/// 인증 쿠키를 즉시 만료시킵니다. 토큰이 없어도 성공합니다.
#[post("/logout")]
pub async fn logout(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let mut response = HttpResponse::Ok().json(ApiResponse::message("로그아웃되었습니다"));
    context.transport.store(&mut response, None)?;

    log::info!("🚪 로그아웃 처리");
    Ok(response)
}
