use actix_web::{get, web, HttpResponse};

use crate::core::{AppContext, AppError};

/// 현재 서명 키의 공개 JWK 세트
#[get("/.well-known/jwks.json")]
pub async fn jwks_handler(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let jwks = context.auth.jwks().await?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .json(jwks))
}
