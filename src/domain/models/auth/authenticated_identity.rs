//! 요청 단위 인증 결과
//!
//! `AuthMiddleware`가 쿠키의 토큰을 검증한 뒤 Request Extensions에 저장하고,
//! 핸들러는 `FromRequest` 추출자로 꺼내 씁니다. 요청 처리가 끝나면 버려지며 저장되지 않습니다.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::models::token::{TenantSession, TokenClaims};

/// 검증에 성공한 토큰의 클레임을 감싸는 신원 정보
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    claims: Arc<TokenClaims>,
}

impl AuthenticatedIdentity {
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims: Arc::new(claims) }
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }

    pub fn expires_at(&self) -> i64 {
        self.claims.exp
    }

    /// 토큰에 기록된 테넌트 세션 조회
    pub fn tenant_session(&self, tenant_id: &str) -> Option<&TenantSession> {
        self.claims.tenants.get(tenant_id)
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedIdentity>() {
            Some(identity) => ready(Ok(identity.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 인증이 선택적인 엔드포인트용 래퍼
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<AuthenticatedIdentity>);

impl FromRequest for OptionalIdentity {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let identity = req.extensions().get::<AuthenticatedIdentity>().cloned();
        ready(Ok(OptionalIdentity(identity)))
    }
}
