//! # Authentication Service
//!
//! 서명 키 생성, 토큰 발급, 요청별 토큰 검증을 조율하는 서비스입니다.
//!
//! ## 생명주기
//!
//! ```text
//! Uninitialized ──start()──▶ Ready
//!                  │
//!                  ├─ auto_generate_key = true  → P-256 키 생성 → 저장 → 현재 서명 키로 지정
//!                  ├─ signing_key_id = Some(id) → 키를 캐시에 적재해 확인 → 현재 서명 키로 지정
//!                  └─ 그 외                      → 서명 키 없이 Ready (외부에서 키 공급)
//! ```
//!
//! `start`만이 생성 경로이므로 초기화되지 않은 서비스는 타입으로 존재할 수 없습니다.
//!
//! ## 검증 정책
//!
//! `validate_token`은 절대 에러를 반환하지 않습니다. 형식 오류, `kid` 없음,
//! 미등록 키, 서명 불일치, 만료(`exp <= now`)는 모두 `None`으로 수렴하며
//! 호출자는 이를 익명 요청으로 취급합니다.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};
use jsonwebtoken::decode_header;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::entities::keys::SigningKey;
use crate::domain::models::auth::AuthenticatedIdentity;
use crate::domain::models::jwk::{Jwks, PublishedJwk};
use crate::domain::models::token::{IssuedToken, TenantSession, TokenClaims};
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::keys::KeyStore;
use crate::services::keys::KeyCache;

pub struct AuthenticationService {
    key_store: Arc<dyn KeyStore>,
    key_cache: Arc<KeyCache>,
    config: JwtConfig,
    current_key_id: RwLock<Option<String>>,
}

impl AuthenticationService {
    /// 초기화를 수행하고 Ready 상태의 서비스를 반환합니다.
    pub async fn start(
        config: JwtConfig,
        key_store: Arc<dyn KeyStore>,
        key_cache: Arc<KeyCache>,
    ) -> AppResult<Self> {
        let service = Self {
            key_store,
            key_cache,
            config,
            current_key_id: RwLock::new(None),
        };

        if service.config.auto_generate_key {
            service.generate_key().await?;
        } else if let Some(key_id) = service.config.signing_key_id.clone() {
            let handle = service.key_cache.resolve(&key_id).await?;
            if !handle.can_sign() {
                log::warn!("⚠️ 서명 키 {}에 개인키가 없습니다. 검증 전용으로 동작합니다", key_id);
            }
            service.set_current_key(key_id.clone())?;
            log::info!("🔑 설정된 서명 키 사용: {}", key_id);
        } else {
            log::warn!("⚠️ 서명 키 자동 생성이 꺼져 있고 지정된 키도 없습니다");
        }

        Ok(service)
    }

    /// 새 P-256 키를 생성/저장하고 현재 서명 키로 지정합니다.
    ///
    /// 이전 키로 서명된 토큰은 `kid`로 검증되므로 계속 유효합니다.
    pub async fn generate_key(&self) -> AppResult<String> {
        let key = SigningKey::generate_ec()?;
        self.key_store.store(&key.id, &key).await?;
        self.set_current_key(key.id.clone())?;

        log::info!("🔑 새 서명 키 생성: {}", key.id);
        Ok(key.id)
    }

    pub fn current_key_id(&self) -> AppResult<Option<String>> {
        self.current_key_id
            .read()
            .map(|guard| guard.clone())
            .context("signing key lock poisoned")
    }

    fn set_current_key(&self, key_id: String) -> AppResult<()> {
        let mut guard = self
            .current_key_id
            .write()
            .context("signing key lock poisoned")?;
        *guard = Some(key_id);
        Ok(())
    }

    /// 토큰을 검증하고 신원 정보를 반환합니다. 실패는 모두 `None`입니다.
    pub async fn validate_token(&self, token: &str) -> Option<AuthenticatedIdentity> {
        match self.verify(token).await {
            Ok(claims) => Some(AuthenticatedIdentity::new(claims)),
            Err(e) => {
                log::debug!("토큰 검증 실패: {}", e);
                None
            }
        }
    }

    async fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let header = decode_header(token)
            .map_err(|e| AppError::AuthenticationError(format!("malformed token: {}", e)))?;
        let key_id = header
            .kid
            .ok_or_else(|| AppError::AuthenticationError("token header has no kid".to_string()))?;

        let handle = self.key_cache.resolve(&key_id).await?;
        let claims = handle.verify(token)?;

        // 만료 시각이 현재와 같아도 거부
        let now = Utc::now().timestamp();
        if claims.exp.saturating_add(self.config.clock_skew_seconds) <= now {
            return Err(AppError::AuthenticationError(format!(
                "token expired at {} (now {})",
                claims.exp, now
            )));
        }

        Ok(claims)
    }

    /// 현재 서명 키로 토큰을 발급합니다.
    pub async fn issue_token(
        &self,
        user_id: &str,
        tenants: BTreeMap<String, TenantSession>,
    ) -> AppResult<IssuedToken> {
        let key_id = self.current_key_id()?.ok_or_else(|| {
            AppError::AuthenticationError("no signing key is configured".to_string())
        })?;
        let handle = self.key_cache.resolve(&key_id).await?;

        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            tenants,
        };

        let token = handle.sign(&claims)?;
        log::debug!("토큰 발급: user={}, kid={}", user_id, key_id);

        Ok(IssuedToken {
            token,
            key_id,
            expires_at: claims.exp,
        })
    }

    /// 현재 서명 키의 공개 JWK 집합
    pub async fn jwks(&self) -> AppResult<Jwks> {
        let Some(key_id) = self.current_key_id()? else {
            return Ok(Jwks { keys: Vec::new() });
        };
        let handle = self.key_cache.resolve(&key_id).await?;

        Ok(Jwks {
            keys: vec![PublishedJwk {
                jwk: handle.public_jwk.clone(),
                kid: handle.key_id.clone(),
                alg: format!("{:?}", handle.algorithm),
                key_use: "sig".to_string(),
            }],
        })
    }
}
