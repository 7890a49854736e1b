//! # Key Cache
//!
//! 키 식별자 → 파싱된 서명/검증 키 핸들을 보관하는 용량 제한 LRU 캐시입니다.
//! 요청마다 저장소를 왕복하고 JWK를 다시 파싱하는 비용을 없앱니다.
//!
//! ```text
//! resolve(kid)
//!   ├─ hit  → Arc<CachedKeyHandle> (재파싱 없음)
//!   └─ miss → KeyStore::load → CachedKeyHandle::from_signing_key → insert → 반환
//! ```
//!
//! 같은 식별자에 대한 동시 miss는 각자 로드하고 마지막 insert가 남습니다.
//! 두 핸들은 같은 키에서 만들어지므로 결과는 동일합니다.
//! 명시적 무효화는 없고, 용량 초과 시 LRU 항목만 제거됩니다.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::{future::Cache, policy::EvictionPolicy};
use p256::pkcs8::EncodePrivateKey;
use rsa::{BigUint, RsaPrivateKey, pkcs1::EncodeRsaPrivateKey};

use crate::config::KeyCacheConfig;
use crate::domain::entities::keys::SigningKey;
use crate::domain::models::jwk::{Jwk, KeyType, decode_segment, required};
use crate::domain::models::token::TokenClaims;
use crate::errors::{AppError, AppResult};
use crate::repositories::keys::KeyStore;

/// 서명 키 하나에 대한 서명기/검증기 묶음
pub struct CachedKeyHandle {
    pub key_id: String,
    /// 공개 키만 있는 경우 `None`
    signer: Option<EncodingKey>,
    verifier: DecodingKey,
    /// 키 타입이 지원하는 첫 번째 알고리즘
    pub algorithm: Algorithm,
    pub public_jwk: Jwk,
}

impl CachedKeyHandle {
    /// 키 타입에 따라 ECDSA(ES256) 또는 RSASSA(RS256) 쌍을 만듭니다.
    pub fn from_signing_key(key: &SigningKey) -> AppResult<Self> {
        let key_type = key.key_type()?;

        let (signer, verifier) = match key_type {
            KeyType::Ec => (ec_signer(&key.jwk)?, ec_verifier(&key.jwk)?),
            KeyType::Rsa => (rsa_signer(&key.jwk)?, rsa_verifier(&key.jwk)?),
        };

        Ok(Self {
            key_id: key.id.clone(),
            signer,
            verifier,
            algorithm: key_type.signing_algorithm(),
            public_jwk: key.jwk.to_public(),
        })
    }

    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    /// 헤더에 `kid`를 넣어 컴팩트 JWT로 서명합니다.
    pub fn sign(&self, claims: &TokenClaims) -> AppResult<String> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            AppError::KeyMaterialError(format!("key '{}' has no private material", self.key_id))
        })?;

        let mut header = Header::new(self.algorithm);
        header.kid = Some(self.key_id.clone());

        encode(&header, claims, signer)
            .map_err(|e| AppError::KeyMaterialError(format!("token signing failed: {}", e)))
    }

    /// 서명과 알고리즘만 검증합니다. 만료 판정은 호출자가 합니다.
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;

        decode::<TokenClaims>(token, &self.verifier, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::AuthenticationError(format!("token verification failed: {}", e)))
    }
}

impl fmt::Debug for CachedKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedKeyHandle")
            .field("key_id", &self.key_id)
            .field("algorithm", &self.algorithm)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

fn ec_signer(jwk: &Jwk) -> AppResult<Option<EncodingKey>> {
    let Some(d) = jwk.d.as_deref() else {
        return Ok(None);
    };

    let secret = p256::SecretKey::from_slice(&decode_segment(d, "d")?)
        .map_err(|e| AppError::KeyMaterialError(format!("invalid P-256 scalar: {}", e)))?;
    let der = secret
        .to_pkcs8_der()
        .map_err(|e| AppError::KeyMaterialError(format!("PKCS#8 encoding failed: {}", e)))?;

    Ok(Some(EncodingKey::from_ec_der(der.as_bytes())))
}

fn ec_verifier(jwk: &Jwk) -> AppResult<DecodingKey> {
    DecodingKey::from_ec_components(required(&jwk.x, "x")?, required(&jwk.y, "y")?)
        .map_err(|e| AppError::KeyMaterialError(format!("invalid EC public key: {}", e)))
}

fn rsa_signer(jwk: &Jwk) -> AppResult<Option<EncodingKey>> {
    let Some(d) = jwk.d.as_deref() else {
        return Ok(None);
    };

    let uint = |value: &str, field: &str| -> AppResult<BigUint> {
        Ok(BigUint::from_bytes_be(&decode_segment(value, field)?))
    };

    let private_key = RsaPrivateKey::from_components(
        uint(required(&jwk.n, "n")?, "n")?,
        uint(required(&jwk.e, "e")?, "e")?,
        uint(d, "d")?,
        vec![
            uint(required(&jwk.p, "p")?, "p")?,
            uint(required(&jwk.q, "q")?, "q")?,
        ],
    )
    .map_err(|e| AppError::KeyMaterialError(format!("invalid RSA private key: {}", e)))?;

    let private_key_pem = private_key
        .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
        .map_err(|e| AppError::KeyMaterialError(format!("PKCS#1 encoding failed: {}", e)))?;

    EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map(Some)
        .map_err(|e| AppError::KeyMaterialError(format!("invalid RSA signing key: {}", e)))
}

fn rsa_verifier(jwk: &Jwk) -> AppResult<DecodingKey> {
    DecodingKey::from_rsa_components(required(&jwk.n, "n")?, required(&jwk.e, "e")?)
        .map_err(|e| AppError::KeyMaterialError(format!("invalid RSA public key: {}", e)))
}

/// `moka` LRU 기반 키 캐시
pub struct KeyCache {
    cache: Cache<String, Arc<CachedKeyHandle>>,
    key_store: Arc<dyn KeyStore>,
}

impl KeyCache {
    pub fn new(key_store: Arc<dyn KeyStore>, config: &KeyCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { cache, key_store }
    }

    /// 캐시에서 핸들을 찾고, 없으면 저장소에서 로드해 채웁니다.
    ///
    /// 저장소에 키가 없으면 `AppError::NotFound`,
    /// 지원하지 않는 키 타입이면 `AppError::UnsupportedKeyType`을 반환합니다.
    pub async fn resolve(&self, key_id: &str) -> AppResult<Arc<CachedKeyHandle>> {
        if let Some(handle) = self.cache.get(key_id).await {
            return Ok(handle);
        }

        log::debug!("키 캐시 miss: {}", key_id);
        let key = self.key_store.load(key_id).await?;
        let handle = Arc::new(CachedKeyHandle::from_signing_key(&key)?);

        self.cache.insert(key_id.to_string(), handle.clone()).await;
        Ok(handle)
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// 대기 중인 eviction 등 내부 유지보수 작업을 즉시 처리합니다.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}
