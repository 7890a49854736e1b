//! 서명 키 엔티티
//!
//! 키 식별자는 공개 JWK의 RFC 7638 썸프린트로, 키 내용에서 결정적으로 유도됩니다.
//! 한 번 저장된 키는 변경하지 않습니다.

use mongodb::bson::DateTime;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};

use crate::domain::models::jwk::{Jwk, KeyType, encode_segment};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningKey {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: DateTime,
    /// 공개 파라미터는 항상, 개인 파라미터는 있을 때만 포함
    pub jwk: Jwk,
}

impl SigningKey {
    /// JWK에서 썸프린트를 계산해 키를 만듭니다.
    pub fn from_jwk(jwk: Jwk) -> AppResult<Self> {
        let id = jwk.thumbprint()?;
        Ok(Self {
            id,
            created_at: DateTime::now(),
            jwk,
        })
    }

    /// 새 P-256 키 생성
    pub fn generate_ec() -> AppResult<Self> {
        let secret = p256::SecretKey::random(&mut rsa::rand_core::OsRng);
        let point = secret.public_key().to_encoded_point(false);

        let (x, y) = match (point.x(), point.y()) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(AppError::KeyMaterialError(
                    "P-256 public point has no affine coordinates".to_string(),
                ));
            }
        };

        Self::from_jwk(Jwk::ec_p256(x, y, Some(&secret.to_bytes()[..])))
    }

    /// 외부에서 준비한 RSA 개인키를 가져옵니다.
    pub fn from_rsa_private_key(private_key: &RsaPrivateKey) -> AppResult<Self> {
        let mut jwk = Jwk::rsa_public(
            &private_key.n().to_bytes_be(),
            &private_key.e().to_bytes_be(),
        );
        jwk.d = Some(encode_segment(&private_key.d().to_bytes_be()));

        if let [p, q] = private_key.primes() {
            jwk.p = Some(encode_segment(&p.to_bytes_be()));
            jwk.q = Some(encode_segment(&q.to_bytes_be()));
        }
        jwk.dp = private_key.dp().map(|dp| encode_segment(&dp.to_bytes_be()));
        jwk.dq = private_key.dq().map(|dq| encode_segment(&dq.to_bytes_be()));
        jwk.qi = private_key.qinv().map(|qi| encode_segment(&qi.to_bytes_be().1));

        Self::from_jwk(jwk)
    }

    pub fn key_type(&self) -> AppResult<KeyType> {
        self.jwk.key_type()
    }

    pub fn has_private_material(&self) -> bool {
        self.jwk.has_private_material()
    }

    /// 검증 전용 배포를 위한 공개 키 사본
    pub fn public_only(&self) -> Self {
        Self {
            id: self.id.clone(),
            created_at: self.created_at,
            jwk: self.jwk.to_public(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ec_key_is_content_addressed() {
        let key = SigningKey::generate_ec().unwrap();

        assert_eq!(key.key_type().unwrap(), KeyType::Ec);
        assert!(key.has_private_material());
        assert_eq!(key.id, key.jwk.thumbprint().unwrap());
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let first = SigningKey::generate_ec().unwrap();
        let second = SigningKey::generate_ec().unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_public_only_keeps_identifier() {
        let key = SigningKey::generate_ec().unwrap();
        let public = key.public_only();

        assert_eq!(public.id, key.id);
        assert!(!public.has_private_material());
        assert!(public.jwk.x.is_some());
    }

    #[test]
    fn test_rsa_import_carries_crt_parameters() {
        let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).unwrap();
        let key = SigningKey::from_rsa_private_key(&private_key).unwrap();

        assert_eq!(key.key_type().unwrap(), KeyType::Rsa);
        assert_eq!(key.jwk.e.as_deref(), Some("AQAB"));
        assert!(key.jwk.p.is_some() && key.jwk.q.is_some());
        assert!(key.jwk.dp.is_some() && key.jwk.qi.is_some());
    }
}
