//! JWK (JSON Web Key) 표현과 RFC 7638 썸프린트
//!
//! 서명 키는 공개/개인 파라미터를 모두 JWK 필드로 저장합니다.
//! EC 키는 `crv`, `x`, `y`, `d`를, RSA 키는 `n`, `e`, `d`, `p`, `q`, `dp`, `dq`, `qi`를 사용합니다.
//! 모든 바이너리 값은 패딩 없는 base64url 문자열입니다.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

pub const KTY_EC: &str = "EC";
pub const KTY_RSA: &str = "RSA";
pub const CRV_P256: &str = "P-256";

/// 지원하는 키 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// P-256 곡선의 ECDSA 키
    Ec,
    Rsa,
}

impl KeyType {
    /// 키 타입이 지원하는 서명 알고리즘 목록. 첫 번째 항목이 서명에 사용됩니다.
    pub fn supported_algorithms(&self) -> &'static [Algorithm] {
        match self {
            KeyType::Ec => &[Algorithm::ES256],
            KeyType::Rsa => &[
                Algorithm::RS256,
                Algorithm::RS384,
                Algorithm::RS512,
                Algorithm::PS256,
                Algorithm::PS384,
                Algorithm::PS512,
            ],
        }
    }

    pub fn signing_algorithm(&self) -> Algorithm {
        self.supported_algorithms()[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}

impl Jwk {
    pub fn ec_p256(x: &[u8], y: &[u8], d: Option<&[u8]>) -> Self {
        Self {
            kty: KTY_EC.to_string(),
            crv: Some(CRV_P256.to_string()),
            x: Some(encode_segment(x)),
            y: Some(encode_segment(y)),
            d: d.map(encode_segment),
            ..Self::empty(KTY_EC)
        }
    }

    pub fn rsa_public(n: &[u8], e: &[u8]) -> Self {
        Self {
            n: Some(encode_segment(n)),
            e: Some(encode_segment(e)),
            ..Self::empty(KTY_RSA)
        }
    }

    fn empty(kty: &str) -> Self {
        Self {
            kty: kty.to_string(),
            crv: None,
            x: None,
            y: None,
            n: None,
            e: None,
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        }
    }

    /// `kty`/`crv` 조합을 지원 키 타입으로 해석합니다.
    pub fn key_type(&self) -> AppResult<KeyType> {
        match self.kty.as_str() {
            KTY_EC => match self.crv.as_deref() {
                Some(CRV_P256) => Ok(KeyType::Ec),
                other => Err(AppError::UnsupportedKeyType(format!(
                    "EC curve {}",
                    other.unwrap_or("<none>")
                ))),
            },
            KTY_RSA => Ok(KeyType::Rsa),
            other => Err(AppError::UnsupportedKeyType(other.to_string())),
        }
    }

    pub fn has_private_material(&self) -> bool {
        self.d.is_some()
    }

    /// 개인 파라미터를 모두 제거한 공개 JWK
    pub fn to_public(&self) -> Self {
        Self {
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            ..self.clone()
        }
    }

    /// RFC 7638 썸프린트 (SHA-256, base64url)
    ///
    /// 필수 공개 멤버만 사전순으로, 공백 없이 직렬화한 뒤 해시합니다.
    pub fn thumbprint(&self) -> AppResult<String> {
        let canonical = match self.key_type()? {
            KeyType::Ec => format!(
                r#"{{"crv":"{}","kty":"{}","x":"{}","y":"{}"}}"#,
                CRV_P256,
                KTY_EC,
                required(&self.x, "x")?,
                required(&self.y, "y")?
            ),
            KeyType::Rsa => format!(
                r#"{{"e":"{}","kty":"{}","n":"{}"}}"#,
                required(&self.e, "e")?,
                KTY_RSA,
                required(&self.n, "n")?
            ),
        };

        Ok(encode_segment(&Sha256::digest(canonical.as_bytes())))
    }
}

/// JWKS 엔드포인트에 게시되는 공개 키 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedJwk {
    #[serde(flatten)]
    pub jwk: Jwk,
    pub kid: String,
    pub alg: String,
    #[serde(rename = "use")]
    pub key_use: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<PublishedJwk>,
}

pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode_segment(value: &str, field: &str) -> AppResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| AppError::KeyMaterialError(format!("invalid base64url in '{}': {}", field, e)))
}

pub(crate) fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AppError::KeyMaterialError(format!("missing JWK member '{}'", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc7638_rsa_thumbprint_vector() {
        // RFC 7638 3.1 예제 키
        let jwk = Jwk {
            n: Some("0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw".to_string()),
            e: Some("AQAB".to_string()),
            ..Jwk::empty(KTY_RSA)
        };

        assert_eq!(
            jwk.thumbprint().unwrap(),
            "NzbLsXh8uDCcd-6MNwXF4W_7noWXFZAfHkxZsRGC9Xs"
        );
    }

    #[test]
    fn test_key_type_dispatch() {
        let ec = Jwk::ec_p256(&[1; 32], &[2; 32], None);
        assert_eq!(ec.key_type().unwrap(), KeyType::Ec);
        assert_eq!(ec.key_type().unwrap().signing_algorithm(), Algorithm::ES256);

        let rsa = Jwk::rsa_public(&[1, 2, 3], &[1, 0, 1]);
        assert_eq!(rsa.key_type().unwrap().signing_algorithm(), Algorithm::RS256);

        let oct = Jwk::empty("oct");
        assert!(matches!(oct.key_type(), Err(AppError::UnsupportedKeyType(_))));

        let secp384 = Jwk { crv: Some("P-384".to_string()), ..ec.clone() };
        assert!(matches!(secp384.key_type(), Err(AppError::UnsupportedKeyType(_))));
    }

    #[test]
    fn test_to_public_strips_private_members() {
        let jwk = Jwk::ec_p256(&[1; 32], &[2; 32], Some(&[3; 32]));
        assert!(jwk.has_private_material());

        let public = jwk.to_public();
        assert!(!public.has_private_material());
        assert_eq!(public.x, jwk.x);
        assert_eq!(public.thumbprint().unwrap(), jwk.thumbprint().unwrap());
    }

    #[test]
    fn test_published_jwk_serializes_flat() {
        let published = PublishedJwk {
            jwk: Jwk::ec_p256(&[1; 32], &[2; 32], None),
            kid: "kid-1".to_string(),
            alg: "ES256".to_string(),
            key_use: "sig".to_string(),
        };
        let value = serde_json::to_value(&published).unwrap();

        assert_eq!(value["kty"], "EC");
        assert_eq!(value["use"], "sig");
        assert!(value.get("d").is_none());
    }
}
