use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 서명된 토큰의 클레임
///
/// 서명 키 식별자는 클레임이 아닌 JWT 헤더의 `kid`로 전달됩니다.
/// 발급 이후에는 변경하지 않고, 테넌트 진입 시에는 새 토큰을 다시 발급합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    /// 테넌트 ID → 테넌트 세션
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tenants: BTreeMap<String, TenantSession>,
}

/// 사용자가 진입한 테넌트 세션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSession {
    pub tenant_id: String,
    /// 진입 시각 (unix seconds)
    pub entered_at: i64,
}

/// 토큰 발급 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub key_id: String,
    pub expires_at: i64,
}
