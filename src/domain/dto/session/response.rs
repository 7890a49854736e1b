use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::auth::AuthenticatedIdentity;
use crate::domain::models::token::TenantSession;

/// API 응답 래퍼
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// 현재 세션 정보
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub expires_at: i64,
    pub tenants: BTreeMap<String, TenantSession>,
}

impl From<&AuthenticatedIdentity> for SessionResponse {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            expires_at: identity.expires_at(),
            tenants: identity.claims().tenants.clone(),
        }
    }
}

/// 권한 검사 결과
#[derive(Debug, Serialize)]
pub struct PermissionCheckResponse {
    pub permission: String,
    pub tenant_id: Option<String>,
    pub granted: bool,
}

/// 키 회전 결과
#[derive(Debug, Serialize)]
pub struct KeyRotationResponse {
    pub key_id: String,
}
