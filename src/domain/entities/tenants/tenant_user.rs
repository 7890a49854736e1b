use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::roles::Role;

/// 테넌트 소속 사용자 레코드
///
/// (tenant_id, user_id) 복합 키로 식별되며, `roles`는 해당 테넌트 안에서만 유효합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUser {
    pub tenant_id: String,
    pub user_id: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub joined_at: DateTime,
}

impl TenantUser {
    pub fn new(tenant_id: &str, user_id: &str, roles: Vec<Role>) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            user_id: user_id.to_string(),
            roles,
            joined_at: DateTime::now(),
        }
    }
}
