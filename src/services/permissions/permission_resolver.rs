//! # Permission Resolver
//!
//! 인증된 신원과 선택적 테넌트로부터 유효 권한 집합을 계산하고 권한 질의에 답합니다.
//!
//! | 범위 | 조회 | 레코드 없음 | 세션 없음 |
//! |------|------|-------------|-----------|
//! | 전역 | `UserStore::find_by_id` | `InconsistentState` 전파 | - |
//! | 테넌트 | `TenantUserStore::find_by_tenant_and_user` | `InconsistentState` 전파 | `Ok(false)` |
//!
//! 빈 문자열 권한은 와일드카드로, 역할과 무관하게 항상 허용됩니다.

use std::sync::Arc;

use crate::domain::entities::roles::effective_permissions;
use crate::domain::models::auth::AuthenticatedIdentity;
use crate::errors::{AppError, AppResult};
use crate::repositories::tenants::TenantUserStore;
use crate::repositories::users::UserStore;

/// 항상 허용되는 권한 문자열
pub const WILDCARD_PERMISSION: &str = "";

pub struct PermissionResolver {
    users: Arc<dyn UserStore>,
    tenant_users: Arc<dyn TenantUserStore>,
}

impl PermissionResolver {
    pub fn new(users: Arc<dyn UserStore>, tenant_users: Arc<dyn TenantUserStore>) -> Self {
        Self { users, tenant_users }
    }

    pub async fn check(
        &self,
        identity: &AuthenticatedIdentity,
        permission: &str,
        tenant_id: Option<&str>,
    ) -> AppResult<bool> {
        let user_id = identity.user_id();

        let roles = match tenant_id {
            None => {
                let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
                    log::error!("❌ 인증된 사용자 {}가 사용자 저장소에 없습니다", user_id);
                    AppError::InconsistentState(format!("user '{}' not found", user_id))
                })?;
                user.roles
            }
            Some(tenant_id) => {
                if identity.tenant_session(tenant_id).is_none() {
                    log::debug!("테넌트 세션 없음: user={}, tenant={}", user_id, tenant_id);
                    return Ok(false);
                }

                let member = self
                    .tenant_users
                    .find_by_tenant_and_user(tenant_id, user_id)
                    .await?
                    .ok_or_else(|| {
                        log::error!(
                            "❌ 테넌트 세션이 있으나 테넌트 사용자 {}/{}가 없습니다",
                            tenant_id,
                            user_id
                        );
                        AppError::InconsistentState(format!(
                            "tenant user '{}' in tenant '{}' not found",
                            user_id, tenant_id
                        ))
                    })?;
                member.roles
            }
        };

        if permission == WILDCARD_PERMISSION {
            return Ok(true);
        }

        Ok(effective_permissions(&roles).contains(permission))
    }
}
