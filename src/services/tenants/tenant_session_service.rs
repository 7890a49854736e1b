use std::sync::Arc;

use chrono::Utc;

use crate::domain::models::auth::AuthenticatedIdentity;
use crate::domain::models::token::{IssuedToken, TenantSession};
use crate::errors::{AppError, AppResult};
use crate::repositories::tenants::TenantUserStore;
use crate::services::auth::AuthenticationService;

/// 테넌트 진입 서비스
///
/// 소속을 확인한 뒤 기존 테넌트 세션에 새 세션을 더한 토큰을 다시 발급합니다.
/// 권한 검사 시 테넌트 범위는 이 세션이 있어야만 열립니다.
pub struct TenantSessionService {
    auth: Arc<AuthenticationService>,
    tenant_users: Arc<dyn TenantUserStore>,
}

impl TenantSessionService {
    pub fn new(auth: Arc<AuthenticationService>, tenant_users: Arc<dyn TenantUserStore>) -> Self {
        Self { auth, tenant_users }
    }

    pub async fn enter_tenant(
        &self,
        identity: &AuthenticatedIdentity,
        tenant_id: &str,
    ) -> AppResult<IssuedToken> {
        let user_id = identity.user_id();

        if self
            .tenant_users
            .find_by_tenant_and_user(tenant_id, user_id)
            .await?
            .is_none()
        {
            log::warn!("테넌트 진입 거부: user={}, tenant={}", user_id, tenant_id);
            return Err(AppError::AuthorizationError(format!(
                "user '{}' is not a member of tenant '{}'",
                user_id, tenant_id
            )));
        }

        let mut tenants = identity.claims().tenants.clone();
        tenants.insert(
            tenant_id.to_string(),
            TenantSession {
                tenant_id: tenant_id.to_string(),
                entered_at: Utc::now().timestamp(),
            },
        );

        log::info!("🏢 테넌트 진입: user={}, tenant={}", user_id, tenant_id);
        self.auth.issue_token(user_id, tenants).await
    }
}
