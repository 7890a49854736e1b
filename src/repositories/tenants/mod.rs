pub mod tenant_user_repo;

use async_trait::async_trait;

use crate::domain::entities::tenants::TenantUser;
use crate::errors::AppResult;

pub use tenant_user_repo::TenantUserRepository;

/// (tenant_id, user_id) 복합 키 조회
#[async_trait]
pub trait TenantUserStore: Send + Sync {
    async fn find_by_tenant_and_user(&self, tenant_id: &str, user_id: &str) -> AppResult<Option<TenantUser>>;

    async fn save(&self, tenant_user: &TenantUser) -> AppResult<()>;
}
