use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::tenants::TenantUser;
use crate::errors::{AppError, AppResult};
use crate::repositories::tenants::TenantUserStore;

pub struct TenantUserRepository {
    db: Arc<Database>,
}

impl TenantUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<TenantUser> {
        self.db.collection::<TenantUser>("tenant_users")
    }

    /// 복합 키 유니크 인덱스
    pub async fn create_indexes(&self) -> AppResult<()> {
        let membership_index = IndexModel::builder()
            .keys(doc! { "tenant_id": 1, "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("tenant_user_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(membership_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TenantUserStore for TenantUserRepository {
    async fn find_by_tenant_and_user(&self, tenant_id: &str, user_id: &str) -> AppResult<Option<TenantUser>> {
        self.collection()
            .find_one(doc! { "tenant_id": tenant_id, "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, tenant_user: &TenantUser) -> AppResult<()> {
        self.collection()
            .replace_one(
                doc! { "tenant_id": &tenant_user.tenant_id, "user_id": &tenant_user.user_id },
                tenant_user,
            )
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
