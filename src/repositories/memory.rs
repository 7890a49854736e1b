//! 인메모리 저장소
//!
//! `MOSAIC_STORAGE=memory`로 MongoDB 없이 실행하거나, 테스트에서 저장소를 대체할 때 사용합니다.
//! [`MemoryKeyStore`]는 `load` 호출 수를 세어 캐시 적중 여부를 관찰할 수 있게 합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::keys::SigningKey;
use crate::domain::entities::tenants::TenantUser;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::keys::KeyStore;
use crate::repositories::tenants::TenantUserStore;
use crate::repositories::users::UserStore;

fn poisoned<E: std::fmt::Display>(e: E) -> AppError {
    AppError::InternalError(format!("memory store lock poisoned: {}", e))
}

#[derive(Default)]
pub struct MemoryKeyStore {
    keys: RwLock<HashMap<String, SigningKey>>,
    loads: AtomicUsize,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지의 `load` 호출 수
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn load(&self, key_id: &str) -> AppResult<SigningKey> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.keys
            .read()
            .map_err(poisoned)?
            .get(key_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("signing key '{}'", key_id)))
    }

    async fn store(&self, key_id: &str, key: &SigningKey) -> AppResult<()> {
        if key.id != key_id {
            return Err(AppError::ValidationError(format!(
                "key id '{}' does not match key '{}'",
                key_id, key.id
            )));
        }
        self.keys
            .write()
            .map_err(poisoned)?
            .insert(key_id.to_string(), key.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().map_err(poisoned)?.get(user_id).cloned())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.users
            .write()
            .map_err(poisoned)?
            .insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTenantUserStore {
    members: RwLock<HashMap<(String, String), TenantUser>>,
}

impl MemoryTenantUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantUserStore for MemoryTenantUserStore {
    async fn find_by_tenant_and_user(&self, tenant_id: &str, user_id: &str) -> AppResult<Option<TenantUser>> {
        Ok(self
            .members
            .read()
            .map_err(poisoned)?
            .get(&(tenant_id.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn save(&self, tenant_user: &TenantUser) -> AppResult<()> {
        self.members.write().map_err(poisoned)?.insert(
            (tenant_user.tenant_id.clone(), tenant_user.user_id.clone()),
            tenant_user.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::roles::Role;

    #[actix_web::test]
    async fn test_key_store_load_missing_is_not_found() {
        let store = MemoryKeyStore::new();
        let result = store.load("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(store.load_count(), 1);
    }

    #[actix_web::test]
    async fn test_key_store_upsert_last_write_wins() {
        let store = MemoryKeyStore::new();
        let key = SigningKey::generate_ec().unwrap();
        store.store(&key.id, &key).await.unwrap();

        let public = key.public_only();
        store.store(&key.id, &public).await.unwrap();

        let loaded = store.load(&key.id).await.unwrap();
        assert!(!loaded.has_private_material());
    }

    #[actix_web::test]
    async fn test_key_store_rejects_mismatched_id() {
        let store = MemoryKeyStore::new();
        let key = SigningKey::generate_ec().unwrap();

        let result = store.store("other", &key).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_tenant_user_composite_key() {
        let store = MemoryTenantUserStore::new();
        store
            .save(&TenantUser::new("acme", "u1", vec![Role::new("member", ["read"])]))
            .await
            .unwrap();

        assert!(store.find_by_tenant_and_user("acme", "u1").await.unwrap().is_some());
        assert!(store.find_by_tenant_and_user("acme", "u2").await.unwrap().is_none());
        assert!(store.find_by_tenant_and_user("globex", "u1").await.unwrap().is_none());
    }
}
