//! # Application Context
//!
//! 서비스 그래프를 의존 순서대로 명시적으로 조립합니다.
//!
//! ```text
//! DataStores ─┬─ KeyStore ──▶ KeyCache ──▶ AuthenticationService ──▶ TenantSessionService
//!             ├─ UserStore ───────────────┐
//!             └─ TenantUserStore ─────────┴──▶ PermissionResolver
//! CookieConfig ──▶ CookieTokenTransport
//! ```
//!
//! 조립된 컨텍스트는 `web::Data<AppContext>`로 핸들러와 미들웨어에 공유됩니다.

use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::db::Database;
use crate::errors::AppResult;
use crate::repositories::keys::{KeyStore, MongoKeyStore};
use crate::repositories::memory::{MemoryKeyStore, MemoryTenantUserStore, MemoryUserStore};
use crate::repositories::tenants::{TenantUserRepository, TenantUserStore};
use crate::repositories::users::{UserRepository, UserStore};
use crate::services::auth::{AuthenticationService, CookieTokenTransport};
use crate::services::keys::KeyCache;
use crate::services::permissions::PermissionResolver;
use crate::services::tenants::TenantSessionService;

/// 저장소 구현 묶음
#[derive(Clone)]
pub struct DataStores {
    pub keys: Arc<dyn KeyStore>,
    pub users: Arc<dyn UserStore>,
    pub tenant_users: Arc<dyn TenantUserStore>,
}

impl DataStores {
    pub fn in_memory() -> Self {
        Self {
            keys: Arc::new(MemoryKeyStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            tenant_users: Arc::new(MemoryTenantUserStore::new()),
        }
    }

    pub async fn mongo(database: Arc<Database>) -> AppResult<Self> {
        let keys = MongoKeyStore::new(database.clone());
        keys.create_indexes().await?;

        let tenant_users = TenantUserRepository::new(database.clone());
        tenant_users.create_indexes().await?;

        Ok(Self {
            keys: Arc::new(keys),
            users: Arc::new(UserRepository::new(database)),
            tenant_users: Arc::new(tenant_users),
        })
    }

    /// 설정된 백엔드에 맞는 저장소를 엽니다.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        match config.storage {
            StorageBackend::Memory => {
                log::warn!("⚠️ 인메모리 저장소 사용: 재시작 시 키와 사용자 데이터가 사라집니다");
                Ok(Self::in_memory())
            }
            StorageBackend::Mongo => {
                log::info!("📡 데이터베이스 연결 중...");
                let database = Arc::new(Database::connect(&config.database).await?);
                Self::mongo(database).await
            }
        }
    }
}

pub struct AppContext {
    pub config: AppConfig,
    pub stores: DataStores,
    pub key_cache: Arc<KeyCache>,
    pub auth: Arc<AuthenticationService>,
    pub transport: CookieTokenTransport,
    pub permissions: Arc<PermissionResolver>,
    pub tenant_sessions: Arc<TenantSessionService>,
}

impl AppContext {
    /// KeyStore → KeyCache → AuthenticationService → PermissionResolver 순으로 조립합니다.
    pub async fn assemble(config: AppConfig, stores: DataStores) -> AppResult<Self> {
        let key_cache = Arc::new(KeyCache::new(stores.keys.clone(), &config.key_cache));

        let auth = Arc::new(
            AuthenticationService::start(config.jwt.clone(), stores.keys.clone(), key_cache.clone())
                .await?,
        );

        let permissions = Arc::new(PermissionResolver::new(
            stores.users.clone(),
            stores.tenant_users.clone(),
        ));

        let tenant_sessions = Arc::new(TenantSessionService::new(
            auth.clone(),
            stores.tenant_users.clone(),
        ));

        let transport = CookieTokenTransport::new(config.cookie.clone());

        log::info!("✅ 인증 컨텍스트 조립 완료");

        Ok(Self {
            config,
            stores,
            key_cache,
            auth,
            transport,
            permissions,
            tenant_sessions,
        })
    }
}
