//! 서명 키 저장소
//!
//! `load`는 키가 없으면 `AppError::NotFound`로 실패하고,
//! `store`는 같은 식별자에 대해 덮어쓰기(upsert)로 동작합니다. 병합은 없습니다.

pub mod key_store_repo;

use async_trait::async_trait;

use crate::domain::entities::keys::SigningKey;
use crate::errors::AppResult;

pub use key_store_repo::MongoKeyStore;

#[async_trait]
pub trait KeyStore: Send + Sync {
    async fn load(&self, key_id: &str) -> AppResult<SigningKey>;

    async fn store(&self, key_id: &str, key: &SigningKey) -> AppResult<()>;
}
