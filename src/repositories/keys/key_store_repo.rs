use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::keys::SigningKey;
use crate::errors::{AppError, AppResult};
use crate::repositories::keys::KeyStore;

pub const SIGNING_KEY_COLLECTION: &str = "signing_keys";

/// `signing_keys` 컬렉션 기반 키 저장소
///
/// 문서의 `_id`가 키 식별자(썸프린트)입니다.
pub struct MongoKeyStore {
    db: Arc<Database>,
}

impl MongoKeyStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<SigningKey> {
        self.db.collection::<SigningKey>(SIGNING_KEY_COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_index(created_at_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl KeyStore for MongoKeyStore {
    async fn load(&self, key_id: &str) -> AppResult<SigningKey> {
        self.collection()
            .find_one(doc! { "_id": key_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("signing key '{}'", key_id)))
    }

    async fn store(&self, key_id: &str, key: &SigningKey) -> AppResult<()> {
        if key.id != key_id {
            return Err(AppError::ValidationError(format!(
                "key id '{}' does not match key '{}'",
                key_id, key.id
            )));
        }

        self.collection()
            .replace_one(doc! { "_id": key_id }, key)
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::debug!("🔑 서명 키 저장: {}", key_id);
        Ok(())
    }
}
