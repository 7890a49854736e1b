use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::roles::Role;

/// 전역 사용자 레코드
///
/// `roles`는 테넌트와 무관한 전역 역할입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub fn new(id: &str, display_name: &str, roles: Vec<Role>) -> Self {
        let now = DateTime::now();
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            roles,
            created_at: now,
            updated_at: now,
        }
    }
}
