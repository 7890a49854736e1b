pub mod user_repo;

use async_trait::async_trait;

use crate::domain::entities::users::User;
use crate::errors::AppResult;

pub use user_repo::UserRepository;

/// 권한 계산에 쓰이는 사용자 조회
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>>;

    async fn save(&self, user: &User) -> AppResult<()>;
}
