use serde::Deserialize;

/// 권한 검사 쿼리 (`?permission=..&tenant_id=..`)
///
/// `permission`은 필수이며, 명시적인 빈 값(`permission=`)만 와일드카드로 취급됩니다.
#[derive(Debug, Deserialize)]
pub struct PermissionCheckQuery {
    pub permission: String,
    pub tenant_id: Option<String>,
}
