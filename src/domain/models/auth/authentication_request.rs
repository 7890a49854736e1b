/// 미들웨어 인증 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 쿠키 토큰이 없으면 401
    Required,
    /// 토큰이 없거나 무효하면 익명으로 진행
    Optional,
}

/// 엔드포인트 진입에 필요한 전역 권한
#[derive(Debug, Clone)]
pub enum RequiredPermission {
    Single(String),
    Any(Vec<String>),
}

impl RequiredPermission {
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            RequiredPermission::Single(permission) => vec![permission.as_str()],
            RequiredPermission::Any(permissions) => permissions.iter().map(String::as_str).collect(),
        }
    }
}
