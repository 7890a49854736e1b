//! # Authentication Configuration Module
//!
//! 서명 키, 토큰 수명, 인증 쿠키 등 인증 관련 설정을 관리하는 모듈입니다.
//! 프로세스 시작 시 한 번만 환경 변수에서 읽어 구조체로 만들고,
//! 이후에는 각 서비스 생성자에 값으로 전달합니다. 전역 상태는 두지 않습니다.
//!
//! ## 환경 변수
//!
//! ### 토큰/키 설정
//! ```bash
//! export JWT_AUTO_GENERATE_KEY="true"
//! export JWT_SIGNING_KEY_ID="<rfc7638 thumbprint>"
//! export JWT_EXPIRATION_MINUTES="60"
//! export JWT_CLOCK_SKEW_SECONDS="0"
//! export KEY_CACHE_CAPACITY="128"
//! ```
//!
//! ### 쿠키 설정
//! ```bash
//! export AUTH_COOKIE_NAME="mosaic_token"
//! export AUTH_COOKIE_PATH="/"
//! export AUTH_COOKIE_DOMAIN="example.com"
//! export AUTH_COOKIE_MAX_AGE="-1"
//! export AUTH_COOKIE_SECURE="false"
//! ```

use super::data_config::{env_flag, env_optional, env_parse};

/// 토큰 발급/검증 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 시작 시 P-256 키를 자동 생성할지 여부
    pub auto_generate_key: bool,
    /// 외부에서 미리 등록한 서명 키 식별자
    pub signing_key_id: Option<String>,
    /// 발급 토큰 수명 (분)
    pub expiration_minutes: i64,
    /// 만료 비교 시 허용하는 시계 오차 (초). 0이면 엄격 비교
    pub clock_skew_seconds: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            auto_generate_key: env_flag("JWT_AUTO_GENERATE_KEY", true),
            signing_key_id: env_optional("JWT_SIGNING_KEY_ID"),
            expiration_minutes: env_parse("JWT_EXPIRATION_MINUTES", 60),
            clock_skew_seconds: env_parse::<i64>("JWT_CLOCK_SKEW_SECONDS", 0).max(0),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            auto_generate_key: true,
            signing_key_id: None,
            expiration_minutes: 60,
            clock_skew_seconds: 0,
        }
    }
}

/// 인증 쿠키 설정
///
/// `max_age`가 0 이하이면 세션 쿠키로 발급합니다.
/// `path`, `domain`은 지정된 경우에만 쿠키에 붙습니다.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub max_age: i64,
    pub secure: bool,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            name: env_optional("AUTH_COOKIE_NAME").unwrap_or_else(|| "mosaic_token".to_string()),
            path: env_optional("AUTH_COOKIE_PATH"),
            domain: env_optional("AUTH_COOKIE_DOMAIN"),
            max_age: env_parse("AUTH_COOKIE_MAX_AGE", -1),
            secure: env_flag("AUTH_COOKIE_SECURE", false),
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "mosaic_token".to_string(),
            path: None,
            domain: None,
            max_age: -1,
            secure: false,
        }
    }
}

/// 키 캐시 설정
#[derive(Debug, Clone)]
pub struct KeyCacheConfig {
    pub capacity: u64,
}

impl KeyCacheConfig {
    pub const DEFAULT_CAPACITY: u64 = 128;

    pub fn from_env() -> Self {
        Self {
            capacity: env_parse("KEY_CACHE_CAPACITY", Self::DEFAULT_CAPACITY),
        }
    }
}

impl Default for KeyCacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults_are_strict() {
        let config = JwtConfig::default();
        assert!(config.auto_generate_key);
        assert_eq!(config.clock_skew_seconds, 0);
        assert!(config.signing_key_id.is_none());
    }

    #[test]
    fn test_cookie_config_defaults_to_session_cookie() {
        let config = CookieConfig::default();
        assert_eq!(config.name, "mosaic_token");
        assert!(config.max_age <= 0);
        assert!(config.path.is_none());
        assert!(config.domain.is_none());
    }

    #[test]
    fn test_key_cache_default_capacity() {
        assert_eq!(KeyCacheConfig::default().capacity, 128);
    }
}
