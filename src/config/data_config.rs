//! # Data & Server Configuration
//!
//! 서버 바인딩, MongoDB 연결, 저장소 백엔드 선택, Rate Limit 설정을 담당합니다.

use std::env;
use std::str::FromStr;

use log::warn;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        Self::from_str_lossy(
            &env::var("ENVIRONMENT")
                .or_else(|_| env::var("PROFILE"))
                .unwrap_or_else(|_| "production".to_string()),
        )
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_parse("PORT", 8080),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub app_name: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "mosaic_boot_dev".to_string()),
            app_name: "mosaic_boot".to_string(),
        }
    }
}

/// 키/사용자 저장소 백엔드
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl StorageBackend {
    pub fn from_env() -> Self {
        Self::from_str_lossy(&env::var("MOSAIC_STORAGE").unwrap_or_else(|_| "mongo".to_string()))
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" | "mem" => StorageBackend::Memory,
            _ => StorageBackend::Mongo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Mongo => "MongoDB",
            StorageBackend::Memory => "in-memory",
        }
    }
}

/// actix-governor Rate Limit 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: env_parse("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_parse("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

/// 환경 변수를 읽어 파싱하고, 없거나 잘못된 값이면 기본값을 사용합니다.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
        Err(_) => default,
    }
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        Err(_) => default,
    }
}

/// 비어 있는 값은 설정되지 않은 것으로 취급합니다.
pub(crate) fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
