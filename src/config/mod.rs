//! 애플리케이션 설정
//!
//! [`AppConfig::from_env`]가 프로세스 시작 시 한 번 호출되어 모든 설정을 구성합니다.
//! 구성된 값은 `core::context::AppContext::assemble`을 통해 각 서비스에 전달됩니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

/// 전체 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
    pub rate_limit: RateLimitConfig,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub key_cache: KeyCacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            environment: Environment::current(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            storage: StorageBackend::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::from_env(),
            key_cache: KeyCacheConfig::from_env(),
        };
        log::info!(
            "설정 로드됨: env={}, storage={:?}, auto_generate_key={}, cookie={}",
            config.environment.as_str(),
            config.storage,
            config.jwt.auto_generate_key,
            config.cookie.name
        );
        config
    }

    /// 테스트와 로컬 실행용 인메모리 설정
    pub fn in_memory() -> Self {
        Self {
            environment: Environment::Test,
            server: ServerConfig { host: "127.0.0.1".to_string(), port: 8080 },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database_name: "mosaic_boot_test".to_string(),
                app_name: "mosaic_boot".to_string(),
            },
            storage: StorageBackend::Memory,
            rate_limit: RateLimitConfig { per_second: 100, burst_size: 200 },
            jwt: JwtConfig::default(),
            cookie: CookieConfig::default(),
            key_cache: KeyCacheConfig::default(),
        }
    }
}
