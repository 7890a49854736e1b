//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 생성자로 의존성을 명시적으로 받으며,
//! `core::context::AppContext::assemble`이 의존 순서대로 조립합니다.
//!
//! # Features
//!
//! - 서명 키 캐시 (`keys`)
//! - 토큰 발급/검증과 쿠키 전송 (`auth`)
//! - 전역/테넌트 권한 계산 (`permissions`)
//! - 테넌트 진입 (`tenants`)
//!
//! # Examples
//!
//! ```rust,ignore
//! let identity = context.auth.validate_token(&token).await;
//! if let Some(identity) = identity {
//!     let allowed = context.permissions.check(&identity, "docs:write", Some("acme")).await?;
//! }
//! ```

pub mod auth;
pub mod keys;
pub mod permissions;
pub mod tenants;
