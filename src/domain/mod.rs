//! # Domain Layer Module
//!
//! 인증 코어의 데이터 타입을 모아 둔 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 저장되는 문서 (SigningKey, User, TenantUser, Role)
//! ├── dto       - HTTP 요청/응답 본문
//! └── models    - 값 객체 (Jwk, TokenClaims, AuthenticatedIdentity)
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use dto::*;
