//! # Domain Models Module
//!
//! 저장되지 않는 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! ### Entities (`../entities/`)
//! - **영속성**: MongoDB 문서로 저장되는 객체
//! - **예시**: `SigningKey`, `User`, `TenantUser`
//!
//! ### Models (`./`)
//! - **값 객체**: 요청 처리 중에만 존재하거나 직렬화 형식을 표현
//! - **예시**: `Jwk`, `TokenClaims`, `AuthenticatedIdentity`
//!
//! ```text
//! models/
//! ├── auth/    ← 요청 단위 인증 결과, 미들웨어 모드
//! ├── jwk.rs   ← JWK 표현과 RFC 7638 썸프린트
//! └── token/   ← 토큰 클레임과 테넌트 세션
//! ```

pub mod auth;
pub mod jwk;
pub mod token;
