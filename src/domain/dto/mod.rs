//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 타입입니다. 도메인 엔티티를 직접 노출하지 않습니다.

pub mod session;

pub use session::*;
