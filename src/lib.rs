//! # Mosaic Boot Auth Core
//!
//! 비대칭 키(EC P-256 / RSA)로 서명한 토큰을 HTTP-only 쿠키로 주고받는 인증 코어입니다.
//!
//! ## 구성
//!
//! - [`repositories`]: 서명 키/사용자/테넌트 사용자 저장소 (MongoDB, 인메모리)
//! - [`services::keys`]: LRU 키 캐시와 서명/검증 핸들
//! - [`services::auth`]: 키 생성, 토큰 발급/검증, 쿠키 전송
//! - [`services::permissions`]: 전역/테넌트 범위 권한 판정
//! - [`core`]: 설정과 저장소로부터 서비스 그래프 조립
//! - [`handlers`], [`routes`], [`middlewares`]: actix-web HTTP 계층

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
