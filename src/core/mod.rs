//! # Core Module
//!
//! 애플리케이션 조립과 공통 에러 타입을 제공합니다.
//!
//! ### [`context`] - 명시적 조립
//! - **AppContext**: 설정과 저장소로부터 서비스 그래프를 생성자 주입으로 구성
//! - **DataStores**: MongoDB/인메모리 저장소 선택
//!
//! 런타임 리플렉션이나 전역 서비스 레지스트리는 사용하지 않습니다.

pub mod context;

pub use context::{AppContext, DataStores};
pub use crate::errors::{AppError, AppResult, ErrorContext};
