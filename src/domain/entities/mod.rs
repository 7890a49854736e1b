//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 데이터 구조체들을 정의합니다.
//!
//! | 엔티티 | 컬렉션 | 키 |
//! |--------|--------|----|
//! | [`keys::SigningKey`] | `signing_keys` | JWK 썸프린트 |
//! | [`users::User`] | `users` | 사용자 ID |
//! | [`tenants::TenantUser`] | `tenant_users` | (tenant_id, user_id) |
//!
//! [`roles::Role`]은 별도 컬렉션 없이 사용자/테넌트 사용자 문서에 포함됩니다.

pub mod keys;
pub mod roles;
pub mod tenants;
pub mod users;
