pub mod keys;
pub mod memory;
pub mod tenants;
pub mod users;
