pub mod conversion;
pub mod health;
