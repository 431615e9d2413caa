//! Database entities.

pub mod ban_appeal;

pub use ban_appeal::Entity as BanAppeal;
