pub mod hash;
pub mod jwt;
pub mod list_helpers;
