pub mod blog;
pub mod login;
pub mod shared;
pub mod user;
