pub mod crud;
pub mod list;
pub mod search;
pub mod server;
