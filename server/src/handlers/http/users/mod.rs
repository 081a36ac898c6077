pub mod get;

// Re-export main handlers
#[allow(unused_imports)]
pub use get::handle_get_user;
