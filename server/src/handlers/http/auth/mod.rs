pub mod login;

// Re-export main handlers
#[allow(unused_imports)]
pub use login::handle_login;
