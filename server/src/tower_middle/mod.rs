/// Tower middleware module
///
/// Middleware layers that wrap the per-connection service before it is
/// handed to hyper.
pub mod tower_timeout_handler;

pub use tower_timeout_handler::{TimeoutLayer, TimeoutService};
