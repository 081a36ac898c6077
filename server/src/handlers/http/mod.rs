pub mod auth;
pub mod items;
pub mod routes;
pub mod users;
pub mod utils;
