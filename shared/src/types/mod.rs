pub mod item;
pub mod jwt;
pub mod login;
pub mod msg;
pub mod server_config;
pub mod user;

pub use self::item::{
    CreateItemData, Item, ItemChangeResponse, ItemError, ItemResponse, ItemsResponse,
    UpdateItemData,
};
pub use self::jwt::{AuthError, TokenClaims};
pub use self::login::{LoginData, LoginError, TokenResponse};
pub use self::msg::MsgResponse;
pub use self::user::{PublicUser, UserRecord};
