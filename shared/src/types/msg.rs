use serde::{Deserialize, Serialize};

/// The single-field JSON body used for every error response and for delete
/// confirmations: `{"msg": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MsgResponse {
    pub msg: String,
}

impl MsgResponse {
    pub fn new(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
        }
    }
}
