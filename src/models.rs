use serde::{Deserialize, Serialize};

// Login request body; fields default so missing ones get a 400, not a parse error
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct LoginResponse {
    pub success: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}
