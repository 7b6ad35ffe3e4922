use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::api_client::{self, ApiError, LOGIN_PATH};

/// Exchange credentials for a token
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };
    api_client::post_json(LOGIN_PATH, &request).await
}

/// Current user for the stored token
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    api_client::get_json("/auth/me").await
}
