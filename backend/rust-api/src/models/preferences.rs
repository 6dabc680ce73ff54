use serde::{Deserialize, Serialize};
use validator::Validate;

/// Theme and avatar selection for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceState {
    pub theme_id: String,
    pub avatar_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
    #[validate(length(min = 1, max = 64))]
    pub theme_id: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub avatar_id: Option<String>,
}
