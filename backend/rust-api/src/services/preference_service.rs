use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::catalog::{self, Avatar, Theme};
use crate::models::preferences::{AppearanceState, UpdatePreferencesRequest};

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown avatar: {0}")]
    UnknownAvatar(String),

    #[error("Preference store error: {0}")]
    Store(String),
}

/// Where appearance state lives. Last writer wins.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<AppearanceState>, PreferenceError>;
    async fn save(&self, user_id: &str, state: &AppearanceState) -> Result<(), PreferenceError>;
}

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    entries: RwLock<HashMap<String, AppearanceState>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load(&self, user_id: &str) -> Result<Option<AppearanceState>, PreferenceError> {
        Ok(self.entries.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, state: &AppearanceState) -> Result<(), PreferenceError> {
        self.entries
            .write()
            .await
            .insert(user_id.to_string(), state.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPreferenceStore::new()))
    }

    /// Stored selection resolved against the catalog; unknown ids fall back to the defaults.
    pub async fn get(&self, user_id: &str) -> Result<AppearanceState, PreferenceError> {
        let (theme, avatar) = self.resolve(user_id).await?;
        Ok(AppearanceState {
            theme_id: theme.id.to_string(),
            avatar_id: avatar.id.to_string(),
        })
    }

    pub async fn update(
        &self,
        user_id: &str,
        req: &UpdatePreferencesRequest,
    ) -> Result<AppearanceState, PreferenceError> {
        let mut state = self.get(user_id).await?;

        if let Some(theme_id) = &req.theme_id {
            let theme = catalog::find_theme(theme_id)
                .ok_or_else(|| PreferenceError::UnknownTheme(theme_id.clone()))?;
            state.theme_id = theme.id.to_string();
        }
        if let Some(avatar_id) = &req.avatar_id {
            let avatar = catalog::find_avatar(avatar_id)
                .ok_or_else(|| PreferenceError::UnknownAvatar(avatar_id.clone()))?;
            state.avatar_id = avatar.id.to_string();
        }

        self.store.save(user_id, &state).await?;
        tracing::debug!(
            "Appearance updated for {}: theme={}, avatar={}",
            user_id,
            state.theme_id,
            state.avatar_id
        );
        Ok(state)
    }

    pub async fn current_avatar(&self, user_id: &str) -> Result<&'static Avatar, PreferenceError> {
        Ok(self.resolve(user_id).await?.1)
    }

    async fn resolve(
        &self,
        user_id: &str,
    ) -> Result<(&'static Theme, &'static Avatar), PreferenceError> {
        let stored = self.store.load(user_id).await?;
        let theme = stored
            .as_ref()
            .and_then(|s| catalog::find_theme(&s.theme_id))
            .unwrap_or_else(catalog::default_theme);
        let avatar = stored
            .as_ref()
            .and_then(|s| catalog::find_avatar(&s.avatar_id))
            .unwrap_or_else(catalog::default_avatar);
        Ok((theme, avatar))
    }
}
