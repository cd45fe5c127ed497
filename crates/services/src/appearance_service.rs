use std::sync::Arc;

use quiz_core::model::Appearance;
use storage::repository::PreferenceRepository;

use crate::error::AppearanceServiceError;

/// Loads and stores the light/dark preference.
#[derive(Clone)]
pub struct AppearanceService {
    preferences: Arc<dyn PreferenceRepository>,
}

impl AppearanceService {
    #[must_use]
    pub fn new(preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self { preferences }
    }

    /// Stored preference first, then the system preference, then light.
    ///
    /// A storage failure is logged and treated as "nothing stored".
    pub async fn load(&self, system_prefers_dark: Option<bool>) -> Appearance {
        let stored = match self.preferences.get_appearance().await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read appearance preference");
                None
            }
        };
        Appearance::resolve(stored, system_prefers_dark)
    }

    /// # Errors
    ///
    /// Returns `AppearanceServiceError::Storage` if the preference cannot be written.
    pub async fn save(&self, appearance: Appearance) -> Result<(), AppearanceServiceError> {
        self.preferences.save_appearance(appearance).await?;
        tracing::debug!(appearance = %appearance, "appearance saved");
        Ok(())
    }
}
