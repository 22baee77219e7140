use std::sync::Arc;

use folio_core::Clock;
use folio_core::model::{THEME_PREFERENCE_KEY, Theme};
use storage::repository::PreferenceRepository;

use crate::error::ThemeServiceError;

/// Reads and writes the persisted light/dark preference.
#[derive(Clone)]
pub struct ThemeService {
    clock: Clock,
    repo: Arc<dyn PreferenceRepository>,
}

impl ThemeService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { clock, repo }
    }

    /// Load the stored theme; nothing stored means light.
    ///
    /// # Errors
    ///
    /// Returns `ThemeServiceError` on storage failures.
    pub async fn load(&self) -> Result<Theme, ThemeServiceError> {
        let record = self.repo.get_preference(THEME_PREFERENCE_KEY).await?;
        Ok(Theme::from_stored(record.as_ref().map(|r| r.value.as_str())))
    }

    /// Persist `theme`.
    ///
    /// # Errors
    ///
    /// Returns `ThemeServiceError` on storage failures.
    pub async fn save(&self, theme: Theme) -> Result<Theme, ThemeServiceError> {
        self.repo
            .set_preference(THEME_PREFERENCE_KEY, theme.as_str(), self.clock.now())
            .await?;
        tracing::debug!(%theme, "theme preference saved");
        Ok(theme)
    }

    /// Flip the displayed theme and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `ThemeServiceError` on storage failures.
    pub async fn toggle(&self, current: Theme) -> Result<Theme, ThemeServiceError> {
        self.save(current.toggled()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> ThemeService {
        ThemeService::new(fixed_clock(), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn defaults_to_light() {
        let repo = InMemoryRepository::new();
        assert_eq!(service(&repo).load().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn toggle_persists_every_change() {
        let repo = InMemoryRepository::new();
        let themes = service(&repo);

        let dark = themes.toggle(Theme::Light).await.unwrap();
        assert_eq!(dark, Theme::Dark);
        let stored = repo.get_preference("theme").await.unwrap().unwrap();
        assert_eq!(stored.value, "dark");
        assert_eq!(themes.load().await.unwrap(), Theme::Dark);

        let light = themes.toggle(dark).await.unwrap();
        assert_eq!(light, Theme::Light);
        assert_eq!(themes.load().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn switching_to_dark_restyles_skill_bars() {
        use crate::animation::{AnimationEngine, EngineConfig, ManualObserver};
        use folio_core::model::TargetId;

        let repo = InMemoryRepository::new();
        let mut skills = AnimationEngine::new(EngineConfig::skill_bars(), ManualObserver::new());
        skills.register_target(TargetId::new(1), Some("75")).unwrap();

        let theme = service(&repo).toggle(Theme::Light).await.unwrap();
        let frames = skills.restyle_for_theme(theme);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].width_percent, Some(75.0));

        let theme = service(&repo).toggle(theme).await.unwrap();
        assert!(skills.restyle_for_theme(theme).is_empty());
    }

    #[tokio::test]
    async fn unknown_stored_value_reads_as_light() {
        let repo = InMemoryRepository::new();
        repo.set_preference("theme", "solarized", fixed_clock().now())
            .await
            .unwrap();
        assert_eq!(service(&repo).load().await.unwrap(), Theme::Light);
    }
}
