//! Runtime feature-flag handling for the Bookline application.
//!
//! Collaborators are enabled in two steps: a `use_*` flag in the config and a
//! populated config section for the collaborator. Both must be present for
//! the feature to be wired up at startup.

use bookline_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar collaborator is enabled at runtime.
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// Check if the database collaborator is enabled at runtime.
pub fn is_database_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_database, config.database.as_ref())
}
