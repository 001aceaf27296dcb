//! Settings parser for .turntimer/config.toml

use super::types::{FormOverrides, Settings};
use std::path::Path;
use turntimer_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const TURNTIMER_DIR: &str = ".turntimer";

/// Load settings from .turntimer/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(TURNTIMER_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create default config files in .turntimer/ directory
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let turntimer_dir = project_path.join(TURNTIMER_DIR);

    if !turntimer_dir.exists() {
        std::fs::create_dir_all(&turntimer_dir)
            .with_context(|| format!("Failed to create {}", turntimer_dir.display()))?;
    }

    let config_path = turntimer_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Turn Timer Configuration

[form]
fallback_time = "10"            # Time of the first player
time_representation = "digits"  # "digits" (whole seconds) or "numeric"
new_entry_time = "inherit"      # "inherit" last player's time or reset to "fallback"
min_entries = 1                 # Players that cannot be removed
"#;
        std::fs::write(&config_path, default_content)
            .context("Failed to write config.toml")?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

/// Save settings to .turntimer/config.toml
///
/// Writes to a temp file and renames it over the old config.
pub fn save_settings(project_path: &Path, settings: &Settings) -> Result<()> {
    let turntimer_dir = project_path.join(TURNTIMER_DIR);

    if !turntimer_dir.exists() {
        std::fs::create_dir_all(&turntimer_dir)
            .with_context(|| format!("Failed to create {}", turntimer_dir.display()))?;
    }

    let config_path = turntimer_dir.join(CONFIG_FILENAME);
    let temp_path = turntimer_dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .context("Failed to serialize settings")?;
    let full_content = format!("# Turn Timer Configuration\n\n{}", content);

    std::fs::write(&temp_path, &full_content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    std::fs::rename(&temp_path, &config_path)
        .with_context(|| format!("Failed to replace {}", config_path.display()))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

/// Apply command line overrides on top of file settings
pub fn merge_overrides(settings: &mut Settings, overrides: &FormOverrides) {
    if let Some(ref fallback_time) = overrides.fallback_time {
        settings.form.fallback_time = fallback_time.clone();
    }
    if let Some(representation) = overrides.time_representation {
        settings.form.time_representation = representation;
    }
    if let Some(policy) = overrides.new_entry_time {
        settings.form.new_entry_time = policy;
    }
    if let Some(min_entries) = overrides.min_entries {
        settings.form.min_entries = min_entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewEntryTime;
    use tempfile::tempdir;
    use turntimer_core::TimeRepresentation;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.form.fallback_time, "10");
        assert_eq!(settings.form.min_entries, 1);
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".turntimer");
        std::fs::create_dir_all(&dir).unwrap();

        let config = r#"
[form]
fallback_time = "30"
time_representation = "numeric"
new_entry_time = "fallback"
min_entries = 2
"#;
        std::fs::write(dir.join("config.toml"), config).unwrap();

        let settings = load_settings(temp.path());

        assert_eq!(settings.form.fallback_time, "30");
        assert_eq!(
            settings.form.time_representation,
            TimeRepresentation::Numeric
        );
        assert_eq!(settings.form.new_entry_time, NewEntryTime::Fallback);
        assert_eq!(settings.form.min_entries, 2);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".turntimer");
        std::fs::create_dir_all(&dir).unwrap();

        std::fs::write(dir.join("config.toml"), "not valid toml {{{{").unwrap();

        // Should return defaults
        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_init_config_dir() {
        let temp = tempdir().unwrap();

        init_config_dir(temp.path()).unwrap();

        let path = temp.path().join(".turntimer/config.toml");
        assert!(path.exists());

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: Settings =
            toml::from_str(&content).expect("Default config should be valid TOML");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_init_config_dir_idempotent() {
        let temp = tempdir().unwrap();

        init_config_dir(temp.path()).unwrap();

        let config_path = temp.path().join(".turntimer/config.toml");
        std::fs::write(&config_path, "[form]\nmin_entries = 3\n").unwrap();

        // Second init should not overwrite
        init_config_dir(temp.path()).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("min_entries = 3"));
    }

    #[test]
    fn test_save_then_load_settings() {
        let temp = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.form.fallback_time = "45".to_string();
        settings.form.new_entry_time = NewEntryTime::Fallback;

        save_settings(temp.path(), &settings).unwrap();

        assert!(!temp.path().join(".turntimer/.config.toml.tmp").exists());
        assert_eq!(load_settings(temp.path()), settings);
    }

    #[test]
    fn test_save_settings_reports_path_on_failure() {
        let temp = tempdir().unwrap();
        // A plain file where the config directory should be
        std::fs::write(temp.path().join(".turntimer"), "").unwrap();

        let err = save_settings(temp.path(), &Settings::default()).unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains(".config.toml.tmp"));
    }

    #[test]
    fn test_merge_overrides_only_touches_set_fields() {
        let mut settings = Settings::default();
        let overrides = FormOverrides {
            fallback_time: Some("20".to_string()),
            min_entries: Some(2),
            ..Default::default()
        };

        merge_overrides(&mut settings, &overrides);

        assert_eq!(settings.form.fallback_time, "20");
        assert_eq!(settings.form.min_entries, 2);
        assert_eq!(settings.form.new_entry_time, NewEntryTime::Inherit);
        assert_eq!(
            settings.form.time_representation,
            TimeRepresentation::Digits
        );
    }
}
