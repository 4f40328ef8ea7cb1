use crate::config::{Config, config_path, load_from_path, save_to_path};
use anyhow::{Context, Result};
use serde_json::Value;

pub fn list(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Print one value by dotted key, e.g. `warranty.default_duration_unit`.
pub fn get(key: &str, config: &Config) -> Result<()> {
    let value = lookup(key, config)?;
    match value {
        serde_json::Value::String(s) => println!("{}", s),
        serde_json::Value::Null => println!("(unset)"),
        v => println!("{}", v),
    }
    Ok(())
}

pub fn lookup(key: &str, config: &Config) -> Result<serde_json::Value> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;

    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    Ok(current.clone())
}

/// Update one dotted key in `~/.warranty-countdown/config.toml`. The file is
/// rewritten from the parsed config, so comments are not kept.
pub fn set(key: &str, value: &str) -> Result<()> {
    let path = config_path()?;
    let current = if path.exists() {
        load_from_path(&path)?
    } else {
        Config::default()
    };

    let updated = apply(&current, key, value)?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    save_to_path(&updated, &path)?;
    println!("✓ {} = {}", key, value);
    Ok(())
}

/// Return `config` with `key` replaced by `value`. Numbers stay numbers;
/// everything else is taken as text and checked by deserializing the result.
pub fn apply(config: &Config, key: &str, value: &str) -> Result<Config> {
    let mut root = serde_json::to_value(config).context("Failed to serialize config")?;

    let mut slot = &mut root;
    for part in key.split('.') {
        slot = slot
            .get_mut(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    if slot.is_object() {
        anyhow::bail!("{} is a section, not a setting", key);
    }

    let replacement = if slot.is_number() {
        let n: u64 = value
            .trim()
            .parse()
            .with_context(|| format!("{} expects a whole number, got '{}'", key, value))?;
        Value::from(n)
    } else {
        Value::String(value.to_string())
    };
    *slot = replacement;

    let updated: Config =
        serde_json::from_value(root).with_context(|| format!("Invalid value for {}", key))?;
    updated.validate()?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nested_key() {
        let config = Config::default();
        assert_eq!(
            lookup("warranty.default_duration_value", &config).unwrap(),
            serde_json::json!(12)
        );
        assert_eq!(
            lookup("warranty.default_duration_unit", &config).unwrap(),
            serde_json::json!("Months")
        );
    }

    #[test]
    fn test_lookup_unknown_key() {
        let err = lookup("warranty.colour", &Config::default()).unwrap_err();
        assert!(err.to_string().contains("warranty.colour"));
    }

    #[test]
    fn test_apply_updates_number_and_unit() {
        let config = Config::default();
        let config = apply(&config, "warranty.default_duration_value", "24").unwrap();
        let config = apply(&config, "warranty.default_duration_unit", "Days").unwrap();
        assert_eq!(config.warranty.default_duration_value, 24);
        assert_eq!(
            config.warranty.default_duration_unit,
            crate::warranty::DurationUnit::Days
        );
    }

    #[test]
    fn test_apply_sets_optional_path() {
        let config = apply(&Config::default(), "state.state_dir_override", "/srv/wty").unwrap();
        assert_eq!(
            config.state.state_dir_override.as_deref(),
            Some(std::path::Path::new("/srv/wty"))
        );
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let config = Config::default();
        assert!(apply(&config, "warranty.default_duration_value", "0").is_err());
        assert!(apply(&config, "warranty.default_duration_value", "ten").is_err());
        assert!(apply(&config, "warranty.default_duration_unit", "Weeks").is_err());
        assert!(apply(&config, "warranty", "x").is_err());
        assert!(apply(&config, "warranty.colour", "red").is_err());
    }
}
