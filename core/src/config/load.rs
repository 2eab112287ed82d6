use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default zhaires data directory: ~/.zhaires
pub fn get_zhaires_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".zhaires"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.zhaires/config.toml
    let user_config = get_zhaires_data_dir()?.join("config.toml");

    // Priority 2: ./zhaires.toml
    let local_config = Path::new("zhaires.toml");

    let cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    Ok(apply_env_overrides(cfg))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    Ok(cfg)
}

/// Environment variable overrides (highest priority).
pub fn apply_env_overrides(cfg: AppConfig) -> AppConfig {
    apply_overrides_from(cfg, |key| std::env::var(key).ok())
}

fn apply_overrides_from(mut cfg: AppConfig, get: impl Fn(&str) -> Option<String>) -> AppConfig {
    let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("ZHAIRES_AIRES_BIN") {
        cfg.aires.program = Some(v);
    }
    if let Some(v) = non_empty("ZHAIRES_EXPORT_BIN") {
        cfg.aires.export_program = Some(v);
    }
    if let Some(v) = non_empty("ZHAIRES_RUN_DIR_ENV") {
        cfg.aires.run_dir_env = v;
    }
    if let Some(v) = non_empty("ZHAIRES_CACHE") {
        let v = v.trim();
        cfg.loader.cache = !(v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("off"));
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
[aires]
program = "/opt/aires/bin/Aires"

[loader]
cache = false
"#,
        )
        .unwrap();

        assert_eq!(cfg.aires.program.as_deref(), Some("/opt/aires/bin/Aires"));
        assert_eq!(cfg.aires.run_dir_env, "AIRES_RUN_DIR");
        assert_eq!(cfg.aires.capture_bytes, 64 * 1024);
        assert!(!cfg.loader.cache);
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn env_overrides_take_priority() {
        let env: HashMap<&str, &str> = [
            ("ZHAIRES_AIRES_BIN", "/usr/local/bin/Aires"),
            ("ZHAIRES_RUN_DIR_ENV", "MY_RUNS"),
            ("ZHAIRES_CACHE", "off"),
            ("ZHAIRES_EXPORT_BIN", "  "),
        ]
        .into_iter()
        .collect();

        let cfg = apply_overrides_from(AppConfig::default(), |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.aires.program.as_deref(), Some("/usr/local/bin/Aires"));
        assert_eq!(cfg.aires.run_dir_env, "MY_RUNS");
        assert!(!cfg.loader.cache);
        assert!(cfg.aires.export_program.is_none());
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zhaires.toml");
        std::fs::write(&path, "[loader]\ncache = \"maybe\"\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
