use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub format: Option<String>,
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

fn config_path() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".medgrid");
    fs::create_dir_all(&dir)?;
    Ok(dir.join("config.toml"))
}

fn load_all_from(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)?;
    let cfg: ConfigFile = toml::from_str(&content)?;
    Ok(cfg)
}

fn save_profile_to(path: &Path, profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = load_all_from(path)?;
    all.insert(
        profile.to_string(),
        ProfileConfig {
            server: config.server.clone(),
            format: config.format.clone(),
        },
    );
    let content = toml::to_string_pretty(&all)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let all = load_all_from(&config_path()?)?;
    Ok(all
        .into_iter()
        .find(|(k, _)| k == profile)
        .map(|(_, v)| v)
        .unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    save_profile_to(&config_path()?, profile, config)
}

pub fn resolve_server(cli_server: &Option<String>, profile: &str) -> Result<String> {
    // 1. --server flag / MEDGRID_URL env
    if let Some(s) = cli_server {
        tracing::debug!(server = %s, "using server from flag or environment");
        return Ok(validate_server(s)?);
    }
    // 2. config.toml profile
    let cfg = load_profile(profile)?;
    if let Some(s) = cfg.server {
        tracing::debug!(server = %s, profile, "using server from config profile");
        return Ok(validate_server(&s)?);
    }
    anyhow::bail!(
        "No server URL configured. Use --server, set MEDGRID_URL env var, or run: medgrid config set server <url>"
    )
}

fn validate_server(s: &str) -> Result<String> {
    url::Url::parse(s).with_context(|| format!("Invalid server URL: {s}"))?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(load_all_from(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        save_profile_to(
            &path,
            "staging",
            &ProfileConfig {
                server: Some("http://localhost:8080".into()),
                format: Some("table".into()),
            },
        )
        .unwrap();

        let all = load_all_from(&path).unwrap();
        assert_eq!(
            all["staging"].server.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(all["staging"].format.as_deref(), Some("table"));
    }

    #[test]
    fn test_save_keeps_other_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        save_profile_to(
            &path,
            "default",
            &ProfileConfig {
                server: Some("http://a".into()),
                format: None,
            },
        )
        .unwrap();
        save_profile_to(
            &path,
            "prod",
            &ProfileConfig {
                server: Some("http://b".into()),
                format: None,
            },
        )
        .unwrap();

        let all = load_all_from(&path).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_validate_server_rejects_garbage() {
        assert!(validate_server("http://localhost:8080").is_ok());
        assert!(validate_server("not a url").is_err());
    }
}
