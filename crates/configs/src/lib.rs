use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub domains: DomainConfig,
}

/// Locations of the two backing files.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_user_file")]
    pub user_file: PathBuf,
    #[serde(default = "default_gift_file")]
    pub gift_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { user_file: default_user_file(), gift_file: default_gift_file() }
    }
}

/// Enumerated vocabularies the stores validate against.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DomainConfig {
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    #[serde(default = "default_levels")]
    pub first_levels: Vec<String>,
    #[serde(default = "default_levels")]
    pub second_levels: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self { roles: default_roles(), first_levels: default_levels(), second_levels: default_levels() }
    }
}

fn default_user_file() -> PathBuf { PathBuf::from("storage/user.json") }
fn default_gift_file() -> PathBuf { PathBuf::from("storage/gift.json") }
fn default_roles() -> Vec<String> { vec!["admin".into(), "normal".into()] }
fn default_levels() -> Vec<String> { vec!["level1".into(), "level2".into(), "level3".into()] }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.validate()?;
        // 归一化 domains：去除首尾空白后再校验
        self.domains.normalize();
        self.domains.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.user_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.user_file must not be empty"));
        }
        if self.gift_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.gift_file must not be empty"));
        }
        if self.user_file == self.gift_file {
            return Err(anyhow!("storage.user_file and storage.gift_file must differ"));
        }
        Ok(())
    }
}

impl DomainConfig {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_first_level(&self, level: &str) -> bool {
        self.first_levels.iter().any(|l| l == level)
    }

    pub fn has_second_level(&self, level: &str) -> bool {
        self.second_levels.iter().any(|l| l == level)
    }

    pub fn normalize(&mut self) {
        for set in [&mut self.roles, &mut self.first_levels, &mut self.second_levels] {
            for v in set.iter_mut() {
                *v = v.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_set("domains.roles", &self.roles)?;
        check_set("domains.first_levels", &self.first_levels)?;
        check_set("domains.second_levels", &self.second_levels)?;
        Ok(())
    }
}

fn check_set(name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(anyhow!("{name} must list at least one value"));
    }
    for (i, v) in values.iter().enumerate() {
        if v.is_empty() {
            return Err(anyhow!("{name}[{i}] is blank"));
        }
        if values[..i].contains(v) {
            return Err(anyhow!("{name} contains duplicate value {v:?}"));
        }
    }
    Ok(())
}
