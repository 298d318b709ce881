use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{BankError, Result},
    storage::DataLayout,
};

const HOME_ENV: &str = "BANK_LEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".bank_ledger";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "database";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.bank_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// User-adjustable settings for the banking shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides where the roster and account files live. Defaults to `<base>/database`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_employee_pin")]
    pub employee_pin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            employee_pin: Self::default_employee_pin(),
        }
    }
}

impl Config {
    pub fn default_employee_pin() -> String {
        "A1234".into()
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| base.join(DATA_DIR))
    }

    pub fn layout(&self, base: &Path) -> DataLayout {
        DataLayout::new(self.resolve_data_dir(base))
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)
            .map_err(|err| BankError::persistence("create directory", &config_dir, err))?;
        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)
            .map_err(|err| BankError::persistence("read", &self.config_path, err))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)
            .map_err(|err| BankError::persistence("replace", &self.config_path, err))?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file =
        File::create(path).map_err(|err| BankError::persistence("create", path, err))?;
    file.write_all(data.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|err| BankError::persistence("write", path, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.employee_pin, "A1234");
        assert_eq!(
            config.resolve_data_dir(manager.base_dir()),
            dir.path().join("database")
        );
    }

    #[test]
    fn saves_and_reloads() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("elsewhere")),
            employee_pin: "Z9".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn save_leaves_no_staging_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        manager.save(&Config::default()).unwrap();
        assert!(manager.config_path().exists());
        assert!(!tmp_path(manager.config_path()).exists());
    }

    #[test]
    fn partial_file_fills_in_pin() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), "{}").unwrap();
        assert_eq!(manager.load().unwrap().employee_pin, "A1234");
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), "not json").unwrap();
        assert!(matches!(manager.load(), Err(BankError::Config(_))));
    }
}
