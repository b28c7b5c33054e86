use anyhow::{Context, Result};
use chek_scrape::ClientOptions;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::{ensure_chek_home, resolve};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSection,
    pub scrape: ScrapeSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Link records (JSON). Relative to the chek home unless absolute.
    pub links_file: String,
    /// IANA zone used to decide what "today" is
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSection {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Spreadsheet (CSV) the extracted items are appended to
    pub export_file: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            links_file: "link_data.json".to_string(),
            timezone: "Europe/Kyiv".to_string(),
        }
    }
}

impl Default for ScrapeSection {
    fn default() -> Self {
        Self {
            user_agent: chek_scrape::client::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            export_file: "Result.csv".to_string(),
        }
    }
}

impl Config {
    pub fn links_path(&self) -> Result<PathBuf> {
        resolve(&self.storage.links_file)
    }

    pub fn export_path(&self) -> Result<PathBuf> {
        resolve(&self.scrape.export_file)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.scrape.user_agent.clone(),
            timeout: Duration::from_secs(self.scrape.timeout_secs.max(1)),
        }
    }

    /// Current calendar date in the configured zone.
    pub fn today(&self) -> Result<NaiveDate> {
        let tz: Tz = self
            .storage
            .timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {}", self.storage.timezone))?;
        Ok(chrono::Utc::now().with_timezone(&tz).date_naive())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_chek_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
