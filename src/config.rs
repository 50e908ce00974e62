use crate::error::{QuoteError, Result};
use quote_pricing_common::{Catalog, Segment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SEGMENT_ENV: &str = "QUOTE_PRICING_SEGMENT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// テナントの業種
    pub segment: Segment,
    /// カタログJSON（未設定なら組み込みカタログ）
    pub catalog_path: Option<PathBuf>,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segment: Segment::Glazier,
            catalog_path: None,
            currency_symbol: "R$".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("設定を読み込み: {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QuoteError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("quote-pricing").join("config.json"))
    }

    /// 業種（環境変数を優先）
    pub fn effective_segment(&self) -> Result<Segment> {
        match std::env::var(SEGMENT_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(value.parse::<Segment>()?),
            _ => Ok(self.segment),
        }
    }

    pub fn set_segment(&mut self, segment: Segment) -> Result<()> {
        self.segment = segment;
        self.save()
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(QuoteError::FileNotFound(path.display().to_string()));
        }
        self.catalog_path = Some(path);
        self.save()
    }

    /// カタログを読み込む
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => {
                if !path.exists() {
                    return Err(QuoteError::FileNotFound(path.display().to_string()));
                }
                Ok(Catalog::from_file(path)?)
            }
            None => Ok(Catalog::builtin()),
        }
    }
}
