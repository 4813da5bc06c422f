use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const TEXT_MODEL_ENV: &str = "GEMINI_TEXT_MODEL";
pub const VISION_MODEL_ENV: &str = "GEMINI_VISION_MODEL";

/// プロセス起動時に1度だけ組み立てる設定
///
/// APIキーは設定ファイルに保存しない（環境変数 / .env のみ）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub base_url: String,
    /// 画像なしのときのモデル
    pub text_model: String,
    /// 画像ありのときのモデル
    pub vision_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            text_model: "gemini-pro".into(),
            vision_model: "gemini-1.5-flash".into(),
        }
    }
}

impl Config {
    /// 設定ファイル + 環境変数から読み込み
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// 設定ファイルのみ読み込み（無ければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 環境変数で上書き（空文字は未設定扱い）
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Some(model) = get(TEXT_MODEL_ENV) {
            self.text_model = model;
        }
        if let Some(model) = get(VISION_MODEL_ENV) {
            self.vision_model = model;
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AnalyzerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("error-analyzer").join("config.json"))
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AnalyzerError::MissingApiKey)
    }

    /// 画像の有無でモデルを選択
    pub fn model_for(&self, has_image: bool) -> &str {
        if has_image {
            &self.vision_model
        } else {
            &self.text_model
        }
    }
}
