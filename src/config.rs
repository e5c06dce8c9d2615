use crate::error::ShellError;
use crate::vfs::{TreeNode, VirtualFileTree};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Site definition shipped with the crate.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/portfolio.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub user: String,
    pub host: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementStatus {
    Certified,
    InProgress,
    Planned,
}

impl AchievementStatus {
    pub fn label(self) -> &'static str {
        match self {
            AchievementStatus::Certified => "✓ Certified",
            AchievementStatus::InProgress => "⟳ In Progress",
            AchievementStatus::Planned => "⧗ Planned",
        }
    }
}

/// One certificate card in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u32,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    pub status: AchievementStatus,
    pub icon: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Endpoints for the network-backed commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub weather_city: String,
    pub weather: String,
    pub joke: String,
    pub fact: String,
    pub crypto: String,
    pub github: String,
    #[serde(default = "default_punchline_delay")]
    pub punchline_delay_ms: u32,
}

fn default_punchline_delay() -> u32 {
    1000
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalBounds {
    pub min_height: f64,
    pub max_height_ratio: f64,
}

impl Default for TerminalBounds {
    fn default() -> Self {
        Self {
            min_height: 120.0,
            max_height_ratio: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub prompt: PromptConfig,
    pub whoami: String,
    pub home_page: String,
    /// Page that hosts the achievement cards.
    pub gallery_page: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub banner: Vec<String>,
    pub filesystem: TreeNode,
    pub pages: BTreeMap<String, String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    pub apis: ApiConfig,
    #[serde(default)]
    pub terminal: TerminalBounds,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Image ids are bare file stems: letters, digits, `_` and `-`.
fn is_image_id(image: &str) -> bool {
    !image.is_empty() && image.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl PortfolioConfig {
    pub fn builtin() -> Result<Self, ShellError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self, ShellError> {
        let config: PortfolioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the read-only tree from the `filesystem` definition.
    pub fn build_tree(&self) -> Result<VirtualFileTree, ShellError> {
        VirtualFileTree::new(self.filesystem.clone())
    }

    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn page_url(&self, page_id: &str) -> Option<&str> {
        self.pages.get(page_id).map(String::as_str)
    }

    fn validate(&self) -> Result<(), ShellError> {
        let tree = self.build_tree()?;
        if tree.root().page.as_deref() != Some(self.home_page.as_str()) {
            return Err(ShellError::InvalidConfig(format!(
                "filesystem root must carry the home page '{}'",
                self.home_page
            )));
        }
        if let Some(missing) = tree.page_ids().into_iter().find(|p| !self.pages.contains_key(*p)) {
            return Err(ShellError::InvalidConfig(format!("page '{}' has no url", missing)));
        }
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(ShellError::InvalidConfig(format!("unknown log level '{}'", self.log_level)));
        }
        // image ids land inside a JS string in the card's onerror handler
        if let Some(bad) = self
            .achievements
            .iter()
            .filter_map(|a| a.image.as_deref())
            .find(|image| !is_image_id(image))
        {
            return Err(ShellError::InvalidConfig(format!("invalid image id '{}'", bad)));
        }
        let bounds = self.terminal;
        if bounds.min_height <= 0.0 || !(0.0..=1.0).contains(&bounds.max_height_ratio) {
            return Err(ShellError::InvalidConfig("terminal bounds out of range".into()));
        }
        Ok(())
    }
}
