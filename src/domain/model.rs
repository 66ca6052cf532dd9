use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One catalog entry, as parsed from the themes page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub name: String,
    pub description: String,
    pub repository_url: String,
    pub demo_url: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Price {
    #[default]
    Free,
    Paid,
}

impl Price {
    pub fn as_str(&self) -> &'static str {
        match self {
            Price::Free => "free",
            Price::Paid => "paid",
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Price {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Price::Free),
            "paid" => Ok(Price::Paid),
            other => Err(format!("unknown price filter `{}` (expected free or paid)", other)),
        }
    }
}

// 設定檔與命令列共用同一套解析規則
impl TryFrom<String> for Price {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Catalog filters for a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchQuery {
    pub technology: String,
    pub price: Price,
}

impl FetchQuery {
    pub fn new(technology: impl Into<String>, price: Price) -> Self {
        Self {
            technology: technology.into(),
            price,
        }
    }
}

impl Default for FetchQuery {
    fn default() -> Self {
        Self::new("react", Price::Free)
    }
}

impl fmt::Display for FetchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.technology, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub site_type: String,
}

impl Requirement {
    pub fn new(site_type: impl Into<String>) -> Self {
        Self {
            site_type: site_type.into(),
        }
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::new("blog")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub suggested_theme: String,
    pub features: Vec<String>,
    pub reason: String,
}
