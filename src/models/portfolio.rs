use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::album::Photo;

pub type PortfolioImageId = i32;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown portfolio category: {0:?}")]
pub struct UnknownCategory(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Wedding,
    Portrait,
    Nature,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Wedding, Category::Portrait, Category::Nature];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Wedding => "wedding",
            Category::Portrait => "portrait",
            Category::Nature => "nature",
        }
    }

    /// Tab label shown on the landing page.
    pub fn label(self) -> &'static str {
        match self {
            Category::Wedding => "Свадьбы",
            Category::Portrait => "Портреты",
            Category::Nature => "Природа",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portfolio selection, `all` unless a single category is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PortfolioImage {
    pub id: PortfolioImageId,
    pub title: String,
    pub url: String,
    pub category: Category,
    pub description: Option<String>,
    pub display_order: i32,
}

impl TryFrom<crate::db::portfolio::PortfolioImage> for PortfolioImage {
    type Error = UnknownCategory;

    fn try_from(row: crate::db::portfolio::PortfolioImage) -> Result<Self, Self::Error> {
        Ok(PortfolioImage {
            id: row.id,
            title: row.title,
            url: row.url,
            category: row.category.parse()?,
            description: row.description,
            display_order: row.display_order,
        })
    }
}

impl From<PortfolioImage> for lens_artistry_api_structs::PortfolioImage {
    fn from(image: PortfolioImage) -> Self {
        lens_artistry_api_structs::PortfolioImage {
            id: image.id,
            title: image.title,
            url: image.url,
            category: image.category.to_string(),
            description: image.description,
            display_order: image.display_order,
        }
    }
}

impl From<&PortfolioImage> for Photo {
    fn from(image: &PortfolioImage) -> Self {
        Photo {
            id: image.id,
            title: image.title.clone(),
            url: image.url.clone(),
        }
    }
}
