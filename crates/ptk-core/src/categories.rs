//! Business category registry.
//!
//! Category codes (`"REST"`, `"AUTO"`, …) arrive on business records as bare
//! strings. The registry maps them to display labels and is loaded from a
//! YAML file so deployments can extend the set without a rebuild; when no
//! file is configured the built-in table covers the standard site
//! categories.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCategory {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<BusinessCategory>,
}

impl CategoriesFile {
    /// Look up the display label for a category code. Unknown codes fall
    /// back to the code itself so a new backend category still renders.
    #[must_use]
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.code == code)
            .map_or(code, |c| c.label.as_str())
    }
}

/// The standard category set shipped with the client.
#[must_use]
pub fn default_categories() -> CategoriesFile {
    let table = [
        ("AUTO", "Automotive"),
        ("ENT", "Entertainment"),
        ("FUEL", "Fuel & Convenience"),
        ("GROC", "Grocery"),
        ("HARDW", "Hardware & Home"),
        ("HEALTH", "Health & Wellness"),
        ("REST", "Restaurant"),
        ("RETAIL", "Retail"),
        ("SERV", "Services"),
        ("TECH", "Technology"),
        ("OTHER", "Other"),
    ];
    CategoriesFile {
        categories: table
            .iter()
            .map(|(code, label)| BusinessCategory {
                code: (*code).to_string(),
                label: (*label).to_string(),
            })
            .collect(),
    }
}

/// Load and validate the category registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile = serde_yaml::from_str(&content)?;
    validate_categories(&file)?;
    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for category in &file.categories {
        if category.code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category code must be non-empty".to_string(),
            ));
        }
        if category.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty label",
                category.code
            )));
        }
        if !seen.insert(category.code.to_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category code: '{}'",
                category.code
            )));
        }
    }

    Ok(())
}
