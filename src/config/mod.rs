//! Configuration loading and management

use crate::core::sort::SortDirection;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Ordering applied when a query carries no sort criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSort {
    /// Field name, resolved like any sort directive
    pub field: String,

    #[serde(default)]
    pub direction: SortDirection,
}

/// Query engine configuration
///
/// # Example
/// ```yaml
/// default_page_size: 20
/// max_page_size: 100
/// default_sort:
///   field: created_at
///   direction: desc
/// id_tiebreak: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size used when a table filter has none (0 = unbounded)
    #[serde(default)]
    pub default_page_size: usize,

    /// Upper bound for translated page sizes
    #[serde(default)]
    pub max_page_size: Option<usize>,

    /// Ordering used when a query has no sort criteria
    #[serde(default)]
    pub default_sort: Option<DefaultSort>,

    /// Order entities still tied after explicit sort criteria by id ascending.
    ///
    /// Queries without sort criteria are always finished by id, whatever
    /// this is set to.
    #[serde(default = "default_id_tiebreak")]
    pub id_tiebreak: bool,
}

fn default_id_tiebreak() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 0,
            max_page_size: None,
            default_sort: None,
            id_tiebreak: true,
        }
    }
}

impl QueryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_page_size {
            anyhow::ensure!(max > 0, "max_page_size must be positive");
            anyhow::ensure!(
                self.default_page_size <= max,
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size,
                max
            );
        }
        Ok(())
    }

    /// Apply `max_page_size` to a requested page size
    pub fn clamp_page_size(&self, requested: usize) -> usize {
        match self.max_page_size {
            Some(max) if requested == 0 || requested > max => max,
            _ => requested,
        }
    }
}
