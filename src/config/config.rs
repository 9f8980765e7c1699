use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Full table configuration. Every section has explicit defaults so a
/// partially written file still resolves to a complete value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TableConfig {
    pub options: TableOptions,
    pub pagination: PaginationConfig,
    pub filter: FilterConfig,
    pub selection: SelectionConfig,
    pub sort: SortConfig,
    pub history: HistoryConfig,
}

/// Feature gates. Each only decides whether an engine takes part in the
/// projection; none changes what an engine does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub has_pagination: bool,
    pub has_row_selection: bool,
    pub has_filter: bool,
    pub has_row_expansion: bool,
    pub has_row_actions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Initial page size
    pub page_size: usize,

    /// Sizes offered by the page-size picker
    pub page_sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// How free-text filter values are matched against cells
    pub strategy: MatchStrategy,
}

/// Free-text matching strategies. Option-list columns always use exact
/// equality against the option id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Case-sensitive substring containment
    #[default]
    Substring,
    CaseInsensitive,
    Prefix,
    /// Filter value must appear as a whole word, case-insensitive
    WholeWord,
    /// Filter value is a regular expression
    Regex,
    /// Skim-style fuzzy match
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionConfig {
    pub policy: SelectionPolicy,
}

/// What happens to selected rows when the filter set changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Selection survives filtering, including rows the filter hides
    #[default]
    Persist,
    ClearOnFilterChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SortConfig {
    pub mode: SortMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// The host sorts the dataset it passes in; the projection keeps row order
    #[default]
    Remote,
    /// The projection sorts rows itself
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Transitions kept by the controller for debugging
    pub max_events: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_pagination: true,
            has_row_selection: true,
            has_filter: true,
            has_row_expansion: false,
            has_row_actions: false,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_sizes: vec![10, 20, 30],
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_events: 100 }
    }
}

impl TableConfig {
    /// Load config from the default location, writing defaults if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load and validate config from a file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        debug!(target: "config", "Loading config from {:?}", path.as_ref());
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: TableConfig = toml::from_str(contents)?;
        config.validate()
    }

    /// Save config, creating the parent directory when needed
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("table-view").join("config.toml"))
    }

    /// Resolve the config into its canonical form.
    ///
    /// `page_size` must be positive; it is added to `page_sizes` when the
    /// picker does not offer it, and the picker list is sorted and deduped.
    pub fn validate(mut self) -> Result<Self> {
        if self.pagination.page_size == 0 {
            bail!("pagination.page_size must be greater than zero");
        }
        if self.pagination.page_sizes.contains(&0) {
            bail!("pagination.page_sizes must not contain zero");
        }

        if !self
            .pagination
            .page_sizes
            .contains(&self.pagination.page_size)
        {
            warn!(
                target: "config",
                "page_size {} not offered in page_sizes, adding it",
                self.pagination.page_size
            );
            self.pagination.page_sizes.push(self.pagination.page_size);
        }
        self.pagination.page_sizes.sort_unstable();
        self.pagination.page_sizes.dedup();

        Ok(self)
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# table-view configuration
# Location: ~/.config/table-view/config.toml (Linux)

[options]
has_pagination = true
has_row_selection = true
has_filter = true
# Expandable rows and per-row action menus are off unless the host renders them
has_row_expansion = false
has_row_actions = false

[pagination]
page_size = 10
page_sizes = [10, 20, 30]

[filter]
# "substring" (case-sensitive), "case_insensitive", "prefix", "whole_word",
# "regex" or "fuzzy"
strategy = "substring"

[selection]
# "persist" keeps selected rows hidden by a filter,
# "clear_on_filter_change" drops the selection whenever filters change
policy = "persist"

[sort]
# "remote": the host sorts the rows it passes in
# "local": rows are sorted while building the projection
mode = "remote"

[history]
max_events = 100
"#
        .to_string()
    }
}
