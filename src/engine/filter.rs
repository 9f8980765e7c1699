//! Per-column filter evaluation
//!
//! A row passes when every filter entry matches its column. Columns with an
//! option list compare the cell against the option id exactly; free-text
//! columns use the configured [`MatchStrategy`]. Filtering runs before
//! pagination so page counts reflect the filtered total.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::{Regex, RegexBuilder};
use tracing::{debug, trace, warn};

use crate::config::MatchStrategy;
use crate::data::column::{ColumnFilter, ColumnModel};
use crate::data::row::Row;
use crate::data::value::DataValue;
use crate::error::{Result, ViewError};
use crate::state::view_state::Filter;

/// Rows that passed plus the filter entries that were skipped as malformed
#[derive(Debug, Clone)]
pub struct FilterOutcome<'r> {
    pub rows: Vec<&'r Row>,
    pub ignored: Vec<ViewError>,
}

enum Predicate {
    /// The default rule in [`matches`]: option id equality or substring
    Default {
        value: String,
        descriptor: ColumnFilter,
    },
    /// Needle is stored lowercased
    ContainsIgnoreCase(String),
    Prefix(String),
    Pattern(Regex),
    Fuzzy {
        matcher: SkimMatcherV2,
        pattern: String,
    },
}

impl Predicate {
    fn is_match(&self, cell: &DataValue) -> bool {
        match self {
            Predicate::Default { value, descriptor } => matches(cell, value, descriptor),
            Predicate::ContainsIgnoreCase(needle) => {
                cell.as_text().to_lowercase().contains(needle.as_str())
            }
            Predicate::Prefix(needle) => cell.as_text().starts_with(needle.as_str()),
            Predicate::Pattern(regex) => regex.is_match(&cell.as_text()),
            Predicate::Fuzzy { matcher, pattern } => {
                matcher.fuzzy_match(&cell.as_text(), pattern).is_some()
            }
        }
    }
}

struct ColumnPredicate {
    column_id: String,
    predicate: Predicate,
}

/// A filter set resolved against the column model, ready to test rows
pub struct CompiledFilters {
    predicates: Vec<ColumnPredicate>,
    ignored: Vec<ViewError>,
}

impl CompiledFilters {
    pub fn matches(&self, row: &Row) -> bool {
        self.predicates
            .iter()
            .all(|p| p.predicate.is_match(row.value(&p.column_id)))
    }

    /// True when no usable filter entry remains
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn ignored(&self) -> &[ViewError] {
        &self.ignored
    }
}

pub struct FilterEngine<'c> {
    columns: &'c ColumnModel,
    strategy: MatchStrategy,
}

impl<'c> FilterEngine<'c> {
    pub fn new(columns: &'c ColumnModel, strategy: MatchStrategy) -> Self {
        Self { columns, strategy }
    }

    /// Resolve filters against the column model.
    ///
    /// Unknown columns fail the whole call. Entries that do not fit their
    /// column (not filterable, value outside the option list, bad pattern)
    /// are skipped and reported in `ignored`.
    pub fn compile(&self, filters: &[Filter]) -> Result<CompiledFilters> {
        let mut predicates = Vec::with_capacity(filters.len());
        let mut ignored = Vec::new();

        for filter in filters {
            let column = self.columns.require(&filter.column_id)?;
            let compiled = match &column.filter {
                None => Err(malformed(filter, "column is not filterable")),
                Some(descriptor) => self.predicate_for(filter, descriptor),
            };

            match compiled {
                Ok(predicate) => predicates.push(ColumnPredicate {
                    column_id: filter.column_id.clone(),
                    predicate,
                }),
                Err(err) => {
                    warn!(target: "filter", "{}", err);
                    ignored.push(err);
                }
            }
        }

        Ok(CompiledFilters {
            predicates,
            ignored,
        })
    }

    fn predicate_for(&self, filter: &Filter, descriptor: &ColumnFilter) -> Result<Predicate> {
        if descriptor.has_options() {
            if !descriptor.has_option(&filter.value) {
                return Err(malformed(filter, "value is not one of the column's options"));
            }
            return Ok(default_predicate(filter, descriptor));
        }

        let value = filter.value.as_str();
        let predicate = match self.strategy {
            MatchStrategy::Substring => default_predicate(filter, descriptor),
            MatchStrategy::CaseInsensitive => Predicate::ContainsIgnoreCase(value.to_lowercase()),
            MatchStrategy::Prefix => Predicate::Prefix(value.to_string()),
            MatchStrategy::WholeWord => {
                let pattern = format!(r"\b{}\b", regex::escape(value));
                let regex = RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| malformed(filter, &e.to_string()))?;
                Predicate::Pattern(regex)
            }
            MatchStrategy::Regex => {
                let regex = Regex::new(value).map_err(|e| malformed(filter, &e.to_string()))?;
                Predicate::Pattern(regex)
            }
            MatchStrategy::Fuzzy => Predicate::Fuzzy {
                matcher: SkimMatcherV2::default().ignore_case(),
                pattern: value.to_string(),
            },
        };
        Ok(predicate)
    }

    /// Keep the rows that satisfy every filter, preserving input order
    pub fn apply<'r, I>(&self, rows: I, filters: &[Filter]) -> Result<FilterOutcome<'r>>
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let compiled = self.compile(filters)?;
        let rows: Vec<&Row> = if compiled.is_empty() {
            rows.into_iter().collect()
        } else {
            rows.into_iter()
                .filter(|row| {
                    let keep = compiled.matches(row);
                    trace!(target: "filter", "row {} -> {}", row.id, keep);
                    keep
                })
                .collect()
        };

        debug!(
            target: "filter",
            "{} filters kept {} rows ({} ignored)",
            filters.len(),
            rows.len(),
            compiled.ignored.len()
        );
        Ok(FilterOutcome {
            rows,
            ignored: compiled.ignored,
        })
    }
}

/// Default match rule: option id equality for option-list columns,
/// case-sensitive substring containment otherwise
pub fn matches(cell: &DataValue, value: &str, descriptor: &ColumnFilter) -> bool {
    if descriptor.has_options() {
        cell.as_text() == value
    } else {
        cell.as_text().contains(value)
    }
}

/// Canonical filter set: empty values dropped, one entry per column (the
/// last one given wins), first-appearance order kept
pub fn normalize_filters(filters: Vec<Filter>) -> Vec<Filter> {
    let mut normalized: Vec<Filter> = Vec::with_capacity(filters.len());
    for filter in filters {
        match normalized
            .iter_mut()
            .find(|f| f.column_id == filter.column_id)
        {
            Some(existing) => existing.value = filter.value,
            None => normalized.push(filter),
        }
    }
    normalized.retain(|f| !f.value.is_empty());
    normalized
}

fn default_predicate(filter: &Filter, descriptor: &ColumnFilter) -> Predicate {
    Predicate::Default {
        value: filter.value.clone(),
        descriptor: descriptor.clone(),
    }
}

fn malformed(filter: &Filter, reason: &str) -> ViewError {
    ViewError::MalformedFilter {
        column_id: filter.column_id.clone(),
        value: filter.value.clone(),
        reason: reason.to_string(),
    }
}
