//! Category tallies over a dataset

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, EmployeeRecord};

/// Categorical columns that can be tallied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryColumn {
    #[default]
    Department,
    Region,
    Gender,
}

impl CategoryColumn {
    pub fn value<'a>(&self, record: &'a EmployeeRecord) -> &'a str {
        match self {
            CategoryColumn::Department => &record.department,
            CategoryColumn::Region => &record.region,
            CategoryColumn::Gender => &record.gender,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CategoryColumn::Department => "Department",
            CategoryColumn::Region => "Region",
            CategoryColumn::Gender => "Gender",
        }
    }

    /// Lowercase form used in running text, e.g. "department"
    pub fn noun(&self) -> String {
        self.name().to_lowercase()
    }
}

/// Label to occurrence count, iterated in label order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMapping {
    counts: BTreeMap<String, u64>,
}

impl CountMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    /// Count for `label`, zero when the label never occurred
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl<'a> FromIterator<&'a str> for CountMapping {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut mapping = CountMapping::new();
        for label in iter {
            mapping.increment(label);
        }
        mapping
    }
}

/// Tally and target lookup computed in one go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub column: CategoryColumn,
    pub mapping: CountMapping,
    pub target: String,
    pub target_count: u64,
}

pub fn tally(dataset: &Dataset, column: CategoryColumn) -> CountMapping {
    dataset.iter().map(|record| column.value(record)).collect()
}

pub fn count_by_department(dataset: &Dataset) -> CountMapping {
    tally(dataset, CategoryColumn::Department)
}

pub fn aggregate(dataset: &Dataset, column: CategoryColumn, target: &str) -> Aggregation {
    let mapping = tally(dataset, column);
    let target_count = mapping.get(target);
    tracing::debug!(
        column = column.name(),
        categories = mapping.len(),
        label = target,
        target_count,
        "Aggregated dataset"
    );
    Aggregation {
        column,
        mapping,
        target: target.to_string(),
        target_count,
    }
}
