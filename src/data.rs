//! Dataset loading and deterministic synthesis

use std::path::{Path, PathBuf};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// Department labels with their sampling weights
pub const DEPARTMENT_WEIGHTS: [(&str, f64); 6] = [
    ("Operations", 0.28),
    ("Sales", 0.18),
    ("HR", 0.12),
    ("Finance", 0.15),
    ("IT", 0.17),
    ("Marketing", 0.10),
];

pub const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// One employee row.
///
/// Only `Department` is required when reading a file. Other columns may be
/// missing, and numeric cells that are empty or do not parse read as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    #[serde(rename = "EmployeeID", default, deserialize_with = "csv::invalid_option")]
    pub employee_id: Option<u32>,
    #[serde(default)]
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub performance_score: Option<u8>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tenure_years: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub salary: Option<u32>,
    #[serde(default)]
    pub gender: String,
}

/// Ordered collection of employee rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
}

impl Dataset {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter()
    }
}

impl FromIterator<EmployeeRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = EmployeeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Where the dataset comes from, decided once before loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    ExistingFile(PathBuf),
    Synthesize { rows: usize, seed: u64 },
}

impl DataSource {
    /// Pick `ExistingFile` when `input_path` names a file, else `Synthesize`.
    pub fn resolve(input_path: &Path, rows: usize, seed: u64) -> Self {
        if input_path.is_file() {
            DataSource::ExistingFile(input_path.to_path_buf())
        } else {
            DataSource::Synthesize { rows, seed }
        }
    }

    pub fn load(&self) -> VizResult<Dataset> {
        match self {
            DataSource::ExistingFile(path) => read_csv(path),
            DataSource::Synthesize { rows, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                synthesize(*rows, &mut rng)
            }
        }
    }
}

/// Read a header-prefixed CSV table. Columns are matched by header name and
/// cell text is kept as written.
pub fn read_csv(path: &Path) -> VizResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| VizError::dataset_unavailable(path, e))?;

    let records = reader
        .deserialize::<EmployeeRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| VizError::dataset_unavailable(path, e))?;

    tracing::info!(rows = records.len(), "Loaded dataset from {:?}", path);
    Ok(Dataset::new(records))
}

/// Generate `rows` employees from `rng`.
///
/// Columns are drawn one after another (every department, then every
/// region, and so on), so the same seed always yields the same table.
pub fn synthesize<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> VizResult<Dataset> {
    let weights = DEPARTMENT_WEIGHTS.iter().map(|(_, w)| *w);
    let department_dist = WeightedIndex::new(weights)
        .map_err(|e| VizError::InvalidInput(format!("department weights: {}", e)))?;

    let departments: Vec<&str> = (0..rows)
        .map(|_| DEPARTMENT_WEIGHTS[department_dist.sample(rng)].0)
        .collect();
    let regions: Vec<&str> = (0..rows)
        .map(|_| REGIONS[rng.gen_range(0..REGIONS.len())])
        .collect();
    let scores: Vec<u8> = (0..rows).map(|_| rng.gen_range(1..=5)).collect();
    let tenures: Vec<f64> = (0..rows)
        .map(|_| round_to_tenth(rng.gen_range(0.2..=12.0)))
        .collect();
    let salaries: Vec<u32> = (0..rows).map(|_| rng.gen_range(30_000..=150_000)).collect();
    let genders: Vec<&str> = (0..rows)
        .map(|_| GENDERS[rng.gen_range(0..GENDERS.len())])
        .collect();

    let dataset: Dataset = (0..rows)
        .map(|i| {
            let employee_id = i as u32 + 1;
            EmployeeRecord {
                employee_id: Some(employee_id),
                name: format!("Employee_{}", employee_id),
                department: departments[i].to_string(),
                region: regions[i].to_string(),
                performance_score: Some(scores[i]),
                tenure_years: Some(tenures[i]),
                salary: Some(salaries[i]),
                gender: genders[i].to_string(),
            }
        })
        .collect();

    tracing::debug!(rows, "Synthesized dataset");
    Ok(dataset)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use tempfile::tempdir;

    const HEADER: &str = "EmployeeID,Name,Department,Region,PerformanceScore,TenureYears,Salary,Gender\n";

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = DEPARTMENT_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let a = DataSource::Synthesize { rows: 100, seed: 42 }.load().unwrap();
        let b = DataSource::Synthesize { rows: 100, seed: 42 }.load().unwrap();
        assert_eq!(a, b);

        let c = DataSource::Synthesize { rows: 100, seed: 43 }.load().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_synthesized_columns_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let dataset = synthesize(250, &mut rng).unwrap();
        assert_eq!(dataset.len(), 250);

        for (i, record) in dataset.iter().enumerate() {
            assert_eq!(record.employee_id, Some(i as u32 + 1));
            assert_eq!(record.name, format!("Employee_{}", i + 1));
            assert!(DEPARTMENT_WEIGHTS.iter().any(|(d, _)| *d == record.department));
            assert!(REGIONS.contains(&record.region.as_str()));
            assert!(GENDERS.contains(&record.gender.as_str()));
            let score = record.performance_score.unwrap();
            let tenure = record.tenure_years.unwrap();
            let salary = record.salary.unwrap();
            assert!((1..=5).contains(&score));
            assert!((0.2..=12.0).contains(&tenure));
            assert_eq!(tenure, round_to_tenth(tenure));
            assert!((30_000..=150_000).contains(&salary));
        }
    }

    #[test]
    fn test_synthesize_with_injected_rng() {
        // A constant generator always lands in the first bucket.
        let mut rng = StepRng::new(0, 0);
        let dataset = synthesize(3, &mut rng).unwrap();
        assert!(dataset.iter().all(|r| r.department == "Operations"));
        assert!(dataset.iter().all(|r| r.region == "North"));
    }

    #[test]
    fn test_synthesize_zero_rows() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(synthesize(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_prefers_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        assert_eq!(
            DataSource::resolve(&path, 100, 42),
            DataSource::Synthesize { rows: 100, seed: 42 }
        );

        std::fs::write(&path, HEADER).unwrap();
        assert_eq!(
            DataSource::resolve(&path, 100, 42),
            DataSource::ExistingFile(path.clone())
        );
    }

    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        let body = format!(
            "{}1,Ann,Sales,North,4,3.5,50000,Female\n2,Bo,Sales,East,2,1.0,42000,Male\n3,Cy,HR,West,5,10.2,99000,Other\n",
            HEADER
        );
        std::fs::write(&path, body).unwrap();

        let dataset = DataSource::ExistingFile(path).load().unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].name, "Ann");
        assert_eq!(dataset.records()[2].department, "HR");
        assert_eq!(dataset.records()[2].tenure_years, Some(10.2));
        assert_eq!(dataset.records()[0].salary, Some(50_000));
    }

    #[test]
    fn test_read_csv_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        std::fs::write(&path, HEADER).unwrap();

        assert!(read_csv(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_csv_keeps_cell_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        std::fs::write(
            &path,
            format!(
                "{}1,Ann,\" Operations \",North,4,3.5,50000,Female\n2,Bo,Operations,East,2,1.0,42000,Male\n",
                HEADER
            ),
        )
        .unwrap();

        let dataset = read_csv(&path).unwrap();
        assert_eq!(dataset.records()[0].department, " Operations ");

        let result = crate::aggregate::aggregate(&dataset, crate::aggregate::CategoryColumn::Department, "Operations");
        assert_eq!(result.target_count, 1);
        assert_eq!(result.mapping.get(" Operations "), 1);
        assert_eq!(result.mapping.len(), 2);
    }

    #[test]
    fn test_read_csv_lenient_numeric_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        std::fs::write(
            &path,
            format!(
                "{}1,Ann,Sales,North,high,,50000.0,Female\n",
                HEADER
            ),
        )
        .unwrap();

        let dataset = read_csv(&path).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.department, "Sales");
        assert_eq!(record.employee_id, Some(1));
        assert_eq!(record.performance_score, None);
        assert_eq!(record.tenure_years, None);
        assert_eq!(record.salary, None);
    }

    #[test]
    fn test_read_csv_department_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        std::fs::write(&path, "Department\nHR\nIT\n").unwrap();

        let dataset = read_csv(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].department, "IT");
        assert_eq!(dataset.records()[1].employee_id, None);
        assert!(dataset.records()[1].name.is_empty());
    }

    #[test]
    fn test_read_csv_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        std::fs::write(&path, format!("{}1,Ann,Sales\n", HEADER)).unwrap();

        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, VizError::DatasetUnavailable { .. }));
    }

    #[test]
    fn test_read_csv_without_department_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        std::fs::write(&path, "EmployeeID,Name\n1,Ann\n").unwrap();

        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, VizError::DatasetUnavailable { .. }));
    }
}
