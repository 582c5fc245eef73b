//! Configuration management for deptviz

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::aggregate::CategoryColumn;
use crate::error::{VizError, VizResult};

/// Conventional location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "deptviz.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub input_path: PathBuf,
    pub rows: usize,
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("employees.csv"),
            rows: 100,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub column: CategoryColumn,
    pub target: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            column: CategoryColumn::Department,
            target: "Operations".to_string(),
        }
    }
}

/// Chart settings. `title` and `x_label` follow the tallied column unless set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            title: None,
            x_label: None,
            y_label: "Number of Employees".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn style_for(&self, column: CategoryColumn) -> ChartStyle {
        ChartStyle {
            width: self.width,
            height: self.height,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| format!("{} Distribution (Count)", column.name())),
            x_label: self.x_label.clone().unwrap_or_else(|| column.name().to_string()),
            y_label: self.y_label.clone(),
        }
    }
}

/// Fully resolved labels and size handed to a chart renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartConfig::default().style_for(CategoryColumn::Department)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub title: String,
    pub contact: Option<String>,
    /// Text file embedded verbatim in the report, if set
    pub source_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("employee_department_distribution.html"),
            title: "Employee Department Distribution".to_string(),
            contact: None,
            source_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevelopmentConfig {
    pub verbose_logging: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeptvizConfig {
    pub dataset: DatasetConfig,
    pub aggregation: AggregationConfig,
    pub chart: ChartConfig,
    pub report: ReportConfig,
    pub development: DevelopmentConfig,
}

impl DeptvizConfig {
    pub fn load_from_file(path: &Path) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VizError::Configuration(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let config: DeptvizConfig = serde_json::from_str(&content)
            .map_err(|e| VizError::Configuration(format!("Failed to parse config file {}: {}", path.display(), e)))?;

        config.validate()?;
        tracing::info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> VizResult<Self> {
        if path.is_file() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> VizResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| VizError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| VizError::Configuration(format!("Failed to write config file {}: {}", path.display(), e)))?;

        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(VizError::Configuration(format!(
                "chart dimensions must be non-zero, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }
}

/// Create a configuration builder for easy setup
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: DeptvizConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(mut self, f: impl FnOnce(&mut DatasetConfig)) -> Self {
        f(&mut self.config.dataset);
        self
    }

    pub fn aggregation(mut self, f: impl FnOnce(&mut AggregationConfig)) -> Self {
        f(&mut self.config.aggregation);
        self
    }

    pub fn chart(mut self, f: impl FnOnce(&mut ChartConfig)) -> Self {
        f(&mut self.config.chart);
        self
    }

    pub fn report(mut self, f: impl FnOnce(&mut ReportConfig)) -> Self {
        f(&mut self.config.report);
        self
    }

    pub fn development(mut self, f: impl FnOnce(&mut DevelopmentConfig)) -> Self {
        f(&mut self.config.development);
        self
    }

    pub fn build(self) -> VizResult<DeptvizConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
