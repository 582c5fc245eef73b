//! Single-run report pipeline: load, aggregate, render, write

use std::path::PathBuf;

use crate::aggregate::{aggregate, Aggregation};
use crate::chart::{ChartRenderer, SvgBarChart};
use crate::config::DeptvizConfig;
use crate::data::DataSource;
use crate::error::{VizError, VizResult};
use crate::report::{count_line, Report, ReportWriter};

/// Outcome of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source: DataSource,
    pub rows: usize,
    pub aggregation: Aggregation,
    pub output_path: PathBuf,
}

impl RunSummary {
    pub fn count_line(&self) -> String {
        count_line(
            &self.aggregation.target,
            self.aggregation.column,
            self.aggregation.target_count,
        )
    }

    pub fn output_line(&self) -> String {
        format!("HTML written to: {}", self.output_path.display())
    }
}

pub struct Pipeline {
    config: DeptvizConfig,
    renderer: Box<dyn ChartRenderer>,
    source_text: Option<String>,
}

impl Pipeline {
    pub fn new(config: DeptvizConfig) -> Self {
        Self {
            config,
            renderer: Box::new(SvgBarChart::new()),
            source_text: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn ChartRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Embed `text` in the report. Takes precedence over `report.source_path`.
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    pub fn run(&self) -> VizResult<RunSummary> {
        let dataset_cfg = &self.config.dataset;
        let source = DataSource::resolve(&dataset_cfg.input_path, dataset_cfg.rows, dataset_cfg.seed);
        match &source {
            DataSource::ExistingFile(path) => tracing::info!("Reading dataset from {:?}", path),
            DataSource::Synthesize { rows, seed } => {
                tracing::warn!(rows, seed, "No input file found, synthesizing dataset")
            }
        }
        let dataset = source.load()?;

        let aggregation = aggregate(
            &dataset,
            self.config.aggregation.column,
            &self.config.aggregation.target,
        );
        tracing::info!(
            label = %aggregation.target,
            count = aggregation.target_count,
            categories = aggregation.mapping.len(),
            "Computed category counts"
        );

        let style = self.config.chart.style_for(aggregation.column);
        let chart = self.renderer.render(&aggregation.mapping, &style)?;

        let report = Report::new(&aggregation.target, aggregation.target_count, chart)
            .with_column(aggregation.column)
            .with_title(&self.config.report.title)
            .with_contact(self.config.report.contact.clone())
            .with_source_text(self.resolve_source_text()?);

        let output_path = self.config.report.output_path.clone();
        ReportWriter::new().write(&report, &output_path)?;

        Ok(RunSummary {
            source,
            rows: dataset.len(),
            aggregation,
            output_path,
        })
    }

    fn resolve_source_text(&self) -> VizResult<Option<String>> {
        if let Some(text) = &self.source_text {
            return Ok(Some(text.clone()));
        }
        match &self.config.report.source_path {
            Some(path) => std::fs::read_to_string(path).map(Some).map_err(|e| {
                VizError::Configuration(format!("Failed to read source text {}: {}", path.display(), e))
            }),
            None => Ok(None),
        }
    }
}
