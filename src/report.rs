//! Self-contained HTML report assembly and persistence

use std::fs;
use std::io::Write;
use std::path::Path;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tempfile::NamedTempFile;

use crate::aggregate::CategoryColumn;
use crate::chart::RenderedChart;
use crate::error::{VizError, VizResult};

const STYLE: &str = r#"    body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial, sans-serif; max-width: 900px; margin: 2rem auto; padding: 0 1rem; }
    header { margin-bottom: 1rem; }
    h1 { font-size: 1.6rem; margin: 0 0 .25rem 0; }
    .meta { color: #444; font-size: .95rem; }
    figure { margin: 1.5rem 0; }
    figcaption { color: #444; font-size: .95rem; }
    img { max-width: 100%; height: auto; }
    pre { background: #f5f5f5; padding: .75rem; border-radius: 6px; overflow-x: auto; }
    footer { margin-top: 2rem; color: #555; font-size: .9rem; }
    code { font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, "Liberation Mono", "Courier New", monospace; }"#;

/// One generated report. Built once, then written once.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    column: CategoryColumn,
    target: String,
    target_count: u64,
    chart: RenderedChart,
    contact: Option<String>,
    source_text: Option<String>,
}

impl Report {
    pub fn new(target: &str, target_count: u64, chart: RenderedChart) -> Self {
        Self {
            title: "Employee Department Distribution".to_string(),
            column: CategoryColumn::Department,
            target: target.to_string(),
            target_count,
            chart,
            contact: None,
            source_text: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_column(mut self, column: CategoryColumn) -> Self {
        self.column = column;
        self
    }

    pub fn with_contact(mut self, contact: Option<String>) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_source_text(mut self, source_text: Option<String>) -> Self {
        self.source_text = source_text;
        self
    }

    pub fn target_count(&self) -> u64 {
        self.target_count
    }

    pub fn count_line(&self) -> String {
        count_line(&self.target, self.column, self.target_count)
    }

    pub fn image_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.chart.mime_type, STANDARD.encode(&self.chart.bytes))
    }

    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let target = escape_html(&self.target);
        let column = self.column.name();

        let meta = match &self.contact {
            Some(contact) => format!(
                "\n    <div class=\"meta\">Contact: <code>{}</code></div>",
                escape_html(contact)
            ),
            None => String::new(),
        };

        let source = match &self.source_text {
            Some(text) => format!(
                r#"
  <section>
    <h2>Source</h2>
    <pre><code>{}</code></pre>
  </section>
"#,
                escape_html(text)
            ),
            None => String::new(),
        };

        format!(
            r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>
{style}
  </style>
</head>
<body>
  <header>
    <h1>{title}</h1>{meta}
  </header>

  <section>
    <h2>{target} {column} Count</h2>
    <pre>{count_line}</pre>
  </section>

  <section>
    <h2>Histogram of {column}s</h2>
    <figure>
      <img alt="{column} distribution chart" src="{image}" />
      <figcaption>Counts of employees per {noun}.</figcaption>
    </figure>
  </section>
{source}
  <footer>
    <p>This HTML file is self-contained. It has no external dependencies and can be shared as a single file.</p>
  </footer>
</body>
</html>
"#,
            title = title,
            style = STYLE,
            meta = meta,
            target = target,
            column = column,
            noun = self.column.noun(),
            count_line = escape_html(&self.count_line()),
            image = self.image_data_uri(),
            source = source,
        )
    }
}

/// The line printed to the console and embedded in the report
pub fn count_line(target: &str, column: CategoryColumn, count: u64) -> String {
    format!("{} {} count: {}", target, column.noun(), count)
}

/// Persists reports, replacing whatever was at the destination
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write through a temp file in the destination directory, then rename over `path`.
    pub fn write(&self, report: &Report, path: &Path) -> VizResult<()> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir).map_err(|e| VizError::output_write(path, e))?;

        let html = report.to_html();
        let mut temp_file =
            NamedTempFile::new_in(parent_dir).map_err(|e| VizError::output_write(path, e))?;
        temp_file
            .write_all(html.as_bytes())
            .and_then(|_| temp_file.flush())
            .map_err(|e| VizError::output_write(path, e))?;
        temp_file
            .persist(path)
            .map_err(|e| VizError::output_write(path, e.error))?;

        tracing::info!(bytes = html.len(), "Report written to {:?}", path);
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
