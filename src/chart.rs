//! Bar chart rendering for count mappings

use plotters::prelude::*;

use crate::aggregate::CountMapping;
use crate::config::ChartStyle;
use crate::error::{VizError, VizResult};

/// Encoded chart image ready to be embedded in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl RenderedChart {
    pub fn new(mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self { mime_type, bytes }
    }
}

/// Turns a count mapping into an image
pub trait ChartRenderer {
    fn render(&self, mapping: &CountMapping, style: &ChartStyle) -> VizResult<RenderedChart>;
}

/// Vertical bar chart drawn as SVG, one bar per label in label order
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgBarChart;

impl SvgBarChart {
    pub fn new() -> Self {
        Self
    }

    fn draw(&self, mapping: &CountMapping, style: &ChartStyle, svg: &mut String) -> VizResult<()> {
        let labels = mapping.labels();
        // An empty mapping still gets one slot so the axes can be laid out.
        let slots = labels.len().max(1) as u32;
        let y_max = mapping.max_count() + 1;

        let root = SVGBackend::with_string(svg, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE).map_err(VizError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&style.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0u64..y_max)
            .map_err(VizError::render)?;

        let x_formatter = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i as usize).map(|l| l.to_string()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots as usize)
            .x_label_formatter(&x_formatter)
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .draw()
            .map_err(VizError::render)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.filled())
                    .margin(10)
                    .data(mapping.iter().enumerate().map(|(i, (_, count))| (i as u32, count))),
            )
            .map_err(VizError::render)?;

        root.present().map_err(VizError::render)?;
        Ok(())
    }
}

impl ChartRenderer for SvgBarChart {
    fn render(&self, mapping: &CountMapping, style: &ChartStyle) -> VizResult<RenderedChart> {
        let mut svg = String::new();
        self.draw(mapping, style, &mut svg)?;
        tracing::debug!(bars = mapping.len(), bytes = svg.len(), "Rendered bar chart");
        Ok(RenderedChart::new("image/svg+xml", svg.into_bytes()))
    }
}
