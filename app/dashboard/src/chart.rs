//! FILENAME: app/dashboard/src/chart.rs
//! Chart Specifications - declarative descriptions a front end can draw.
//!
//! A `ChartSpec` carries the chart kind, the data series already shaped
//! for that kind, and presentation hints (template, axis labels, text
//! labels). Nothing here computes; the numbers come from aggregates.

use serde::{Deserialize, Serialize};

use crate::color::ColorScale;
use sales_pivot::FlatNode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    /// `hole` is the donut radius as a fraction; 0 for a full pie.
    Pie { hole: f64 },
    Line,
    Treemap,
    Scatter,
    Table,
}

/// Named visual themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Seaborn,
    Gridon,
    PlotlyDark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    Auto,
    Inside,
    Outside,
}

/// Series data, shaped per chart kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ChartData {
    /// Labelled values: bars, pie slices, line points.
    Series { labels: Vec<String>, values: Vec<f64> },
    /// Point cloud with a marker size per point.
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        size: Vec<f64>,
    },
    /// Flattened hierarchy, parents before children.
    Tree { nodes: Vec<FlatNode> },
    /// Pre-formatted grid.
    Grid {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl ChartData {
    /// Number of marks the chart will draw.
    pub fn len(&self) -> usize {
        match self {
            ChartData::Series { values, .. } => values.len(),
            ChartData::Points { x, .. } => x.len(),
            ChartData::Tree { nodes } => nodes.len(),
            ChartData::Grid { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    /// Per-mark text, aligned with the data.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
    /// Column whose values pick the mark colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, data: ChartData) -> Self {
        ChartSpec {
            kind,
            title: title.into(),
            data,
            template: None,
            x_label: None,
            y_label: None,
            text: Vec::new(),
            text_position: None,
            color_by: None,
            color_scale: None,
            height: None,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    pub fn with_text(mut self, text: Vec<String>, position: TextPosition) -> Self {
        self.text = text;
        self.text_position = Some(position);
        self
    }

    pub fn with_color_by(mut self, column: impl Into<String>) -> Self {
        self.color_by = Some(column.into());
        self
    }

    pub fn with_color_scale(mut self, scale: ColorScale) -> Self {
        self.color_scale = Some(scale);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}
