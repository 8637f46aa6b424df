//! Visualization choices and the chart shapes they produce
//!
//! The set of visualizations is closed. Adding one means adding a
//! `Visualization` variant and its arm in [`render`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::aggregate::{
    count_by_category, hierarchical_breakdown, total_by_category, weekly_trend,
    Breakdown, CategoryCount, WeekPoint,
};
use crate::data::{ComplaintTable, Field};
use crate::error::NciError;
use crate::filter::FilteredView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visualization {
    BarByType,
    PieByType,
    SunburstBoroughType,
    WeeklyTrend,
    TopBoroughsOverall,
}

impl Visualization {
    /// Selector order
    pub const ALL: [Visualization; 5] = [
        Visualization::BarByType,
        Visualization::PieByType,
        Visualization::SunburstBoroughType,
        Visualization::WeeklyTrend,
        Visualization::TopBoroughsOverall,
    ];

    /// Stable identifier used in URLs and on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Visualization::BarByType => "bar-by-type",
            Visualization::PieByType => "pie-by-type",
            Visualization::SunburstBoroughType => "sunburst-borough-type",
            Visualization::WeeklyTrend => "weekly-trend",
            Visualization::TopBoroughsOverall => "top-boroughs-overall",
        }
    }

    /// Label shown in the visualization selector
    pub fn label(self) -> &'static str {
        match self {
            Visualization::BarByType => "Bar Chart",
            Visualization::PieByType => "Pie Chart",
            Visualization::SunburstBoroughType => "Sunburst Chart",
            Visualization::WeeklyTrend => "Complaint Trend Over Time",
            Visualization::TopBoroughsOverall => "Top Boroughs (Overall)",
        }
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Visualization {
    type Err = NciError;

    /// Accepts either the slug or the selector label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Visualization::ALL.iter()
            .copied()
            .find(|v| v.slug().eq_ignore_ascii_case(s) || v.label() == s)
            .ok_or_else(|| NciError::UnsupportedVisualization(s.to_string()))
    }
}

/// A chart ready for the browser-side charting library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedChart {
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        bars: Vec<CategoryCount>,
    },
    Pie {
        title: String,
        slices: Vec<CategoryCount>,
    },
    Sunburst {
        title: String,
        root: Breakdown,
    },
    Line {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<WeekPoint>,
    },
}

impl RenderedChart {
    pub fn title(&self) -> &str {
        match self {
            RenderedChart::Bar { title, .. }
            | RenderedChart::Pie { title, .. }
            | RenderedChart::Sunburst { title, .. }
            | RenderedChart::Line { title, .. } => title,
        }
    }

    /// Nothing to draw; the UI shows an empty state instead
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedChart::Bar { bars, .. } => bars.is_empty(),
            RenderedChart::Pie { slices, .. } => slices.is_empty(),
            RenderedChart::Sunburst { root, .. } => root.children.is_empty(),
            RenderedChart::Line { points, .. } => points.is_empty(),
        }
    }
}

const COMPLAINT_COUNT_LABEL: &str = "Number of Complaints";

/// Build the chart for `viz` from the current selection (and, for
/// overall views, the full table).
pub fn render(viz: Visualization, view: &FilteredView<'_>, table: &ComplaintTable) -> RenderedChart {
    match viz {
        Visualization::BarByType => RenderedChart::Bar {
            title: "Complaint Types Distribution".to_string(),
            x_label: Field::ComplaintType.label().to_string(),
            y_label: COMPLAINT_COUNT_LABEL.to_string(),
            bars: count_by_category(view, Field::ComplaintType).sorted(),
        },
        Visualization::PieByType => RenderedChart::Pie {
            title: "Complaint Types Distribution".to_string(),
            slices: count_by_category(view, Field::ComplaintType).sorted(),
        },
        Visualization::SunburstBoroughType => RenderedChart::Sunburst {
            title: "Complaint Breakdown: Borough ➔ Complaint Type".to_string(),
            root: hierarchical_breakdown(view, Field::Borough, Field::ComplaintType),
        },
        Visualization::WeeklyTrend => RenderedChart::Line {
            title: "Complaint Trend Over Time (Weekly Aggregated)".to_string(),
            x_label: "Date".to_string(),
            y_label: COMPLAINT_COUNT_LABEL.to_string(),
            points: weekly_trend(view),
        },
        Visualization::TopBoroughsOverall => RenderedChart::Bar {
            title: "Top Boroughs by Total Complaint Volume".to_string(),
            x_label: Field::Borough.label().to_string(),
            y_label: "Count".to_string(),
            bars: total_by_category(table, Field::Borough).sorted(),
        },
    }
}
