//! Dashboard module - Ordered render queue of narrative text and charts

pub mod narrative;
mod surface;

pub use surface::{describe_chart, DisplaySurface, TerminalSurface};

use crate::charts::ChartSpec;
use crate::stats::DatasetSummary;
use narrative::SectionText;
use serde::Serialize;

/// One item on the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", content = "body", rename_all = "snake_case")]
pub enum Block {
    /// Markdown-flavoured text (headings, bold, bullets, emoji).
    Markdown(String),
    Chart(ChartSpec),
}

/// Render queue: blocks are shown in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    blocks: Vec<Block>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, markdown: impl Into<String>) {
        self.blocks.push(Block::Markdown(markdown.into()));
    }

    pub fn chart(&mut self, spec: ChartSpec) {
        self.blocks.push(Block::Chart(spec));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Chart(spec) => Some(spec),
            Block::Markdown(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whole page as markdown; charts become text tables.
    pub fn to_markdown(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Markdown(text) => text.clone(),
                Block::Chart(spec) => describe_chart(spec),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn section(&mut self, text: &SectionText, spec: ChartSpec) {
        self.text(text.heading);
        self.text(text.caption);
        self.chart(spec);
    }
}

/// The five dashboard charts, in page order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub sales_vs_profit: ChartSpec,
    pub category_sales: ChartSpec,
    pub subcategory_margin: ChartSpec,
    pub discount_impact: ChartSpec,
    pub regional_performance: ChartSpec,
}

/// Lay out the page: header, overview, five chart sections, takeaways.
pub fn compose(summary: &DatasetSummary, source: &str, charts: ChartSet) -> Dashboard {
    let mut dashboard = Dashboard::new();
    dashboard.text(narrative::HEADER);
    dashboard.text(narrative::overview(summary, source));

    dashboard.section(&narrative::SALES_VS_PROFIT, charts.sales_vs_profit);
    dashboard.section(&narrative::CATEGORY_SALES, charts.category_sales);
    dashboard.section(&narrative::SUBCATEGORY_MARGIN, charts.subcategory_margin);
    dashboard.section(&narrative::DISCOUNT_IMPACT, charts.discount_impact);
    dashboard.section(&narrative::REGIONAL_PERFORMANCE, charts.regional_performance);

    dashboard.text(narrative::TAKEAWAYS_HEADING);
    dashboard.text(narrative::TAKEAWAYS);
    dashboard
}
