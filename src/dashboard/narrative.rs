//! Fixed narrative text shown around the charts.

use crate::charts::{format_percent, format_thousands, format_usd};
use crate::stats::DatasetSummary;

pub const HEADER: &str = "# 📦 Superstore Sales Dashboard";

/// One chart section: heading and caption printed above the chart.
pub struct SectionText {
    pub heading: &'static str,
    pub caption: &'static str,
}

pub const SALES_VS_PROFIT: SectionText = SectionText {
    heading: "## 1️⃣ Sales vs Profit",
    caption: "Shows whether high-revenue orders always generate high profit (spoiler: they don’t).",
};

pub const CATEGORY_SALES: SectionText = SectionText {
    heading: "## 2️⃣ Total Sales by Category",
    caption: "Technology edges out Office Supplies; Furniture trails in overall revenue.",
};

pub const SUBCATEGORY_MARGIN: SectionText = SectionText {
    heading: "## 3️⃣ Profit Margin by Sub-Category",
    caption: "Highlights winners (Copiers) and losers (Tables) in profitability.",
};

pub const DISCOUNT_IMPACT: SectionText = SectionText {
    heading: "## 4️⃣ Discount Impact",
    caption: "Blue = high profit, red = losses. Steep discounts (>50 %) often destroy margin.",
};

pub const REGIONAL_PERFORMANCE: SectionText = SectionText {
    heading: "## 5️⃣ Sales & Profit by Region",
    caption: "West leads in both sales and profit; Central is the weakest region.",
};

pub const TAKEAWAYS_HEADING: &str = "### ✅ Key Takeaways";

pub const TAKEAWAYS: &str = "\
* **Technology** drives revenue *and* margin; **Furniture Tables** are a drag.
* Deep discounts erode profit, especially on large orders.
* The **West** region is the profit engine; Central needs attention.
* Seasonal peaks suggest Q4 promotions and inventory planning.";

/// Dataset overview block built from the loaded table.
pub fn overview(summary: &DatasetSummary, source: &str) -> String {
    format!(
        "**Dataset:** {rows} orders loaded from `{source}`.\n\
         **Totals:** {sales} in sales and {profit} in profit; {loss:.1}% of order lines lose money.\n\
         **Margins:** the average order line keeps {margin} of its sales as profit.\n\
         **Key fields:**\n\
         * *Sales* & *Profit* (USD), median order {median}, mean {mean}, 95th percentile {p95}\n\
         * *Discount* ({dmin:.1} – {dmax:.1})\n\
         * Hierarchies: Category ▸ Sub-Category ▸ Product ({cats} categories, {subs} sub-categories)\n\
         * Customer *Segment* ({segs}) & geographic *Region* ({regions})",
        rows = format_thousands(summary.rows as u64),
        sales = format_usd(summary.total_sales),
        profit = format_usd(summary.total_profit),
        loss = summary.loss_share * 100.0,
        margin = format_percent(summary.mean_margin, 1),
        median = format_usd(summary.median_sales),
        mean = format_usd(summary.mean_sales),
        p95 = format_usd(summary.p95_sales),
        dmin = summary.discount_min,
        dmax = summary.discount_max,
        cats = summary.categories,
        subs = summary.sub_categories,
        segs = summary.segments,
        regions = summary.regions,
    )
}
