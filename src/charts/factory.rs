//! Chart Factory Module
//! Builds the five dashboard charts from the order table and its aggregates.

use super::color::{ColorScale, Rgb};
use super::format::ValueFormat;
use super::spec::{
    Axis, BarDatum, CategoryOrder, ChartKind, ChartSpec, ColorEncoding, LabelPosition, Series,
    SeriesData, ValueLabels,
};
use crate::data::{
    CategoryTotal, RegionalTotal, SalesTable, SubCategoryMargin, CATEGORY, DISCOUNT, PROFIT,
    PROFIT_MARGIN, REGION, SALES, SUB_CATEGORY, TOTAL_PROFIT, TOTAL_SALES,
};
use polars::prelude::PolarsError;

const SI_LABELS: ValueLabels = ValueLabels {
    format: ValueFormat::SiPrefix { significant: 2 },
    position: LabelPosition::Auto,
};

fn points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y).map(|(&x, &y)| [x, y]).collect()
}

/// Constructs declarative chart specifications.
pub struct ChartFactory;

impl ChartFactory {
    /// Sales vs Profit scatter with opacity blending.
    pub fn sales_vs_profit(table: &SalesTable) -> Result<ChartSpec, PolarsError> {
        let sales = table.float_values(SALES)?;
        let profit = table.float_values(PROFIT)?;

        Ok(ChartSpec {
            id: "sales_vs_profit".into(),
            kind: ChartKind::Scatter,
            title: "Sales vs. Profit".into(),
            x: Axis::new(SALES, "Sales (USD)"),
            y: Axis::new(PROFIT, "Profit (USD)"),
            series: vec![Series {
                name: "Orders".into(),
                data: SeriesData::Points(points(&sales, &profit)),
                color: Rgb::PLOTLY_BLUE,
            }],
            color: None,
            value_labels: None,
            opacity: 0.5,
            height: None,
        })
    }

    /// Total Sales per Category with abbreviated value labels.
    pub fn category_sales(totals: &[CategoryTotal]) -> ChartSpec {
        let bars = totals
            .iter()
            .map(|t| BarDatum {
                label: t.category.clone(),
                value: t.sales,
            })
            .collect();

        ChartSpec {
            id: "category_sales".into(),
            kind: ChartKind::Bar,
            title: "Total Sales by Category".into(),
            x: Axis::new(CATEGORY, "Category").with_tick_angle(0.0),
            y: Axis::new(SALES, "Total Sales (USD)"),
            series: vec![Series {
                name: SALES.into(),
                data: SeriesData::Bars(bars),
                color: Rgb::SKY_BLUE,
            }],
            color: None,
            value_labels: Some(SI_LABELS),
            opacity: 1.0,
            height: None,
        }
    }

    /// Mean margin per Sub-Category as horizontal bars, smallest at the bottom.
    pub fn subcategory_margin(margins: &[SubCategoryMargin]) -> ChartSpec {
        let bars = margins
            .iter()
            .map(|m| BarDatum {
                label: m.sub_category.clone(),
                value: m.margin,
            })
            .collect();

        ChartSpec {
            id: "subcategory_margin".into(),
            kind: ChartKind::HorizontalBar,
            title: "Average Profit Margin by Sub-Category".into(),
            x: Axis::new(PROFIT_MARGIN, "Profit Margin"),
            y: Axis::new(SUB_CATEGORY, "Sub-Category")
                .with_category_order(CategoryOrder::TotalAscending),
            series: vec![Series {
                name: PROFIT_MARGIN.into(),
                data: SeriesData::Bars(bars),
                color: Rgb::LIGHT_GREEN,
            }],
            color: None,
            value_labels: Some(ValueLabels {
                format: ValueFormat::Percent { decimals: 2 },
                position: LabelPosition::Outside,
            }),
            opacity: 1.0,
            height: Some(750.0),
        }
    }

    /// Discount vs Sales scatter coloured by Profit on a red-blue scale.
    pub fn discount_impact(table: &SalesTable) -> Result<ChartSpec, PolarsError> {
        let discount = table.float_values(DISCOUNT)?;
        let sales = table.float_values(SALES)?;
        let profit = table.float_values(PROFIT)?;

        Ok(ChartSpec {
            id: "discount_impact".into(),
            kind: ChartKind::Scatter,
            title: "Impact of Discount on Sales and Profit".into(),
            x: Axis::new(DISCOUNT, "Discount"),
            y: Axis::new(SALES, "Sales (USD)"),
            series: vec![Series {
                name: "Orders".into(),
                data: SeriesData::Points(points(&discount, &sales)),
                color: Rgb::PLOTLY_BLUE,
            }],
            color: Some(ColorEncoding {
                field: PROFIT.into(),
                label: "Profit (USD)".into(),
                scale: ColorScale::RdBu,
                values: profit,
            }),
            value_labels: None,
            opacity: 0.55,
            height: None,
        })
    }

    /// Region grouped bars: Total Sales next to Total Profit.
    pub fn regional_performance(regions: &[RegionalTotal]) -> ChartSpec {
        let series_of = |name: &str, color: Rgb, value: fn(&RegionalTotal) -> f64| Series {
            name: name.into(),
            data: SeriesData::Bars(
                regions
                    .iter()
                    .map(|r| BarDatum {
                        label: r.region.clone(),
                        value: value(r),
                    })
                    .collect(),
            ),
            color,
        };

        ChartSpec {
            id: "regional_performance".into(),
            kind: ChartKind::GroupedBar,
            title: "Sales vs Profit by Region".into(),
            x: Axis::new(REGION, "Region"),
            y: Axis::new("value", "value"),
            series: vec![
                series_of(TOTAL_SALES, Rgb::PLOTLY_BLUE, |r| r.total_sales),
                series_of(TOTAL_PROFIT, Rgb::PLOTLY_RED, |r| r.total_profit),
            ],
            color: None,
            value_labels: Some(SI_LABELS),
            opacity: 1.0,
            height: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_table, Aggregator};

    #[test]
    fn scatter_carries_one_point_per_row() {
        let table = sample_table();
        let spec = ChartFactory::sales_vs_profit(&table).unwrap();
        assert_eq!(spec.kind, ChartKind::Scatter);
        assert_eq!(spec.opacity, 0.5);
        assert_eq!(spec.mark_count(), table.height());
        assert_eq!(
            spec.series[0].data,
            SeriesData::Points(vec![
                [100.0, 20.0],
                [200.0, -10.0],
                [50.0, 5.0],
                [25.0, 12.5],
                [300.0, 30.0],
                [10.0, -4.0],
            ])
        );
    }

    #[test]
    fn category_bar_uses_si_labels() {
        let totals = vec![
            CategoryTotal {
                category: "Furniture".into(),
                sales: 741_999.8,
            },
            CategoryTotal {
                category: "Technology".into(),
                sales: 836_154.0,
            },
        ];
        let spec = ChartFactory::category_sales(&totals);
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.series[0].color, Rgb::SKY_BLUE);
        assert_eq!(spec.x.tick_angle, Some(0.0));
        assert_eq!(spec.format_value(836_154.0).as_deref(), Some("840k"));
        assert_eq!(spec.category_labels(), vec!["Furniture", "Technology"]);
    }

    #[test]
    fn margin_chart_displays_ascending_from_descending_table() {
        let table = sample_table();
        let margins = Aggregator::subcategory_margins(&table).unwrap();
        assert!(margins.windows(2).all(|w| w[0].margin >= w[1].margin));

        let spec = ChartFactory::subcategory_margin(&margins);
        assert_eq!(spec.kind, ChartKind::HorizontalBar);
        assert_eq!(spec.height, Some(750.0));
        assert_eq!(
            spec.value_labels.map(|l| l.position),
            Some(LabelPosition::Outside)
        );

        let shown: Vec<f64> = spec
            .ordered_bars(&spec.series[0])
            .into_iter()
            .map(|(_, bar)| bar.value)
            .collect();
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(spec.category_labels().first().map(String::as_str), Some("Binders"));
        assert_eq!(spec.category_labels().last().map(String::as_str), Some("Paper"));
        assert_eq!(spec.format_value(-0.05).as_deref(), Some("-5.00%"));
    }

    #[test]
    fn discount_scatter_is_colored_by_profit() {
        let table = sample_table();
        let spec = ChartFactory::discount_impact(&table).unwrap();
        let color = spec.color.as_ref().unwrap();
        assert_eq!(color.field, PROFIT);
        assert_eq!(color.scale, ColorScale::RdBu);
        assert_eq!(color.values.len(), table.height());
        assert_eq!(color.domain(), (-10.0, 30.0));
        assert_eq!(spec.opacity, 0.55);
        assert_eq!(spec.x.field, DISCOUNT);
    }

    #[test]
    fn regional_chart_has_two_series() {
        let table = sample_table();
        let regions = Aggregator::regional_totals(&table).unwrap();
        let spec = ChartFactory::regional_performance(&regions);
        assert_eq!(spec.kind, ChartKind::GroupedBar);
        let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![TOTAL_SALES, TOTAL_PROFIT]);
        assert_eq!(spec.series[0].data.len(), regions.len());
        assert_eq!(spec.series[1].data.len(), regions.len());
        assert_eq!(spec.category_labels(), vec!["Central", "East", "South", "West"]);
    }
}
