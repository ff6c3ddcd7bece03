//! Line chart widget for a date-indexed table.
//!
//! One braille line per column. The x axis is the row index, labelled with
//! the first, middle and last dates. Missing cells are skipped.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget},
};
use returnlab_core::PriceTable;

use crate::plotter::PlotOptions;
use crate::theme::Theme;

pub struct LineChart<'a> {
    table: &'a PriceTable,
    options: &'a PlotOptions,
    theme: &'a Theme,
}

impl<'a> LineChart<'a> {
    pub fn new(table: &'a PriceTable, options: &'a PlotOptions, theme: &'a Theme) -> Self {
        Self {
            table,
            options,
            theme,
        }
    }
}

/// (x, y) points per column, skipping missing cells.
pub fn series_points(table: &PriceTable) -> Vec<Vec<(f64, f64)>> {
    table
        .columns()
        .iter()
        .map(|c| {
            c.values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i as f64, v)))
                .collect()
        })
        .collect()
}

/// Y axis bounds with 5% padding; flat or empty data gets a usable range.
pub fn y_bounds(points: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let (min_y, max_y) = points
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });

    if !min_y.is_finite() || !max_y.is_finite() {
        return [0.0, 1.0];
    }

    let range = max_y - min_y;
    if range == 0.0 {
        // widen flat ranges
        let adjust = if min_y == 0.0 { 1.0 } else { min_y.abs() * 0.1 };
        return [min_y - adjust, max_y + adjust];
    }

    let pad = range * 0.05;
    [min_y - pad, max_y + pad]
}

fn format_value(value: f64, span: f64) -> String {
    if span < 1.0 {
        format!("{value:.3}")
    } else {
        format!("{value:.2}")
    }
}

fn date_labels(table: &PriceTable) -> Vec<String> {
    let dates = table.dates();
    match dates.len() {
        0 => Vec::new(),
        1 => vec![dates[0].to_string()],
        2 => vec![dates[0].to_string(), dates[1].to_string()],
        n => vec![
            dates[0].to_string(),
            dates[(n - 1) / 2].to_string(),
            dates[n - 1].to_string(),
        ],
    }
}

impl<'a> Widget for LineChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let points = series_points(self.table);
        let [y_lower, y_upper] = y_bounds(&points);
        let y_mid = (y_lower + y_upper) / 2.0;
        let span = y_upper - y_lower;
        let x_max = self.table.len().saturating_sub(1).max(1) as f64;

        let datasets: Vec<Dataset> = self
            .table
            .columns()
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(i, (column, data))| {
                Dataset::default()
                    .name(column.symbol.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.series_color(i)))
                    .data(data)
            })
            .collect();

        let x_labels: Vec<Span> = date_labels(self.table)
            .into_iter()
            .map(|l| Span::styled(l, self.theme.axis_style()))
            .collect();
        let y_labels = vec![
            Span::styled(format_value(y_lower, span), self.theme.axis_style()),
            Span::styled(format_value(y_mid, span), self.theme.axis_style()),
            Span::styled(format_value(y_upper, span), self.theme.axis_style()),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(
                        format!(" {} ", self.options.title),
                        self.theme.title_style(),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .style(Style::default().bg(self.theme.background)),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        self.options.xlabel.clone(),
                        self.theme.caption_style(),
                    ))
                    .style(self.theme.axis_style())
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        self.options.ylabel.clone(),
                        self.theme.caption_style(),
                    ))
                    .style(self.theme.axis_style())
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}
