//! Age vs BMI comparison chart.

use ratatui::{
    layout::Rect,
    style::Modifier,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::domain::PopulationChart;
use crate::tui::styles::HealthTheme;

/// Horizontal line across the age axis at a given BMI.
fn band_edge(chart: &PopulationChart, bmi: f64) -> [(f64, f64); 2] {
    [(chart.age_bounds[0], bmi), (chart.age_bounds[1], bmi)]
}

/// Title naming the caller's band and where they sit in the sample.
fn chart_title(chart: &PopulationChart) -> String {
    let band = chart.band().map_or("outside the shaded bands", |b| b.name);
    format!(
        " Age vs BMI │ You: {}, BMI above {:.0}% of sample ",
        band,
        chart.share_below() * 100.0
    )
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::styled(format!("{v:.0}"), HealthTheme::text_muted()))
        .collect()
}

/// Render the caller against the reference population.
pub fn render_population_chart(f: &mut Frame, area: Rect, chart: &PopulationChart) {
    let edges: Vec<[(f64, f64); 2]> = chart
        .bands
        .iter()
        .map(|band| band_edge(chart, band.lower))
        .collect();
    let you = [chart.you];

    let mut datasets: Vec<Dataset> = chart
        .bands
        .iter()
        .zip(edges.iter())
        .enumerate()
        .map(|(i, (band, edge))| {
            Dataset::default()
                .name(band.name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(HealthTheme::bmi_band(i))
                .data(edge)
        })
        .collect();

    datasets.push(
        Dataset::default()
            .name("Population")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(HealthTheme::info())
            .data(&chart.population),
    );
    datasets.push(
        Dataset::default()
            .name("You")
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(HealthTheme::danger().add_modifier(Modifier::BOLD))
            .data(&you),
    );

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(chart_title(chart), HealthTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(HealthTheme::border()),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Age", HealthTheme::text_secondary()))
                .style(HealthTheme::border())
                .bounds(chart.age_bounds)
                .labels(axis_labels(chart.age_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("BMI", HealthTheme::text_secondary()))
                .style(HealthTheme::border())
                .bounds(chart.bmi_bounds)
                .labels(axis_labels(chart.bmi_bounds)),
        );

    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HealthMetrics;

    #[test]
    fn test_band_edge_spans_age_axis() {
        let chart = PopulationChart::for_metrics(&HealthMetrics::sample());
        assert_eq!(band_edge(&chart, 25.0), [(18.0, 25.0), (100.0, 25.0)]);
    }

    #[test]
    fn test_title_names_band_and_share() {
        let chart = PopulationChart::for_metrics(&HealthMetrics::sample());
        assert_eq!(
            chart_title(&chart),
            " Age vs BMI │ You: Overweight, BMI above 33% of sample "
        );

        let gap = PopulationChart::for_metrics(&HealthMetrics {
            bmi: 17.0,
            ..HealthMetrics::sample()
        });
        assert_eq!(
            chart_title(&gap),
            " Age vs BMI │ You: outside the shaded bands, BMI above 0% of sample "
        );
    }

    #[test]
    fn test_axis_labels() {
        let labels = axis_labels([10.0, 50.0]);
        let text: Vec<&str> = labels.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["10", "30", "50"]);
    }
}
