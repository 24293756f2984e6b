//! End-to-end scenarios for the bar series cascade: configuration writes,
//! axis staleness notifications, layout, and scene reconciliation.

#![allow(clippy::unwrap_used)]

use barscene::prelude::*;

/// Chart fixture wired the way a real container would be: the staleness
/// notification re-derives both axis scales, and the fixture records what
/// it was told for assertions.
struct FixtureChart {
    x: Option<CategoryAxis>,
    y: Option<ValueAxis>,
    pending: bool,
    resolve_on_update: bool,
    last_categories: Vec<String>,
    last_value_domain: Option<(f32, f32)>,
}

impl FixtureChart {
    fn new() -> Self {
        Self {
            x: None,
            y: None,
            pending: false,
            resolve_on_update: true,
            last_categories: Vec::new(),
            last_value_domain: None,
        }
    }

    fn resolve(&mut self) {
        let mut band = BandScale::new();
        band.set_domain(self.last_categories.clone());
        band.set_range(0.0, 400.0);
        band.set_padding(0.2);
        self.x = Some(CategoryAxis { scale: band });

        let (min, max) = self.last_value_domain.unwrap_or((0.0, 1.0));
        let mut linear = LinearScale::default();
        linear.set_domain(min, max);
        linear.set_range(300.0, 0.0);
        self.y = Some(ValueAxis { scale: linear });
    }
}

impl ChartHost for FixtureChart {
    fn x_axis(&self) -> Option<&CategoryAxis> {
        self.x.as_ref()
    }

    fn y_axis(&self) -> Option<&ValueAxis> {
        self.y.as_ref()
    }

    fn is_layout_pending(&self) -> bool {
        self.pending
    }

    fn update_axes(&mut self, categories: &[String], value_domain: (f32, f32)) {
        self.last_categories = categories.to_vec();
        self.last_value_domain = Some(value_domain);
        if self.resolve_on_update {
            self.resolve();
        }
    }
}

fn month_rows(months: &[(&str, f32, f32)]) -> Vec<Datum> {
    months
        .iter()
        .map(|(month, a, b)| Datum::new().with("month", *month).with("a", *a).with("b", *b))
        .collect()
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn mounted_series(
    chart: &mut FixtureChart,
) -> BarSeries<RetainedScene> {
    let mut series = BarSeries::new(RetainedScene::new());
    let rows = month_rows(&[("Jan", 5.0, -3.0), ("Feb", -2.0, 4.0)]);
    series
        .set_data_and_fields(rows, "month", fields(&["a", "b"]), chart)
        .expect("valid fixture rows");
    series
}

#[test]
fn mount_via_separate_setters_renders_once_ready() {
    let mut chart = FixtureChart::new();
    let mut series = BarSeries::new(RetainedScene::new());

    // Field configuration alone has nothing to render.
    series.set_category_field("month", &mut chart).unwrap();
    series.set_value_fields(fields(&["a", "b"]), &mut chart).unwrap();
    assert!(series.scene().is_empty());
    assert!(series.processed().is_none());

    // Data completes the configuration and the whole cascade runs.
    let rows = month_rows(&[("Jan", 5.0, -3.0), ("Feb", -2.0, 4.0)]);
    series.set_data(rows, &mut chart).unwrap();
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar).len(), 4);
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Label).len(), 4);
}

#[test]
fn stacked_extents_drive_the_axis_notification() {
    let mut chart = FixtureChart::new();
    let _series = mounted_series(&mut chart);

    assert_eq!(chart.last_categories, ["Jan", "Feb"]);
    // Jan dominates both directions: neg_sum -3, pos_sum 5.
    assert_eq!(chart.last_value_domain, Some((-3.0, 5.0)));
}

#[test]
fn grouped_extents_drive_the_axis_notification() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    series.set_grouped(true, &mut chart).unwrap();

    assert_eq!(chart.last_value_domain, Some((-3.0, 5.0)));

    // All-positive grouped data still pins the baseline at zero.
    let rows = month_rows(&[("Jan", 300.0, 200.0), ("Feb", 100.0, 150.0)]);
    series.set_data(rows, &mut chart).unwrap();
    assert_eq!(chart.last_value_domain, Some((0.0, 300.0)));
}

#[test]
fn data_growth_creates_only_the_missing_pairs() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    let surviving = series.scene().nodes_by_tag(NodeTag::Bar);

    let rows = month_rows(&[("Jan", 5.0, -3.0), ("Feb", -2.0, 4.0), ("Mar", 1.0, 1.0)]);
    series.set_data(rows, &mut chart).unwrap();

    let bars = series.scene().nodes_by_tag(NodeTag::Bar);
    assert_eq!(bars.len(), 6);
    // The four retained nodes kept their identity; only two bars entered.
    assert_eq!(&bars[..4], &surviving[..]);
}

#[test]
fn data_shrink_removes_only_the_surplus_pairs() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    let surviving = series.scene().nodes_by_tag(NodeTag::Bar);

    let rows = month_rows(&[("Jan", 5.0, -3.0)]);
    series.set_data(rows, &mut chart).unwrap();

    let bars = series.scene().nodes_by_tag(NodeTag::Bar);
    assert_eq!(bars.len(), 2);
    assert_eq!(&bars[..], &surviving[..2]);
    assert_eq!(series.scene().node_count(), 4);
}

#[test]
fn unchanged_data_is_a_no_op_diff() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    let bars_before = series.scene().nodes_by_tag(NodeTag::Bar);
    let first_rect = series.scene().rect(bars_before[0]).unwrap().clone();

    let rows = month_rows(&[("Jan", 5.0, -3.0), ("Feb", -2.0, 4.0)]);
    series.set_data(rows, &mut chart).unwrap();

    let bars_after = series.scene().nodes_by_tag(NodeTag::Bar);
    assert_eq!(bars_before, bars_after);
    assert_eq!(series.scene().rect(bars_after[0]).unwrap(), &first_rect);
}

#[test]
fn processing_error_keeps_the_previous_render_until_fixed() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    let bars_before = series.scene().nodes_by_tag(NodeTag::Bar);

    let bad = vec![Datum::new().with("month", "Mar").with("a", "lots").with("b", 1.0)];
    let err = series.set_data(bad, &mut chart).expect_err("non-numeric value");
    assert!(matches!(err, Error::InvalidValueField { ref field, .. } if field == "a"));
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar), bars_before);
    assert_eq!(series.category_domain(), ["Jan", "Feb"]);

    // Fixing the data renders again through the normal cascade.
    let fixed = month_rows(&[("Mar", 7.0, 2.0)]);
    series.set_data(fixed, &mut chart).unwrap();
    assert_eq!(series.category_domain(), ["Mar"]);
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar).len(), 2);
}

#[test]
fn atomic_replacement_never_reads_stale_fields() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);

    // New rows share no fields with the old configuration.
    let rows = vec![
        Datum::new().with("region", "North").with("sales", 12.0),
        Datum::new().with("region", "South").with("sales", 8.0),
    ];
    series
        .set_data_and_fields(rows, "region", fields(&["sales"]), &mut chart)
        .expect("atomic swap");

    assert_eq!(series.category_domain(), ["North", "South"]);
    assert_eq!(chart.last_value_domain, Some((0.0, 12.0)));
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar).len(), 2);
}

#[test]
fn layout_waits_for_resolved_axes() {
    let mut chart = FixtureChart::new();
    chart.resolve_on_update = false;

    let mut series = BarSeries::new(RetainedScene::new());
    let rows = month_rows(&[("Jan", 5.0, -3.0)]);
    series
        .set_data_and_fields(rows, "month", fields(&["a", "b"]), &mut chart)
        .unwrap();

    // Domains were computed and announced, but nothing rendered yet.
    assert_eq!(chart.last_value_domain, Some((-3.0, 5.0)));
    assert!(series.scene().is_empty());

    // Once the chart resolves its axes it re-invokes layout.
    chart.resolve();
    series.update(&chart);
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar).len(), 2);
}

#[test]
fn layout_waits_out_a_pending_chart() {
    let mut chart = FixtureChart::new();
    chart.pending = true;

    let mut series = mounted_series(&mut chart);
    assert!(series.scene().is_empty());

    chart.pending = false;
    series.update(&chart);
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar).len(), 4);
}

#[test]
fn labels_hide_but_survive_when_names_are_cleared() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);

    series.set_value_field_names(fields(&["Alpha", "Beta"]), &chart);
    let labels = series.scene().nodes_by_tag(NodeTag::Label);
    assert!(series.scene().text(labels[0]).unwrap().visible);
    assert_eq!(series.scene().text(labels[1]).unwrap().text, "Beta");

    series.set_value_field_names(Vec::new(), &chart);
    let labels_after = series.scene().nodes_by_tag(NodeTag::Label);
    assert_eq!(labels, labels_after);
    assert!(!series.scene().text(labels_after[0]).unwrap().visible);
}

#[test]
fn custom_palette_recolors_in_place() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    let bars = series.scene().nodes_by_tag(NodeTag::Bar);

    let palette = vec![Rgba::rgb(1, 2, 3), Rgba::rgb(4, 5, 6)];
    series.set_palette(palette.clone(), &chart);

    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar), bars);
    assert_eq!(series.scene().rect(bars[0]).unwrap().fill, palette[0]);
    assert_eq!(series.scene().rect(bars[1]).unwrap().fill, palette[1]);
    // Third bar wraps around the two-color palette.
    assert_eq!(series.scene().rect(bars[2]).unwrap().fill, palette[0]);
}

#[test]
fn empty_data_clears_nothing_and_reports_nothing() {
    let mut chart = FixtureChart::new();
    let mut series = mounted_series(&mut chart);
    let domain_before = chart.last_value_domain;

    series.set_data(Vec::new(), &mut chart).expect("not ready is not an error");

    // Not-ready: previous render and previous notification both stand.
    assert_eq!(series.scene().nodes_by_tag(NodeTag::Bar).len(), 4);
    assert_eq!(chart.last_value_domain, domain_before);
}
