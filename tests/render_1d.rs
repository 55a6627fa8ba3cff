use sasplot::models::retain_plottable;
use sasplot::scene::{Circle, Group, Node, Rgb};
use sasplot::viz::util::y_extent;
use sasplot::viz::{self, PlotOptions1D, SeriesStyle};
use sasplot::{PlotError, Sample, Surface};

fn raw_samples() -> Vec<Sample> {
    vec![
        Sample::new(1.0, 10.0, 1.0),
        Sample::new(2.0, 20.0, 3.0),
        Sample::new(3.0, -5.0, 1.0),
        Sample::new(4.0, 30.0, 31.0),
    ]
}

fn group<'a>(root: &'a Node, class: &str) -> &'a Group {
    root.as_group()
        .and_then(|g| g.find(class))
        .unwrap_or_else(|| panic!("no group with class {class}"))
}

fn count<F: Fn(&Node) -> bool>(g: &Group, pred: F) -> usize {
    g.children.iter().filter(|&c| pred(c)).count()
}

#[test]
fn filter_and_vertical_extent_match_worked_example() {
    let kept = retain_plottable(&raw_samples());
    assert_eq!(
        kept,
        vec![Sample::new(1.0, 10.0, 1.0), Sample::new(2.0, 20.0, 3.0)]
    );
    assert_eq!(y_extent(&kept), Some((9.0, 23.0)));
}

#[test]
fn one_glyph_and_three_bar_segments_per_retained_sample() {
    let mut surface = Surface::new();
    let chart =
        viz::render_1d(&mut surface, &raw_samples(), "plot_anchor", &PlotOptions1D::default())
            .unwrap();
    let scene = chart.scene();
    let points = group(&scene, "points");
    let bars = group(&scene, "error-bars");
    assert_eq!(count(points, |n| matches!(n, Node::Circle(_))), 2);
    assert_eq!(count(bars, |n| matches!(n, Node::Line(_))), 6);
}

#[test]
fn vertical_domain_is_niced_error_extent() {
    let chart = viz::build_1d(&raw_samples(), &PlotOptions1D::default()).unwrap();
    let (lo, hi) = chart.y_scale().domain();
    assert!(lo <= 9.0 && hi >= 23.0);
    assert_eq!((lo, hi), (8.0, 24.0));
    // Pixel range runs from the bottom of the plot area to the top.
    assert_eq!(chart.y_scale().range(), (150.0, 0.0));
}

#[test]
fn error_bar_forms_an_i_beam() {
    let opts = PlotOptions1D {
        marker_size: 3.0,
        ..Default::default()
    };
    let chart = viz::build_1d(&[Sample::new(2.0, 20.0, 3.0), Sample::new(3.0, 10.0, 1.0)], &opts)
        .unwrap();
    let (x, y) = (chart.x_scale(), chart.y_scale());
    let scene = chart.scene();
    let bars = group(&scene, "error-bars");
    let lines: Vec<_> = bars
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Line(l) => Some(l),
            _ => None,
        })
        .take(3)
        .collect();
    let cx = x.map(2.0);
    let (top, bottom) = (y.map(23.0), y.map(17.0));

    assert_eq!((lines[0].x1, lines[0].x2), (cx, cx));
    assert_eq!((lines[0].y1, lines[0].y2), (bottom, top));
    assert_eq!(lines[0].stroke.dash, Some((2.0, 2.0)));
    assert_eq!((lines[1].x1, lines[1].x2), (cx - 3.0, cx + 3.0));
    assert_eq!((lines[1].y1, lines[1].y2), (top, top));
    assert_eq!((lines[2].y1, lines[2].y2), (bottom, bottom));
    assert_eq!(lines[1].stroke.width, 1.5);
}

#[test]
fn grid_lines_only_when_requested() {
    let samples = raw_samples();
    let plain = viz::build_1d(&samples, &PlotOptions1D::default()).unwrap();
    assert!(plain.scene().as_group().unwrap().find("grid").is_none());

    let opts = PlotOptions1D {
        grid: true,
        ..Default::default()
    };
    let gridded = viz::build_1d(&samples, &opts).unwrap();
    let scene = gridded.scene();
    assert!(scene.as_group().unwrap().find("grid").is_some());
}

#[test]
fn log_scale_maps_decades_evenly() {
    let samples = vec![
        Sample::new(0.01, 1000.0, 10.0),
        Sample::new(0.02, 100.0, 5.0),
        Sample::new(0.03, 10.0, 1.0),
    ];
    let opts = PlotOptions1D {
        log_scale: true,
        ..Default::default()
    };
    let chart = viz::build_1d(&samples, &opts).unwrap();
    let y = chart.y_scale();
    let step_a = y.map(10.0) - y.map(100.0);
    let step_b = y.map(100.0) - y.map(1000.0);
    assert!((step_a - step_b).abs() < 1e-9);
}

#[test]
fn hover_tracks_nearest_sample_and_hides_outside() {
    let mut surface = Surface::new();
    let chart =
        viz::render_1d(&mut surface, &raw_samples(), "plot_anchor", &PlotOptions1D::default())
            .unwrap();
    assert!(!chart.hover().unwrap().focus().visible);

    let px = chart.x_scale().map(1.3);
    let hit = chart.pointer_move(px, 10.0).unwrap();
    assert_eq!(hit, Sample::new(1.0, 10.0, 1.0));
    let focus = chart.hover().unwrap().focus().clone();
    assert!(focus.visible);
    assert_eq!(focus.label, "1, 10 \u{00B1} 1");
    assert_eq!(
        focus.position,
        (chart.x_scale().map(1.0), chart.y_scale().map(10.0))
    );

    let px = chart.x_scale().map(1.8);
    assert_eq!(chart.pointer_move(px, 10.0), Some(Sample::new(2.0, 20.0, 3.0)));

    assert_eq!(chart.pointer_move(-5.0, 10.0), None);
    assert!(!chart.hover().unwrap().focus().visible);

    chart.pointer_enter();
    assert!(chart.hover().unwrap().focus().visible);
    chart.pointer_leave();
    let scene = chart.scene();
    assert!(group(&scene, "focus").hidden);
}

#[test]
fn nearest_lookup_breaks_ties_to_the_right() {
    let mut chart = viz::build_1d(&raw_samples(), &PlotOptions1D::default()).unwrap();
    assert_eq!(chart.probe(1.5), Some(Sample::new(2.0, 20.0, 3.0)));
    assert_eq!(chart.probe(1.49), Some(Sample::new(1.0, 10.0, 1.0)));
}

#[test]
fn rerender_replaces_chart_on_same_anchor() {
    let mut surface = Surface::new();
    let opts = PlotOptions1D::default();
    viz::render_1d(&mut surface, &raw_samples(), "a", &opts).unwrap();
    let second: Vec<Sample> = (1..=5)
        .map(|i| Sample::new(i as f64, 10.0 * i as f64, 1.0))
        .collect();
    viz::render_1d(&mut surface, &second, "a", &opts).unwrap();

    assert_eq!(surface.len(), 1);
    let scene = surface.get("a").unwrap().scene();
    let points = group(&scene, "points");
    assert_eq!(count(points, |n| matches!(n, Node::Circle(_))), 5);

    viz::render_1d(&mut surface, &second, "b", &opts).unwrap();
    assert_eq!(surface.anchors().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn all_filtered_out_is_no_data_and_clears_anchor() {
    let mut surface = Surface::new();
    let opts = PlotOptions1D::default();
    viz::render_1d(&mut surface, &raw_samples(), "a", &opts).unwrap();
    let bad = vec![Sample::new(1.0, -1.0, 0.1), Sample::new(2.0, 1.0, 2.0)];
    let err = viz::render_1d(&mut surface, &bad, "a", &opts).unwrap_err();
    assert_eq!(err, PlotError::NoData);
    assert!(surface.get("a").is_none());
}

#[test]
fn single_sample_gets_a_padded_domain() {
    let chart = viz::build_1d(&[Sample::new(0.5, 3.0, 0.5)], &PlotOptions1D::default()).unwrap();
    let (lo, hi) = chart.x_scale().domain();
    assert!(lo < 0.5 && hi > 0.5);
}

#[test]
fn log_q_axis_rejects_non_positive_q() {
    let opts = PlotOptions1D {
        x_log_scale: true,
        ..Default::default()
    };
    let chart = viz::build_1d(&raw_samples(), &opts).unwrap();
    assert!(chart.x_scale().domain().0 > 0.0);
    let with_zero = vec![Sample::new(0.0, 5.0, 1.0), Sample::new(1.0, 4.0, 1.0)];
    assert!(matches!(
        viz::build_1d(&with_zero, &opts),
        Err(PlotError::NonPositiveLogDomain { .. })
    ));
}

#[test]
fn overlaid_series_share_axes_and_keep_their_styles() {
    let first = raw_samples();
    let second = vec![Sample::new(5.0, 50.0, 2.0), Sample::new(6.0, 40.0, 1.0)];
    let red = SeriesStyle {
        color: "#d62728".into(),
        marker_size: 4.0,
    };
    let series = [
        (first.as_slice(), SeriesStyle::default()),
        (second.as_slice(), red),
    ];
    let mut surface = Surface::new();
    let chart =
        viz::render_1d_layers(&mut surface, &series, "overlay", &PlotOptions1D::default()).unwrap();

    let (x_lo, x_hi) = chart.x_scale().domain();
    assert!(x_lo <= 1.0 && x_hi >= 6.0);
    assert!(chart.y_scale().domain().1 >= 52.0);

    let scene = chart.scene();
    let plot = group(&scene, "plot");
    let point_groups: Vec<&Group> = plot
        .children
        .iter()
        .filter_map(Node::as_group)
        .filter(|g| g.class.as_deref() == Some("points"))
        .collect();
    assert_eq!(point_groups.len(), 2);
    let circles = |g: &Group| -> Vec<Circle> {
        g.children
            .iter()
            .filter_map(|n| match n {
                Node::Circle(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    };
    let (a, b) = (circles(point_groups[0]), circles(point_groups[1]));
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);
    assert!(a.iter().all(|c| c.fill == Rgb::new(0x00, 0x77, 0xcc) && c.r == 2.0));
    assert!(b.iter().all(|c| c.fill == Rgb::new(0xd6, 0x27, 0x28) && c.r == 4.0));

    // Hover searches every series.
    assert_eq!(chart.probe(5.8), Some(Sample::new(6.0, 40.0, 1.0)));
    assert_eq!(chart.probe(1.1), Some(Sample::new(1.0, 10.0, 1.0)));
}

#[test]
fn overlay_rejects_bad_series_style() {
    let samples = raw_samples();
    let bad = SeriesStyle {
        color: "nope".into(),
        ..Default::default()
    };
    let err = viz::build_1d_layers(&[(samples.as_slice(), bad)], &PlotOptions1D::default())
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidOption { name: "color", .. }));
}
