use super::*;
use crate::data::dataset::RawDataset;

fn setup() -> (CrossPlotConfig, NormalizedDataset) {
    let config = CrossPlotConfig::default();
    let data = RawDataset::builtin()
        .normalize(config.columns, config.scale)
        .unwrap();
    (config, data)
}

#[test]
fn diagram_transform_puts_origin_bottom_left() {
    let (config, _) = setup();
    let t = diagram_transform(&config);
    assert_eq!(t * Point::new(0.0, 0.0), Point::new(100.0, 500.0));
    assert_eq!(t * Point::new(15.0, 500.0), Point::new(115.0, 0.0));
}

#[test]
fn rotation_only_shifts_sampled_rows() {
    let (_, data) = setup();
    let n = data.len();
    let p0 = layer_points(&data, FrameIndex(0), 0, 4);
    let p1 = layer_points(&data, FrameIndex(1), 0, 4);
    assert_eq!(p0.len(), n);
    for i in 0..n {
        assert_eq!(p1[i].x, p0[i].x);
        assert_eq!(p1[i].y, p0[(i + 1) % n].y);
    }
}

#[test]
fn crossing_sample_matches_plotted_point() {
    let (config, data) = setup();
    let layer = render_layer(&config, &data, FrameIndex(3), 2, 17).unwrap();
    assert_eq!(layer.crossing_sample, data.sample(25, 3, 2, 17));
    let points = layer_points(&data, FrameIndex(3), 2, 17);
    assert_eq!(f64::from(layer.crossing_sample), points[25].y);
}

#[test]
fn layer_raster_has_diagram_size_and_content() {
    let (config, data) = setup();
    let layer = render_layer(&config, &data, FrameIndex(0), 0, 0).unwrap();
    assert_eq!(layer.raster.size(), config.diagram_size);
    assert!(layer.raster.covered_pixels() > 1000);
}

#[test]
fn only_the_top_layer_uses_the_highlight_color() {
    let (config, data) = setup();
    let base = render_layer(&config, &data, FrameIndex(0), 0, 0).unwrap();
    assert!(base.raster.data.chunks_exact(4).all(|px| px[0] == 0));

    let top = render_layer(&config, &data, FrameIndex(0), config.highlight_layer(), 0).unwrap();
    assert!(top.raster.data.chunks_exact(4).any(|px| px[0] > 200));
}

#[test]
fn out_of_range_position_is_rejected() {
    let (mut config, data) = setup();
    config.position = data.len();
    assert!(matches!(
        render_layer(&config, &data, FrameIndex(0), 0, 0),
        Err(CrossPlotError::Validation(_))
    ));
}
