use super::*;

#[test]
fn snapshot_exposes_samples_in_order() {
    let snap = CrossingSnapshot::from_samples(vec![1.0, 2.5, -3.0]);
    assert_eq!(snap.len(), 3);
    assert!(!snap.is_empty());
    assert_eq!(snap.values(), &[1.0, 2.5, -3.0]);
}

#[test]
fn empty_snapshot_renders_blank() {
    let config = CrossPlotConfig::default();
    let raster = render_crossing(&config, &CrossingSnapshot::from_samples(vec![])).unwrap();
    assert_eq!(raster.size(), config.diagram_size);
    assert!(raster.is_blank());
}

#[test]
fn points_land_at_fixed_steps_in_the_crossing_color() {
    let config = CrossPlotConfig::default();
    let snap = CrossingSnapshot::from_samples(vec![100.0, 150.0, 120.0]);
    let raster = render_crossing(&config, &snap).unwrap();

    // Diagram (0, 100) maps to pixel (100, 400); (100, 120) maps to (200, 380).
    for (x, y) in [(100, 400), (200, 380)] {
        let px = raster.pixel(x, y).unwrap();
        assert_eq!(px[3], 255, "pixel ({x},{y}) = {px:?}");
        assert!(px[0] > 250 && px[1] < 100 && px[2] < 10);
    }
    assert_eq!(raster.pixel(400, 100).unwrap()[3], 0);
}
