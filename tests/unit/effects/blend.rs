use super::*;

fn sample() -> Raster {
    Raster::from_premul_bytes(2, 1, vec![0, 200, 200, 200, 255, 255, 255, 255]).unwrap()
}

#[test]
fn opacity_byte_clamps() {
    assert_eq!(opacity_byte(1.0), 255);
    assert_eq!(opacity_byte(1.7), 255);
    assert_eq!(opacity_byte(0.5), 127);
    assert_eq!(opacity_byte(0.0), 0);
    assert_eq!(opacity_byte(-3.0), 0);
    assert_eq!(opacity_byte(f32::INFINITY), 255);
    assert_eq!(opacity_byte(f32::NAN), 0);
}

#[test]
fn alpha_above_one_is_identity() {
    let src = sample();
    assert_eq!(attenuate(&src, 1.0), src);
    assert_eq!(attenuate(&src, 4.0), src);
}

#[test]
fn alpha_zero_clears_coverage() {
    assert!(attenuate(&sample(), 0.0).is_blank());
}

#[test]
fn half_alpha_halves_premultiplied_channels() {
    let src = sample();
    let out = attenuate(&src, 0.5);
    assert_eq!(out.pixel(0, 0), Some([0, 100, 100, 100]));
    assert_eq!(out.pixel(1, 0), Some([127, 127, 127, 127]));
    assert_eq!(src, sample());
}
