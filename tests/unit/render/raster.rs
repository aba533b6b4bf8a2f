use super::*;

#[test]
fn transparent_raster_is_blank() {
    let r = Raster::transparent(Canvas::new(4, 3)).unwrap();
    assert_eq!(r.data.len(), 48);
    assert!(r.is_blank());
    assert_eq!(r.covered_pixels(), 0);
}

#[test]
fn byte_length_is_checked() {
    assert!(Raster::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(Raster::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn pixel_lookup_is_row_major() {
    let mut data = vec![0u8; 2 * 2 * 4];
    data[(2 + 1) * 4..(2 + 1) * 4 + 4].copy_from_slice(&[1, 2, 3, 4]);
    let r = Raster::from_premul_bytes(2, 2, data).unwrap();
    assert_eq!(r.pixel(1, 1), Some([1, 2, 3, 4]));
    assert_eq!(r.pixel(0, 1), Some([0, 0, 0, 0]));
    assert_eq!(r.pixel(2, 0), None);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let r = Raster::from_premul_bytes(2, 1, vec![0, 80, 80, 80, 10, 20, 30, 255]).unwrap();
    let straight = r.to_straight_rgba8();
    assert_eq!(&straight[0..4], &[0, 255, 255, 80]);
    assert_eq!(&straight[4..8], &[10, 20, 30, 255]);
}

#[test]
fn pixmap_roundtrip_preserves_bytes() {
    let data: Vec<u8> = (0..3 * 2)
        .flat_map(|i| {
            let a = (i * 40) as u8;
            [a / 2, a / 3, a, a]
        })
        .collect();
    let r = Raster::from_premul_bytes(3, 2, data).unwrap();
    let back = Raster::from_pixmap(&r.to_pixmap().unwrap());
    assert_eq!(back, r);
}

#[test]
fn straight_alpha_input_is_premultiplied() {
    let r = Raster::from_straight_rgba8(1, 1, &[255, 255, 255, 128]).unwrap();
    assert_eq!(r.pixel(0, 0), Some([128, 128, 128, 128]));
    assert!(Raster::from_straight_rgba8(2, 1, &[0, 0, 0, 255]).is_err());
}
