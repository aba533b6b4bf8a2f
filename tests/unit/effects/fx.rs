use super::*;

fn impulse() -> Raster {
    let (w, h) = (9u32, 9u32);
    let mut data = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    data[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    Raster::from_premul_bytes(w, h, data).unwrap()
}

#[test]
fn apply_is_blur_then_attenuate() {
    let src = impulse();
    let fx = LayerFx {
        sigma: 1.0,
        alpha: 0.5,
    };
    let out = fx.apply(&src).unwrap();
    let expected = attenuate(&gaussian_blur(&src, 1.0).unwrap(), 0.5);
    assert_eq!(out, expected);
}

#[test]
fn reversed_order_gives_a_different_raster() {
    let src = impulse();
    let fx = LayerFx {
        sigma: 1.0,
        alpha: 0.5,
    };
    let out = fx.apply(&src).unwrap();
    let reversed = gaussian_blur(&attenuate(&src, 0.5), 1.0).unwrap();
    assert_ne!(out, reversed);

    let sum_a = |r: &Raster| -> u32 { r.data.chunks_exact(4).map(|px| u32::from(px[3])).sum() };
    assert!(sum_a(&out) < sum_a(&reversed));
}

#[test]
fn input_is_not_mutated() {
    let src = impulse();
    let before = src.clone();
    let _ = LayerFx {
        sigma: 3.0,
        alpha: 0.1,
    }
    .apply(&src)
    .unwrap();
    assert_eq!(src, before);
}

#[test]
fn degenerate_parameters_do_not_fail() {
    let src = impulse();
    let out = LayerFx {
        sigma: -1.0,
        alpha: 2.0,
    }
    .apply(&src)
    .unwrap();
    assert_eq!(out, src);
}
