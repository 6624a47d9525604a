use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(100, 128), 50);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn premultiply_matches_rounded_product() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0,
        ]
    );
}

#[test]
fn unpremultiply_restores_opaque_and_half_alpha() {
    let mut px = vec![10u8, 20, 30, 255, 64, 0, 32, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[128, 0, 64, 128]);
}

#[test]
fn over_respects_source_alpha() {
    let dst = [0, 0, 255, 255];
    assert_eq!(premul_over(dst, [255, 0, 0, 255]), [255, 0, 0, 255]);
    assert_eq!(premul_over(dst, [0, 0, 0, 0]), dst);
    assert_eq!(premul_over(dst, [128, 0, 0, 128]), [128, 0, 127, 255]);
}
