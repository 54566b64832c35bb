use super::*;

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[test]
fn flatten_premul_over_white() {
    let src = [0u8, 0, 0, 0, 64, 0, 0, 128, 10, 20, 30, 255];
    let mut dst = [0u8; 12];
    flatten_to_opaque_rgba8(&mut dst, &src, InkColor::WHITE).unwrap();
    assert_eq!(&dst[0..4], &[255, 255, 255, 255]);
    assert_eq!(&dst[4..8], &[191, 127, 127, 255]);
    assert_eq!(&dst[8..12], &[10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], InkColor::WHITE).is_err());
}

#[test]
fn encode_png_round_trips_pixels() {
    let rgba = [1u8, 2, 3, 255, 4, 5, 6, 255];
    let png = encode_png(&rgba, 2, 1).unwrap();
    assert_eq!(decode(&png).into_raw(), rgba.to_vec());
    assert!(encode_png(&rgba, 3, 1).is_err());
}

#[test]
fn rasterizes_view_box_at_scale_over_white() {
    let svg = r##"<svg viewBox="0 0 20 10" xmlns="http://www.w3.org/2000/svg" style="width:100%;height:auto;">
  <g fill="#161311" stroke="none">
    <path d="M0 0 L10 0 L10 10 L0 10 Z" fill-rule="evenodd"/>
  </g>
</svg>"##;
    let img = decode(&rasterize_png(svg, EXPORT_SCALE).unwrap());
    assert_eq!(img.dimensions(), (60, 30));
    assert_eq!(img.get_pixel(10, 10).0, [0x16, 0x13, 0x11, 255]);
    assert_eq!(img.get_pixel(50, 10).0, [255, 255, 255, 255]);
}

#[test]
fn bad_svg_is_a_render_error() {
    assert!(matches!(
        rasterize_png("not svg", 1.0),
        Err(SignError::Render(_))
    ));
    assert!(matches!(
        rasterize_png("<svg/>", 0.0),
        Err(SignError::Validation(_))
    ));
}
