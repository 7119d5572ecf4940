//! Rectangle copies between RGBA buffers.

use image::RgbaImage;

/// Copy a `size` rectangle from `src` at `src_xy` into `dst` at `dst_xy`.
///
/// Source pixels, alpha included, replace the destination pixels; nothing is
/// composited. The rectangle is clipped to both buffers.
pub fn copy_rect(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    dst_xy: (u32, u32),
    src_xy: (u32, u32),
    size: (u32, u32),
) {
    let (dw, dh) = dst.dimensions();
    let (sw, sh) = src.dimensions();
    let w = size
        .0
        .min(dw.saturating_sub(dst_xy.0))
        .min(sw.saturating_sub(src_xy.0));
    let h = size
        .1
        .min(dh.saturating_sub(dst_xy.1))
        .min(sh.saturating_sub(src_xy.1));

    for y in 0..h {
        for x in 0..w {
            let s = *src.get_pixel(src_xy.0 + x, src_xy.1 + y);
            dst.put_pixel(dst_xy.0 + x, dst_xy.1 + y, s);
        }
    }
}
