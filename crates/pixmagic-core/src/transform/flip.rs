//! Mirror an image horizontally, vertically or both.
//!
//! Each reflection copies whole rows or columns into a fresh destination of the
//! same size. Copies overwrite, so transparent source pixels land in the
//! result exactly as they were.

use image::RgbaImage;

use super::canvas::copy_rect;
use crate::types::FlipAxis;

/// Return the mirrored copy of `image`.
///
/// `FlipAxis::Both` is a horizontal reflection followed by a vertical one on
/// the already-reflected result.
pub fn flip(image: &RgbaImage, axis: FlipAxis) -> RgbaImage {
    match axis {
        FlipAxis::Horizontal => flip_columns(image),
        FlipAxis::Vertical => flip_rows(image),
        FlipAxis::Both => flip_rows(&flip_columns(image)),
    }
}

/// Source row `i` goes to destination row `height - i - 1`.
fn flip_rows(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut dest = RgbaImage::new(width, height);
    for i in 0..height {
        copy_rect(
            &mut dest,
            image,
            (0, height - i - 1),
            (0, i),
            (width, 1),
        );
    }
    dest
}

/// Source column `i` goes to destination column `width - i - 1`.
fn flip_columns(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut dest = RgbaImage::new(width, height);
    for i in 0..width {
        copy_rect(
            &mut dest,
            image,
            (width - i - 1, 0),
            (i, 0),
            (1, height),
        );
    }
    dest
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = RgbaImage> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |data| RgbaImage::from_raw(w, h, data).unwrap())
        })
    }

    proptest! {
        /// Property: flipping twice on the same axis restores the image exactly.
        #[test]
        fn prop_flip_is_involution(img in image_strategy(), axis in prop_oneof![
            Just(FlipAxis::Horizontal),
            Just(FlipAxis::Vertical),
            Just(FlipAxis::Both),
        ]) {
            let twice = flip(&flip(&img, axis), axis);
            prop_assert_eq!(twice, img);
        }

        /// Property: a flip matches the image crate's own reflection.
        #[test]
        fn prop_flip_matches_imageops(img in image_strategy()) {
            prop_assert_eq!(flip(&img, FlipAxis::Horizontal), image::imageops::flip_horizontal(&img));
            prop_assert_eq!(flip(&img, FlipAxis::Vertical), image::imageops::flip_vertical(&img));
        }
    }
}
