//! 1x1 copy

use crate::surface::{Region, RegionMut};

/// Copy `src` row by row into `dst`
pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    for y in 0..src.height() {
        dst.row_mut(y).copy_from_slice(src.row(y));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{buffer, run};
    use super::super::FilterKind;
    use crate::graphics::PixelFormat;
    use crate::surface::PixelBuffer;

    #[test]
    fn test_direct_is_identity() {
        let pixels: Vec<u16> = (0..12).map(|i| (i * 0x1111) as u16).collect();
        let src = buffer(4, 3, &pixels);
        let dst = run(FilterKind::Direct, &src);
        assert_eq!(dst.to_packed(), pixels);
    }

    #[test]
    fn test_direct_honors_source_pitch() {
        let mut src = PixelBuffer::with_pitch(2, 2, 10, PixelFormat::Rgb565).unwrap();
        src.pixels_mut().fill(0xAAAA);
        src.set(0, 0, 1);
        src.set(1, 0, 2);
        src.set(0, 1, 3);
        src.set(1, 1, 4);
        let dst = run(FilterKind::Direct, &src);
        assert_eq!(dst.to_packed(), vec![1, 2, 3, 4]);
    }
}
