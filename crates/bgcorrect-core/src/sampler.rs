use crate::image::GrayImageView;

/// Half-width of the default sampling window (a 4×4 window).
pub const DEFAULT_BORDER: u32 = 2;

/// Pixel indices covered by the window `[center-b, center+b-1]` along an axis
/// of `len` pixels, each paired with how many window positions map onto it.
///
/// Positions before the axis fold onto pixel 0 and positions past its end
/// onto the last pixel, so at most `len + 2` taps are produced whatever `b` is.
fn axis_taps(center: usize, b: i64, len: usize) -> Vec<(usize, f64)> {
    let last = len as i64 - 1;
    let lo = center as i64 - b;
    let hi = center as i64 + b - 1;

    let mut taps = Vec::new();
    let before = (hi.min(-1) - lo + 1).max(0);
    if before > 0 {
        taps.push((0, before as f64));
    }
    let (inner_lo, inner_hi) = (lo.max(0), hi.min(last));
    if inner_lo <= inner_hi {
        taps.extend((inner_lo..=inner_hi).map(|i| (i as usize, 1.0)));
    }
    let after = (hi - lo.max(last + 1) + 1).max(0);
    if after > 0 {
        taps.push((last as usize, after as f64));
    }
    taps
}

/// Mean intensity of the `2*border × 2*border` window
/// `[x-border, x+border-1] × [y-border, y+border-1]`.
///
/// Window pixels falling outside the image are clamped to the nearest edge
/// pixel, so every call averages exactly `(2*border)^2` values. A `border`
/// of 0 is treated as 1. The cost grows with the part of the window that
/// overlaps the image, not with `border` itself.
pub fn sample_mean(image: &GrayImageView<'_>, x: usize, y: usize, border: u32) -> f32 {
    let b = border.max(1) as i64;
    let xs = axis_taps(x, b, image.width);
    let ys = axis_taps(y, b, image.height);

    let mut sum = 0.0f64;
    for &(py, wy) in &ys {
        let row: f64 = xs
            .iter()
            .map(|&(px, wx)| wx * image.get(px, py) as f64)
            .sum();
        sum += wy * row;
    }
    let side = (2 * b) as f64;
    (sum / (side * side)) as f32
}
