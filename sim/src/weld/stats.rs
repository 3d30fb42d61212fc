//! Population statistics over sample fields.

pub(super) fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, n) = values.fold((0.0f32, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}

/// Returns (mean, variance).
pub(super) fn mean_variance<I>(values: I) -> (f32, f32)
where
    I: Iterator<Item = f32> + Clone,
{
    let m = mean(values.clone());
    let (sq, n) = values.fold((0.0f32, 0usize), |(s, n), v| {
        let d = v - m;
        (s + d * d, n + 1)
    });
    if n == 0 {
        (0.0, 0.0)
    } else {
        (m, sq / n as f32)
    }
}
