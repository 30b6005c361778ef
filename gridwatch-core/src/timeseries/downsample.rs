/// Stride-downsample `items` to roughly `max_points` elements.
///
/// Sequences no longer than `max_points` are returned unchanged. Otherwise
/// every `ceil(len / max_points)`-th element is kept starting at index 0, and
/// the last element is appended if the stride skipped it. The result never
/// exceeds `max_points + 1` elements and always keeps the first and last.
/// `max_points == 0` behaves as `1`.
#[must_use]
pub fn downsample<T: Clone>(items: &[T], max_points: usize) -> Vec<T> {
    let max_points = max_points.max(1);
    let n = items.len();
    if n <= max_points {
        return items.to_vec();
    }
    let stride = n.div_ceil(max_points);
    let mut out: Vec<T> = items.iter().step_by(stride).cloned().collect();
    if (n - 1) % stride != 0 {
        if let Some(last) = items.last() {
            out.push(last.clone());
        }
    }
    out
}
