//! Pearson correlation between paired vectors

/// Pearson correlation coefficient of `a` and `b`
///
/// Computed in f64. Returns `None` when either input has (numerically) zero
/// variance, where the coefficient is undefined. A vector counts as flat when
/// its centered sum of squares is at most `f64::EPSILON` times its raw sum of
/// squares, which also catches the ulp-level residue left by averaging.
///
/// Only the first `min(a.len(), b.len())` pairs are used.
pub fn pearson(a: &[f32], b: &[f32]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }

    let mean_a = a[..n].iter().map(|&x| x as f64).sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().map(|&y| y as f64).sum::<f64>() / n as f64;

    let mut cov = 0.0f64;
    let mut var_a = 0.0f64;
    let mut var_b = 0.0f64;
    let mut raw_a = 0.0f64;
    let mut raw_b = 0.0f64;
    for (&x, &y) in a[..n].iter().zip(b[..n].iter()) {
        let (x, y) = (x as f64, y as f64);
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
        raw_a += x * x;
        raw_b += y * y;
    }

    if var_a <= f64::EPSILON * raw_a || var_b <= f64::EPSILON * raw_b {
        return None;
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    Some(r.clamp(-1.0, 1.0))
}
