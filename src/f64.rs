use std::cmp::Ordering;

// Callers reject non-finite inputs before these are reached.

pub fn min_f64(x: f64, y: f64) -> f64 {
    match cmp_f64(x, y) {
        Ordering::Less | Ordering::Equal => x,
        Ordering::Greater => y,
    }
}

pub fn max_f64(x: f64, y: f64) -> f64 {
    match cmp_f64(x, y) {
        Ordering::Less => y,
        Ordering::Greater | Ordering::Equal => x,
    }
}

/// Total order on `f64`, used wherever point values are sorted.
pub fn cmp_f64(x: f64, y: f64) -> Ordering {
    x.total_cmp(&y)
}
