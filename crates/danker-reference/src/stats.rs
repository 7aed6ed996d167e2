//! Agreement statistics between two rank vectors

use ndarray::Array1;

/// Pearson correlation coefficient of two equally long samples.
///
/// Returns `None` for fewer than two values or when either sample is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let x = Array1::from(x.to_vec());
    let y = Array1::from(y.to_vec());

    let dx = &x - x.mean()?;
    let dy = &y - y.mean()?;
    let denominator = (dx.dot(&dx) * dy.dot(&dy)).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some(dx.dot(&dy) / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_linear_relation_is_one() {
        let mut rng = rand::thread_rng();
        let x: Vec<f64> = (0..50).map(|_| rng.gen_range(0.0..10.0)).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);

        let neg: Vec<f64> = x.iter().map(|v| -v).collect();
        assert!((pearson(&x, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 1.0], &[2.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[2.0]), None);
    }
}
