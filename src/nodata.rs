/// Replaces every element equal to `sentinel` with NaN, returning how many were replaced.
///
/// A NaN sentinel matches nothing.
pub fn mask_value_as_nan(values: &mut [f64], sentinel: f64) -> usize {
    let mut masked = 0;
    for value in values.iter_mut().filter(|v| **v == sentinel) {
        *value = f64::NAN;
        masked += 1;
    }
    masked
}
