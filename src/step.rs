pub fn decimal_places(step: f64) -> u32 {
    let repr = format!("{step:e}");
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));

    let fraction_digits = mantissa
        .split_once('.')
        .map(|(_, frac)| frac.len() as i64)
        .unwrap_or(0);
    let exponent: i64 = exponent.parse().unwrap_or(0);

    (fraction_digits - exponent).max(0) as u32
}

/// Fractional steps round to the step's decimal places, not to a multiple.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step < 1.0 {
        let scale = 10f64.powi(decimal_places(step) as i32);
        return (value * scale).round() / scale;
    }

    (value / step).round() * step
}
