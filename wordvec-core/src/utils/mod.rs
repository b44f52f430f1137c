pub mod stop_words;

///
/// Sum a sequence of floats with Neumaier's compensated summation.
///
/// Keeps a running correction term so that adding many small values to a
/// large partial sum does not lose their contribution to rounding.
///
/// Once the running sum overflows, the non-finite sum is returned as is;
/// the correction term would otherwise turn it into NaN.
///
pub fn fsum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;

    for value in values {
        let t = sum + value;
        if !t.is_finite() {
            return t;
        }
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }

    sum + compensation
}
