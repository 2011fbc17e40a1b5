//weighted rollup: sum of weight * value over all entries
//weights are caller-supplied and are not normalized here, so the result is
//a weighted sum, not a weighted mean
pub fn weighted_sum<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    pairs
        .into_iter()
        .map(|(weight, value)| weight * value)
        .sum()
}
