//! Conversion between the externally reported score and the multiplicative
//! trustworthiness unit used by the aggregation.

/// Trustworthiness at or below this value has no meaningful score.
pub const MIN_TRUSTWORTHINESS: f64 = 0.8;

/// Offset parameter "k" of the conversion curve.
pub const TRUSTWORTHINESS_OFFSET: f64 = 60.0;

/// Maps a trustworthiness value to a score in `[0, 1]`.
///
/// Anything at or below [`MIN_TRUSTWORTHINESS`] yields exactly `0.0`.
pub fn score_from_trustworthiness(trustworthiness: f64) -> f64 {
    let t = trustworthiness;
    let k = TRUSTWORTHINESS_OFFSET;

    // The closed form lands a few ulps above zero at the floor itself.
    if t <= MIN_TRUSTWORTHINESS {
        return 0.0;
    }

    (1.0 - k.powf(1.0 - (1.0 - t) / 0.2)) / (1.0 - k)
}

/// Inverse of [`score_from_trustworthiness`] over `score` in `[0, 1]`.
pub fn trustworthiness_from_score(score: f64) -> f64 {
    let k = TRUSTWORTHINESS_OFFSET;
    let min = MIN_TRUSTWORTHINESS;

    1.0 - (1.0 - min) * (1.0 - (1.0 + (k - 1.0) * score).ln() / k.ln())
}
