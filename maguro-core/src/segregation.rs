//! Segregation and homophily measures over a mixing matrix.
//!
//! All three measures treat a zero denominator as a data condition, not a
//! failure: the result is NaN and flows through enclosing comparisons, so a
//! sweep across many group pairs still completes. Structural misuse (wrong
//! group count, out-of-range group) errors instead.

use crate::{
    error::{MaguroError, Result},
    mixing::MixingMatrix,
};

#[expect(
    clippy::cast_precision_loss,
    reason = "dyad counts stay far below 2^52 at analyzable sizes"
)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator as f64
}

/// Newman's assortativity coefficient over group densities.
///
/// Pair densities `m_gh1 / m_gh+` are normalized into a mixing-proportion
/// table; the coefficient is `(sum e_gg - sum a_g b_g) / (1 - sum a_g b_g)` with
/// `a`/`b` the marginal row and column sums (equal for undirected
/// matrices). The maximum is exactly 1, reached when every tie is
/// within-group; the minimum depends on the marginals and has no fixed
/// lower bound. Any group pair with zero dyads makes the result NaN, as
/// does a matrix with no ties at all.
#[must_use]
pub fn assortativity(matrix: &MixingMatrix) -> f64 {
    let group_count = matrix.group_count();
    let mut density = vec![0.0_f64; group_count * group_count];
    if matrix.is_directed() {
        for ego in 0..group_count {
            for alter in 0..group_count {
                density[ego * group_count + alter] =
                    ratio(matrix.ties(ego, alter), matrix.dyads(ego, alter));
            }
        }
    } else {
        for ego in 0..group_count {
            for alter in ego..group_count {
                // Unordered dyads of the pair split across the two cells.
                let (ties, dyads) = if ego == alter {
                    (matrix.ties(ego, ego), matrix.dyads(ego, ego))
                } else {
                    (
                        matrix.ties(ego, alter) + matrix.ties(alter, ego),
                        matrix.dyads(ego, alter) + matrix.dyads(alter, ego),
                    )
                };
                let value = ratio(ties, dyads);
                density[ego * group_count + alter] = value;
                density[alter * group_count + ego] = value;
            }
        }
    }

    let total: f64 = density.iter().sum();
    if !total.is_finite() || total == 0.0 {
        return f64::NAN;
    }
    let mut off_diagonal = 0.0_f64;
    for ego in 0..group_count {
        for alter in 0..group_count {
            if ego != alter {
                off_diagonal += density[ego * group_count + alter];
            }
        }
    }
    if off_diagonal == 0.0 {
        return 1.0;
    }

    let proportions: Vec<f64> = density.iter().map(|value| value / total).collect();
    let trace: f64 = (0..group_count)
        .map(|group| proportions[group * group_count + group])
        .sum();
    let marginal_product: f64 = (0..group_count)
        .map(|group| {
            let row: f64 = (0..group_count)
                .map(|alter| proportions[group * group_count + alter])
                .sum();
            let column: f64 = (0..group_count)
                .map(|ego| proportions[ego * group_count + group])
                .sum();
            row * column
        })
        .sum();

    (trace - marginal_product) / (1.0 - marginal_product)
}

/// Freeman's segregation index for a two-group mixing matrix.
///
/// With `p` the observed share of ties running between the groups and `pi`
/// the share of dyads that cross groups, the index is `1 - p/pi`: 1 when no
/// tie crosses, 0 when ties cross exactly at chance rate. The result is
/// NaN when the matrix has no ties or no between-group dyads.
///
/// # Errors
/// Returns [`MaguroError::GroupCountNotTwo`] unless the matrix has exactly
/// two groups.
pub fn freeman_index(matrix: &MixingMatrix) -> Result<f64> {
    if matrix.group_count() != 2 {
        return Err(MaguroError::GroupCountNotTwo {
            got: matrix.group_count(),
        });
    }
    let between_ties = matrix.ties(0, 1) + matrix.ties(1, 0);
    let between_dyads = matrix.dyads(0, 1) + matrix.dyads(1, 0);
    if between_dyads == 0 || matrix.total_ties() == 0 {
        return Ok(f64::NAN);
    }
    let observed = ratio(between_ties, matrix.total_ties());
    let chance = ratio(between_dyads, matrix.total_dyads());
    Ok(1.0 - observed / chance)
}

/// Coleman's homophily index for one group.
///
/// `p_g` is the share of the group's tie endpoints that stay within the
/// group (out-ties for directed matrices); `w_g = (n_g - 1)/(n - 1)` is the
/// chance expectation. Above-chance homophily scales the excess by the
/// remaining headroom, `(p_g - w_g)/(1 - w_g)`; below-chance scales the
/// deficit by the expectation itself, `(p_g - w_g)/w_g`, so the index spans
/// `[-1, 1]` and is 0 exactly at chance. A group that emits no ties yields
/// NaN.
///
/// # Errors
/// Returns [`MaguroError::GroupOutOfRange`] for an invalid group index.
pub fn coleman_index(matrix: &MixingMatrix, group: usize) -> Result<f64> {
    let group_count = matrix.group_count();
    if group >= group_count {
        return Err(MaguroError::GroupOutOfRange {
            group,
            group_count,
        });
    }

    let node_count: usize = matrix.sizes().iter().sum();
    let group_size = matrix.sizes()[group];
    let expectation = ratio(
        u64::try_from(group_size.saturating_sub(1)).unwrap_or(0),
        u64::try_from(node_count.saturating_sub(1)).unwrap_or(0),
    );

    let (within, emitted) = if matrix.is_directed() {
        let row: u64 = (0..group_count).map(|alter| matrix.ties(group, alter)).sum();
        (matrix.ties(group, group), row)
    } else {
        let within_endpoints = 2 * matrix.ties(group, group);
        let between: u64 = (0..group_count)
            .filter(|&other| other != group)
            .map(|other| matrix.ties(group, other) + matrix.ties(other, group))
            .sum();
        (within_endpoints, within_endpoints + between)
    };
    let observed = ratio(within, emitted);

    let index = if observed >= expectation {
        (observed - expectation) / (1.0 - expectation)
    } else {
        (observed - expectation) / expectation
    };
    Ok(index)
}
