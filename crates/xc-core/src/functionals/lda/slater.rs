use super::LdaPartials;
use crate::common::constants::LDA_X_FACTOR;
use crate::numerics::spin::exchange_scaling;

/// Slater exchange, `e = -LDA_X_FACTOR g(zeta) / rs`.
pub fn slater_partials(rs: f64, zeta: f64, polarized: bool) -> LdaPartials {
    let [g, dg, d2g] = if polarized {
        exchange_scaling(zeta)
    } else {
        [1.0, 0.0, 0.0]
    };
    let a = LDA_X_FACTOR / rs;

    LdaPartials {
        energy: -a * g,
        drs: a * g / rs,
        d2rs2: -2.0 * a * g / (rs * rs),
        dzeta: -a * dg,
        d2rszeta: a * dg / rs,
        d2zeta2: -a * d2g,
    }
}
