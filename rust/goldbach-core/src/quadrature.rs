//! Adaptive Gauss-Kronrod (G7/K15) quadrature on an explicit worklist.
//!
//! The interval with the largest error estimate is bisected until the summed
//! error estimate meets max(abs_tol, rel_tol·|I|) or the subdivision budget
//! runs out. No recursion, so the budget is a hard bound on work.

use crate::config::QuadratureConfig;

/// Kronrod abscissae on [-1, 1]; odd indices are the Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// 15-point Kronrod weights.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// 7-point Gauss weights, matching XGK[1], XGK[3], XGK[5], XGK[7].
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// A converged integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub error_estimate: f64,
    pub subdivisions: usize,
}

/// Why integration stopped without meeting the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureFailure {
    /// Best value reached; never to be used as a result.
    pub value: f64,
    pub error_estimate: f64,
    pub tolerance: f64,
    pub subdivisions: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// One G7/K15 rule application on [a, b].
fn kronrod_15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Segment {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    }
}

/// Integrate `f` over [a, b].
///
/// The rule never evaluates `f` at the endpoints. An empty interval
/// integrates to zero without calling `f`.
pub fn integrate<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    config: &QuadratureConfig,
) -> Result<Quadrature, QuadratureFailure> {
    if a == b {
        return Ok(Quadrature {
            value: 0.0,
            error_estimate: 0.0,
            subdivisions: 0,
        });
    }

    let first = kronrod_15(&f, a, b);
    let mut total = first.value;
    let mut error = first.error;
    let mut worklist = vec![first];
    let mut subdivisions = 0usize;

    loop {
        let tolerance = config.abs_tol.max(config.rel_tol * total.abs());
        if error <= tolerance {
            // Re-sum from the segments so rounding in the running total
            // never leaks into the result.
            let value = worklist.iter().map(|s| s.value).sum();
            log::trace!("quadrature converged after {} subdivisions", subdivisions);
            return Ok(Quadrature {
                value,
                error_estimate: error,
                subdivisions,
            });
        }
        if subdivisions >= config.max_subdivisions || !error.is_finite() {
            return Err(QuadratureFailure {
                value: total,
                error_estimate: error,
                tolerance,
                subdivisions,
            });
        }

        let worst = worklist
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let segment = worklist.swap_remove(worst);
        let mid = 0.5 * (segment.a + segment.b);
        let left = kronrod_15(&f, segment.a, mid);
        let right = kronrod_15(&f, mid, segment.b);

        total += left.value + right.value - segment.value;
        error += left.error + right.error - segment.error;
        worklist.push(left);
        worklist.push(right);
        subdivisions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight() -> QuadratureConfig {
        QuadratureConfig {
            rel_tol: 1e-12,
            abs_tol: 0.0,
            max_subdivisions: 500,
        }
    }

    #[test]
    fn test_polynomial_exact() {
        // K15 integrates degree-22 polynomials exactly.
        let q = integrate(|x| 3.0 * x * x + 1.0, 0.0, 2.0, &tight()).unwrap();
        assert!((q.value - 10.0).abs() < 1e-12);
        assert_eq!(q.subdivisions, 0);
    }

    #[test]
    fn test_smooth_functions() {
        let q = integrate(f64::sin, 0.0, std::f64::consts::PI, &tight()).unwrap();
        assert!((q.value - 2.0).abs() < 1e-12);

        let q = integrate(|x| 1.0 / x, 1.0, 1000.0, &tight()).unwrap();
        assert!((q.value - 1000f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn test_needs_subdivision() {
        // Sharp peak at 0.3; a single rule application cannot resolve it.
        let f = |x: f64| 1.0 / ((x - 0.3) * (x - 0.3) + 1e-4);
        let exact = 100.0 * ((70.0f64).atan() + (30.0f64).atan());
        let q = integrate(f, 0.0, 1.0, &tight()).unwrap();
        assert!(q.subdivisions > 0);
        assert!((q.value - exact).abs() < 1e-8 * exact, "{} vs {}", q.value, exact);
    }

    #[test]
    fn test_empty_interval() {
        let q = integrate(|_| panic!("must not evaluate"), 2.0, 2.0, &tight()).unwrap();
        assert_eq!(q.value, 0.0);
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        let config = QuadratureConfig {
            rel_tol: 0.0,
            abs_tol: 0.0,
            max_subdivisions: 10,
        };
        let f = |x: f64| 1.0 / ((x - 0.3) * (x - 0.3) + 1e-4);
        let failure = integrate(f, 0.0, 1.0, &config).unwrap_err();
        assert_eq!(failure.subdivisions, 10);
        assert!(failure.error_estimate > failure.tolerance);
    }
}
