//! Parameter overrides by environment variables.
//!
//! Each `HAZAN_*` variable, if set and parsed, replaces the corresponding parameter
//! and is logged at info level.

use num_traits::{Float, Num};
use hazan_core::solver::SolverParam;
use crate::GeneralParam;

/// Reads a number from an environment variable.
///
/// Returns `Some` if the variable `e` is set and parsed as a decimal number.
pub fn num_by_env<N: Num + std::fmt::Display>(e: &str) -> Option<N>
{
    if let Some(v) = std::env::var(e).ok()
                     .and_then(|s| {N::from_str_radix(s.trim(), 10).ok()}) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

/// Overrides [`SolverParam`] by
/// `HAZAN_EPS_ZERO`, `HAZAN_EPS_EIG`, `HAZAN_EPS_SYM`, `HAZAN_MAX_ITER_EIG`,
/// `HAZAN_LANCZOS_NCV`, `HAZAN_LANCZOS_MIN_DIM`, `HAZAN_SEED` and `HAZAN_LOG_PERIOD`.
pub fn set_par_by_env<F: Float + std::fmt::Display>(p: &mut SolverParam<F>)
{
    p.eps_zero = num_by_env("HAZAN_EPS_ZERO").unwrap_or(p.eps_zero);
    p.eps_eig = num_by_env("HAZAN_EPS_EIG").unwrap_or(p.eps_eig);
    p.eps_sym = num_by_env("HAZAN_EPS_SYM").unwrap_or(p.eps_sym);
    p.max_iter_eig = num_by_env("HAZAN_MAX_ITER_EIG").unwrap_or(p.max_iter_eig);
    p.lanczos_ncv = num_by_env("HAZAN_LANCZOS_NCV").unwrap_or(p.lanczos_ncv);
    p.lanczos_min_dim = num_by_env("HAZAN_LANCZOS_MIN_DIM").unwrap_or(p.lanczos_min_dim);
    p.seed = num_by_env("HAZAN_SEED").unwrap_or(p.seed);
    p.log_period = num_by_env("HAZAN_LOG_PERIOD").unwrap_or(p.log_period);
}

/// Overrides [`GeneralParam`] by
/// `HAZAN_MAX_ITER`, `HAZAN_TRACE_INIT` and `HAZAN_CURVATURE`,
/// then its solver parameters by [`set_par_by_env`].
pub fn set_general_par_by_env<F: Float + std::fmt::Display>(p: &mut GeneralParam<F>)
{
    p.max_iter = num_by_env("HAZAN_MAX_ITER").unwrap_or(p.max_iter);
    p.trace_init = num_by_env("HAZAN_TRACE_INIT").unwrap_or(p.trace_init);
    p.curvature = num_by_env("HAZAN_CURVATURE").or(p.curvature);

    set_par_by_env(&mut p.solver);
}

//

#[test]
fn test_num_by_env1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    std::env::set_var("HAZAN_TEST_NUM_BY_ENV", " 42 ");
    assert_eq!(num_by_env::<usize>("HAZAN_TEST_NUM_BY_ENV"), Some(42));
    assert_eq!(num_by_env::<f64>("HAZAN_TEST_NUM_BY_ENV"), Some(42.));

    std::env::set_var("HAZAN_TEST_NUM_BY_ENV", "x");
    assert_eq!(num_by_env::<usize>("HAZAN_TEST_NUM_BY_ENV"), None);

    assert_eq!(num_by_env::<usize>("HAZAN_TEST_NUM_BY_ENV_UNSET"), None);
}
