use float_eq::assert_float_eq;
use hazan::prelude::*;
use hazan::*;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type AProbGeneral = ProbGeneral<La>;
type AGeneralSolver = GeneralSolver<La>;

// Tr(E_ii X) <= upper and -Tr(E_ii X) <= -lower for each diagonal
fn diag_bands(dim: usize, bands: &[(f64, f64)]) -> (Vec<AMatBuild>, Vec<f64>)
{
    let mut syms_a = Vec::new();
    let mut vec_b = Vec::new();

    for (i, (lower, upper)) in bands.iter().enumerate() {
        let mut e = AMatBuild::new(dim);
        e[(i, i)] = 1.;

        syms_a.push(e.clone());
        vec_b.push(*upper);
        syms_a.push(e.scale(-1.));
        vec_b.push(-lower);
    }

    (syms_a, vec_b)
}

//

#[test]
fn test_general1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let sym_a = AMatBuild::new(1).iter_rowmaj(&[1.5]);
    let mut prob = AProbGeneral::new(1, vec![sym_a], vec![1.], 0.1).unwrap();

    let s = AGeneralSolver::new();
    let (x, fx) = s.solve_at(&mut prob, 2.).unwrap();
    println!("{}", x);

    // ln(1) / 0.1 < 1, so M = 1 and f = -(2 * 1.5 - 1)
    assert_float_eq!(x[(0, 0)], 2., abs <= 1e-12);
    assert_float_eq!(fx, -2., abs <= 1e-12);
}

#[test]
fn test_general2()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let eps = 0.05;
    let ref_x = [1.5, 0.5];
    let bands: Vec<_> = ref_x.iter().map(|x| (x - 0.3, x + 0.3)).collect();
    let (syms_a, vec_b) = diag_bands(2, &bands);

    let mut prob = AProbGeneral::new(2, syms_a.clone(), vec_b.clone(), eps).unwrap();

    let s = AGeneralSolver::new();
    let rslt = s.solve(&mut prob).unwrap();
    println!("{} x_trace {} f {} iter {}", rslt.x, rslt.x_trace, rslt.fx, rslt.iter);

    // the unit trace misses the lower bounds, then twice of it fits
    assert_float_eq!(rslt.x_trace, 2., abs <= 1e-12);
    assert_eq!(rslt.iter, 2);
    assert!(rslt.fx > -eps);
    assert_float_eq!(rslt.x.trace(), 2., abs <= 1e-9);

    for (a, b) in syms_a.iter().zip(&vec_b) {
        assert!(a.trace_prod(&rslt.x) <= b + eps);
    }
    for (i, x) in ref_x.iter().enumerate() {
        assert_float_eq!(rslt.x[(i, i)], *x, abs <= 0.3 + eps);
    }
}

#[test]
fn test_general3()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // large enough to take Lanczos
    let eps = 0.05;
    let ref_x = [1., 0.5, 0.5];
    let bands: Vec<_> = ref_x.iter().map(|x| (x - 0.3, x + 0.3)).collect();
    let (syms_a, vec_b) = diag_bands(3, &bands);

    let mut prob = AProbGeneral::new(3, syms_a.clone(), vec_b.clone(), eps).unwrap();

    let s = AGeneralSolver::new().par(|p| {
        p.solver.lanczos_min_dim = 3;
    });
    let rslt = s.solve(&mut prob).unwrap();
    println!("{} x_trace {} f {} iter {}", rslt.x, rslt.x_trace, rslt.fx, rslt.iter);

    assert!(rslt.fx > -eps);
    for (a, b) in syms_a.iter().zip(&vec_b) {
        assert!(a.trace_prod(&rslt.x) <= b + eps);
    }

    let eigvals = rslt.x.eigvals(1e-12).unwrap();
    for e in eigvals {
        assert!(e >= -1e-9);
    }
}

#[test]
fn test_general4()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // Tr(X) <= -1 has no PSD solution
    let sym_a = AMatBuild::identity(1);
    let mut prob = AProbGeneral::new(1, vec![sym_a], vec![-1.], 0.1).unwrap();

    let s = AGeneralSolver::new().par(|p| {
        p.max_iter = 20;
    });
    let rslt = s.solve(&mut prob);

    assert_eq!(rslt.err(), Some(SolverError::BinarySearchDidNotConverge));

    // halving until the scale underflows to zero, well within max_iter
    let sym_a = AMatBuild::identity(1);
    let mut prob = AProbGeneral::new(1, vec![sym_a], vec![-1.], 0.5).unwrap();

    let s = AGeneralSolver::new().par(|p| {
        p.max_iter = 2000;
    });
    let rslt = s.solve(&mut prob);

    assert_eq!(rslt.err(), Some(SolverError::BinarySearchDidNotConverge));
}

#[test]
fn test_general5()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let rslt = AProbGeneral::new(2, vec![AMatBuild::identity(3)], vec![1.], 0.1);
    assert_eq!(rslt.err(), Some(SolverError::DimensionMismatch));

    let mut prob = AProbGeneral::new(2, vec![AMatBuild::identity(2)], vec![1.], 0.1).unwrap();

    let s = AGeneralSolver::new();
    assert_eq!(s.solve_at(&mut prob, 0.).err(), Some(SolverError::InvalidParam));

    let s = AGeneralSolver::new().par(|p| {
        p.trace_init = -1.;
    });
    assert_eq!(s.solve(&mut prob).err(), Some(SolverError::InvalidParam));
}

#[test]
fn test_general6()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut p = GeneralParam::<f64>::default();

    std::env::set_var("HAZAN_TRACE_INIT", "4");
    std::env::set_var("HAZAN_LANCZOS_NCV", "8");
    env::set_general_par_by_env(&mut p);
    std::env::remove_var("HAZAN_TRACE_INIT");
    std::env::remove_var("HAZAN_LANCZOS_NCV");

    assert_float_eq!(p.trace_init, 4., abs <= 0.);
    assert_eq!(p.solver.lanczos_ncv, 8);
    assert_eq!(p.max_iter, GeneralParam::<f64>::default().max_iter);
    assert_eq!(p.curvature, None);
}

#[test]
fn test_general7()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // non-symmetric constraint matrix; only its symmetric part acts on X
    let sym_a = AMatBuild::new(2).iter_rowmaj(&[
        1., 1.,
        0., 1.,
    ]);
    let mut prob = AProbGeneral::new(2, vec![sym_a], vec![1.], 0.1).unwrap();

    let s = AGeneralSolver::new();
    let (x, fx) = s.solve_at(&mut prob, 1.).unwrap();
    println!("{}", x);

    // top eigenvector of -(A + A^T) / 2 is (1, -1) / sqrt(2)
    assert_float_eq!(x[(0, 0)], 0.5, abs <= 1e-9);
    assert_float_eq!(x[(0, 1)], -0.5, abs <= 1e-9);
    assert_float_eq!(x[(1, 0)], -0.5, abs <= 1e-9);
    assert_float_eq!(fx, 0.5, abs <= 1e-9);

    let rslt = s.solve(&mut prob).unwrap();
    assert_eq!(rslt.iter, 1);
    assert_float_eq!(rslt.x_trace, 1., abs <= 1e-12);
}
