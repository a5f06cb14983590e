use float_eq::assert_float_eq;
use hazan::prelude::*;
use hazan::*;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type ASolver = Solver<La>;

// f(X) = Tr(C X) - Tr(X^2) / 2
fn quad_obj(sym_c: &AMatBuild) -> impl Objective<La> + '_
{
    let n = sym_c.size().0;

    ObjFn::<La, _, _>::new(n,
        move |x: &[f64]| {
            let x = AMatBuild::from_colmaj(n, x);
            sym_c.trace_prod(&x) - x.trace_prod(&x) / 2.
        },
        move |x: &[f64], g: &mut[f64]| {
            let c: &[f64] = sym_c.as_ref();
            for (i, e) in g.iter_mut().enumerate() {
                *e = c[i] - x[i];
            }
        }
    )
}

fn tridiag(n: usize) -> AMatBuild
{
    AMatBuild::new(n).by_fn(|r, c| {
        if r == c {
            2.
        }
        else if r + 1 == c || c + 1 == r {
            -1.
        }
        else {
            0.
        }
    })
}

//

#[test]
fn test_bounded1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 4;

    // f(X) = -sum_i X_ii^2, maximized at X = I / n
    let obj = ObjFn::<La, _, _>::new(n,
        |x: &[f64]| {
            -(0.. n).map(|i| x[i * n + i] * x[i * n + i]).sum::<f64>()
        },
        |x: &[f64], g: &mut[f64]| {
            g.fill(0.);
            for i in 0.. n {
                g[i * n + i] = -2. * x[i * n + i];
            }
        }
    );

    let mut prob = ProbBoundedTrace::<La, _>::new(obj, 100, Some(2.));
    let s = ASolver::new();
    let p = prob.problem(&s.par);
    let x = AMatBuild::from_colmaj(n, s.solve(p).unwrap());
    println!("{}", x);

    assert_float_eq!(prob.objective().value(x.as_ref()), -0.25, abs <= 0.05);
    assert_float_eq!(x.trace(), 1., abs <= 1e-9);
}

#[test]
fn test_bounded2()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 5;
    let sym_c = tridiag(n);

    for n_iter in [1, 2, 5, 20, 100] {
        let mut prob = ProbBoundedTrace::<La, _>::new(quad_obj(&sym_c), n_iter, None);
        let s = ASolver::new();
        let p = prob.problem(&s.par);
        let x = AMatBuild::from_colmaj(n, s.solve(p).unwrap());

        assert_float_eq!(x.trace(), 1., abs <= 1e-9);

        for e in x.eigvals(1e-12).unwrap() {
            assert!(e >= -1e-9, "n_iter {}: eigenvalue {}", n_iter, e);
        }
    }
}

#[test]
fn test_bounded3()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 6;
    let sym_c = tridiag(n);

    let solve = |seed: u64| {
        let mut prob = ProbBoundedTrace::<La, _>::new(quad_obj(&sym_c), 30, Some(1.));
        let s = ASolver::new().par(|p| {
            p.seed = seed;
            p.lanczos_ncv = 3;
        });
        let p = prob.problem(&s.par);
        let x = s.solve(p).unwrap().to_vec();
        x
    };

    let x1 = solve(7);
    let x2 = solve(7);

    assert_eq!(x1, x2);
}

#[test]
fn test_bounded4()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // linear objective Tr(C X) is maximized by the top eigenvector of C
    let n = 5;
    let sym_c = tridiag(n);

    let obj = ObjFn::<La, _, _>::new(n,
        |x: &[f64]| {
            sym_c.trace_prod(&AMatBuild::from_colmaj(n, x))
        },
        |_: &[f64], g: &mut[f64]| {
            g.copy_from_slice(sym_c.as_ref());
        }
    );

    let mut prob = ProbBoundedTrace::<La, _>::new(obj, 1, None);
    let s = ASolver::new();
    let p = prob.problem(&s.par);
    let x = s.solve(p).unwrap().to_vec();

    // 2 - 2 cos(5 pi / 6)
    assert_float_eq!(prob.objective().value(&x), 2. + 3_f64.sqrt(), abs <= 1e-6);
}

#[test]
fn test_bounded5()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 3;

    let obj = ObjFn::<La, _, _>::new(n,
        |_: &[f64]| 0.,
        |_: &[f64], g: &mut[f64]| {
            g.fill(0.);
            g[4] = f64::NAN;
        }
    );

    let mut prob = ProbBoundedTrace::<La, _>::new(obj, 10, None);
    let s = ASolver::new();
    let p = prob.problem(&s.par);
    assert_eq!(s.solve(p).err(), Some(SolverError::NonFiniteValue));

    let obj = ObjFn::<La, _, _>::new(n,
        |_: &[f64]| 0.,
        |_: &[f64], g: &mut[f64]| {
            g.fill(0.);
            g[1] = 1.;
        }
    );

    let mut prob = ProbBoundedTrace::<La, _>::new(obj, 10, None);
    let s = ASolver::new();
    let p = prob.problem(&s.par);
    assert_eq!(s.solve(p).err(), Some(SolverError::AsymmetricGradient));
}

#[test]
fn test_bounded6()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 6;
    let opt = -1. / n as f64;

    let mut gaps = Vec::new();
    for n_iter in [1, 10, 100, 1000] {
        let obj = ObjFn::<La, _, _>::new(n,
            |x: &[f64]| {
                -(0.. n).map(|i| x[i * n + i] * x[i * n + i]).sum::<f64>()
            },
            |x: &[f64], g: &mut[f64]| {
                g.fill(0.);
                for i in 0.. n {
                    g[i * n + i] = -2. * x[i * n + i];
                }
            }
        );

        let mut prob = ProbBoundedTrace::<La, _>::new(obj, n_iter, None);
        let s = ASolver::new().par(|p| {
            p.seed = 0;
        });
        let p = prob.problem(&s.par);
        let x = s.solve(p).unwrap().to_vec();

        let gap = (prob.objective().value(&x) - opt).abs();
        println!("n_iter {}: gap {:.3e}", n_iter, gap);
        gaps.push(gap);
    }

    for w in gaps.windows(2) {
        assert!(w[1] < w[0], "{:?}", gaps);
    }
    assert!(gaps[3] < 1e-4);
}
