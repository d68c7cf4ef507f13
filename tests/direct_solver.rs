//! Tests for Gaussian elimination under the three pivot modes.
//!
//! Covers the reference 3x3 system, random well-conditioned systems (residual and
//! agreement between pivot modes), singular input, un-permuting after total pivoting,
//! repeatability, and the step-by-step elimination trace.

use approx::assert_abs_diff_eq;
use faer::Mat;
use linsolve::core::traits::InfNorm;
use linsolve::{
    EliminationEvent, LinearSystem, PivotMode, SolverError, solve_direct, solve_direct_traced,
};
use rand::Rng;

fn reference_system() -> LinearSystem {
    LinearSystem::from_rows(
        &[vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]],
        &[8.0, -11.0, -3.0],
    )
    .unwrap()
}

/// Random system with a boosted diagonal so that it is safely non-singular.
fn random_system(n: usize) -> LinearSystem {
    let mut rng = rand::thread_rng();
    let a = Mat::from_fn(n, n, |i, j| {
        let v: f64 = rng.gen_range(-1.0..1.0);
        if i == j { v + n as f64 } else { v }
    });
    let b: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
    LinearSystem::new(a, b).unwrap()
}

/// The reference system solves to [2, 3, -1] under every pivot mode.
#[test]
fn reference_system_all_modes() {
    let sys = reference_system();
    for mode in PivotMode::ALL {
        let x = solve_direct(&sys, mode).unwrap().unpermuted();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-10);
    }
}

/// Residuals are small and the three pivot modes agree on random systems.
#[test]
fn random_systems_residual_and_agreement() {
    for n in [2, 5, 12] {
        let sys = random_system(n);
        let solutions: Vec<Vec<f64>> = PivotMode::ALL
            .iter()
            .map(|&mode| {
                let sol = solve_direct(&sys, mode).unwrap();
                assert!(sol.mark.is_valid());
                assert!(sol.residual_inf_norm(&sys) < 1e-6, "residual too large for {mode}");
                sol.unpermuted()
            })
            .collect();
        for other in &solutions[1..] {
            for (a, b) in solutions[0].iter().zip(other) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
            }
        }
    }
}

/// Total pivoting returns x in pivoted order; only the un-permuted vector solves the system.
#[test]
fn total_pivoting_requires_unpermuting() {
    // the largest entry sits in column 2, so the first step swaps columns
    let sys = LinearSystem::from_rows(
        &[vec![1.0, 0.0, 10.0], vec![0.0, 2.0, 1.0], vec![1.0, 1.0, 1.0]],
        &[31.0, 7.0, 6.0],
    )
    .unwrap();
    let sol = solve_direct(&sys, PivotMode::Total).unwrap();
    assert!(!sol.mark.is_identity());
    let x = sol.unpermuted();
    for (xi, ei) in x.iter().zip([1.0, 2.0, 3.0]) {
        assert_abs_diff_eq!(*xi, ei, epsilon = 1e-12);
    }
    assert_ne!(sol.x, x);
    assert!(sys.residual(&x).norm_inf() < 1e-12);
    assert!(sys.residual(&sol.x).norm_inf() > 1e-3);
}

/// A singular matrix fails under every pivot mode.
#[test]
fn singular_matrix_fails_all_modes() {
    let sys = LinearSystem::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]], &[3.0, 6.0]).unwrap();
    for mode in PivotMode::ALL {
        assert!(
            matches!(
                solve_direct(&sys, mode),
                Err(SolverError::SingularOrIllConditioned { .. })
            ),
            "expected singular failure for {mode}"
        );
    }
}

/// A zero row is reported, never silently solved.
#[test]
fn zero_row_is_singular() {
    let sys = LinearSystem::from_rows(
        &[vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0], vec![4.0, 5.0, 7.0]],
        &[1.0, 0.0, 2.0],
    )
    .unwrap();
    for mode in PivotMode::ALL {
        assert!(matches!(
            solve_direct(&sys, mode),
            Err(SolverError::SingularOrIllConditioned { .. })
        ));
    }
}

/// Solving twice gives bit-identical output.
#[test]
fn repeated_solves_are_identical() {
    let sys = random_system(8);
    for mode in PivotMode::ALL {
        let first = solve_direct(&sys, mode).unwrap();
        let second = solve_direct(&sys, mode).unwrap();
        assert_eq!(first, second);
    }
}

/// The traced solve matches the plain one and records the pivoting steps.
#[test]
fn traced_solve_matches_plain_solve() {
    let sys = reference_system();
    let (traced, trace) = solve_direct_traced(&sys, PivotMode::Partial).unwrap();
    assert_eq!(traced, solve_direct(&sys, PivotMode::Partial).unwrap());

    match &trace.events[0] {
        EliminationEvent::Initial { matrix } => {
            assert_eq!(matrix[0], vec![2.0, 1.0, -1.0, 8.0]);
        }
        other => panic!("unexpected first event {other:?}"),
    }
    // partial pivoting brings the -3 row to the top
    match &trace.events[1] {
        EliminationEvent::Pivoted { step: 0, matrix, .. } => {
            assert_eq!(matrix[0], vec![-3.0, -1.0, 2.0, -11.0]);
        }
        other => panic!("unexpected second event {other:?}"),
    }
}

/// Without pivoting no `Pivoted` events are recorded.
#[test]
fn trace_without_pivoting_has_no_pivot_events() {
    let (_, trace) = solve_direct_traced(&reference_system(), PivotMode::None).unwrap();
    assert!(
        !trace
            .events
            .iter()
            .any(|e| matches!(e, EliminationEvent::Pivoted { .. }))
    );
}

/// Shape errors are reported at construction, before any elimination.
#[test]
fn malformed_input_is_rejected() {
    assert!(matches!(
        LinearSystem::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], &[1.0, 2.0]),
        Err(SolverError::NonSquareMatrix { rows: 2, cols: 3 })
    ));
    assert!(matches!(
        LinearSystem::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[1.0, 2.0, 3.0]),
        Err(SolverError::DimensionMismatch { .. })
    ));
}
