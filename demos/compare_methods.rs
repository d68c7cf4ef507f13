use linsolve::{
    Comparator, IterationOperator, IterativeConfig, LinearSystem, diagnose, optimal_relaxation,
};

fn main() -> Result<(), linsolve::SolverError> {
    let rows = vec![
        vec![10.0, -1.0, 2.0, 0.0],
        vec![-1.0, 11.0, -1.0, 3.0],
        vec![2.0, -1.0, 10.0, -1.0],
        vec![0.0, 3.0, -1.0, 8.0],
    ];
    let b = vec![6.0, 25.0, -11.0, 15.0];

    let diag = diagnose(&rows, &b);
    println!("checks = {:?}, det = {:?}", diag.checks, diag.determinant);

    let system = LinearSystem::from_rows(&rows, &b)?;
    let rho_j = IterationOperator::jacobi(&system)?.spectral_radius()?;
    let w = optimal_relaxation(rho_j).unwrap_or(1.0);
    println!("rho(Jacobi) = {rho_j:.6}, suggested w = {w:.4}");

    let config = IterativeConfig::new(vec![0.0; 4], 1e-10, 200).with_relaxation(w);
    let report = Comparator::new()
        .with_direct(diag.recommended_pivot)
        .compare(&system, &config)?;

    for run in &report.runs {
        match &run.outcome {
            Ok(r) => println!(
                "{:<13} rho={:?} iters={:<4} err={:.3e} converged={} dev={:?} ({:?})",
                run.method.to_string(),
                r.spectral_radius,
                r.iterations_used,
                r.final_error,
                r.actual_converged,
                run.deviation_from_direct,
                run.elapsed
            ),
            Err(e) => println!("{:<13} failed: {e}", run.method.to_string()),
        }
    }
    for (rank, r) in report.ranking.iter().enumerate() {
        println!("#{} {} score={:.4}", rank + 1, r.method, r.score);
    }
    match report.best {
        Some(m) => println!("best: {m}"),
        None => println!("no method converged"),
    }
    Ok(())
}
