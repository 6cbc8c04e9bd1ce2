use approx::assert_relative_eq;
use logph_acidbase::{Expression, SolveConfig, Species, System};

fn solve_default(system: &System, first: Expression, second: Expression) -> f64 {
    system
        .solve_default(&first, &second)
        .expect("balance should solve")
        .ph
}

#[test]
fn phosphoric_acid_solution() {
    let mut system = System::new();
    let phosphoric = system.add_acid([2.15, 7.20, 12.35], 0.1, None).unwrap();
    let a = |index| Species::acid(phosphoric, index);

    let ph = solve_default(
        &system,
        Species::Hydronium.into(),
        a(1) + 2.0 * a(2) + 3.0 * a(3) + Species::Hydroxide,
    );

    assert_relative_eq!(ph, 1.63, epsilon = 0.02);
}

#[test]
fn ammonia_solution() {
    let mut system = System::new();
    let ammonium = system
        .add_acid([9.24], 0.1, Some(vec!["NH₄⁺".into(), "NH₃".into()]))
        .unwrap();

    let ph = solve_default(
        &system,
        Species::Hydronium + Species::acid(ammonium, 0),
        Species::Hydroxide.into(),
    );

    assert_relative_eq!(ph, 11.12, epsilon = 0.02);
}

#[test]
fn acetic_acid_equivalence_point() {
    let mut system = System::new();
    let acetic = system.add_acid([4.75], 0.1, None).unwrap();
    let sodium = system.add_spectator("Na⁺", 0.1).unwrap();

    let cations = Species::Hydronium + Species::Spectator(sodium);
    let anions = Species::Hydroxide + Species::acid(acetic, 1);
    system.add_auxiliary(cations.clone(), Some("cations"), None).unwrap();
    system.add_auxiliary(anions.clone(), Some("anions"), "blue".parse().ok()).unwrap();

    let by_expression = solve_default(&system, cations, anions);
    let by_name = system
        .solve_named("cations", "anions", [0.0, 14.0], &SolveConfig::default())
        .unwrap()
        .ph;

    assert_relative_eq!(by_expression, 8.87, epsilon = 0.02);
    assert_eq!(by_expression.to_bits(), by_name.to_bits());
}

#[test]
fn tighter_tolerance_needs_more_halvings() {
    let mut system = System::new();
    let acid = system.add_acid([4.0], 0.1, None).unwrap();
    let first = Species::acid(acid, 0).to_expression();
    let second = Species::acid(acid, 1).to_expression();

    let coarse = system
        .solve(&first, &second, [0.0, 14.0], &SolveConfig::new(1e-3, 200).unwrap())
        .unwrap();
    let fine = system
        .solve(&first, &second, [0.0, 14.0], &SolveConfig::new(1e-10, 200).unwrap())
        .unwrap();

    assert!(fine.iters > coarse.iters);
    assert_relative_eq!(coarse.ph, 4.0, epsilon = 1e-3);
    assert_relative_eq!(fine.ph, 4.0, epsilon = 1e-9);
}
