use proptest::prelude::*;

use astrosim::{IntegratorConfig, Parameters, Softening, Universe};

fn coord() -> impl Strategy<Value = f64> {
    -10.0f64..10.0
}

fn params(integrator: IntegratorConfig) -> Parameters {
    Parameters {
        h0: 1.0e-3,
        g: 1.0,
        softening: Softening::Plummer { eps2: 1.0e-2 },
        integrator,
        max_samples: None,
    }
}

fn any_integrator() -> impl Strategy<Value = IntegratorConfig> {
    prop_oneof![
        Just(IntegratorConfig::SemiImplicitEuler),
        Just(IntegratorConfig::Verlet),
        Just(IntegratorConfig::Leapfrog),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pair_forces_cancel(
        m1 in 0.1f64..10.0,
        m2 in 0.1f64..10.0,
        p1 in (coord(), coord(), coord()),
        p2 in (coord(), coord(), coord()),
    ) {
        let mut u = Universe::with_parameters(params(IntegratorConfig::SemiImplicitEuler)).unwrap();
        u.add_point_matter(m1, [p1.0, p1.1, p1.2], [0.0; 3], [0.0; 3]).unwrap();
        u.add_point_star(m2, [p2.0, p2.1, p2.2], [0.0; 3], [0.0; 3], 1.0).unwrap();

        let forces = u.pair_forces().unwrap();
        prop_assert_eq!(forces.len(), 2);
        prop_assert_eq!(forces[0].force, -forces[1].force);
    }

    #[test]
    fn momentum_is_conserved(
        integrator in any_integrator(),
        m1 in 0.1f64..10.0,
        m2 in 0.1f64..10.0,
        v1 in (coord(), coord(), coord()),
        v2 in (coord(), coord(), coord()),
        sep in 0.5f64..5.0,
    ) {
        let mut u = Universe::with_parameters(params(integrator)).unwrap();
        u.add_point_matter(m1, [0.0, 0.0, 0.0], [v1.0, v1.1, v1.2], [0.0; 3]).unwrap();
        u.add_point_matter(m2, [sep, 0.0, 0.0], [v2.0, v2.1, v2.2], [0.0; 3]).unwrap();

        let p0 = u.total_momentum();
        for _ in 0..200 {
            u.advance().unwrap();
        }
        let p1 = u.total_momentum();
        let scale = 1.0 + p0.norm();
        prop_assert!((p1 - p0).norm() < 1e-9 * scale, "{:?} -> {:?}", p0, p1);
    }
}
