use std::io::Write;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Vector3;

use ramjet_sim::config::{
    InitialConditions, IntegrationScheme, Scenario, SimulationConfig, Target, Vehicle,
};
use ramjet_sim::dynamics::Projectile;
use ramjet_sim::physics::{AeroDatabase, AeroModel, AeroSample, AeroTable, ConstantAero};
use ramjet_sim::sim::{self, Termination};

fn table_file(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Mach,Alpha,Cd,Cl_Slope").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

#[test]
fn fallback_coefficients_for_missing_and_corrupt_tables() {
    let missing = AeroDatabase::load("no_such_dir/aerodynamics.csv");
    let corrupt_file = table_file(&["1.0,0.0,oops,2.0", "2.0,0.0,0.5"]);
    let corrupt = AeroDatabase::load(corrupt_file.path());

    for db in [missing, corrupt] {
        assert!(db.is_fallback());
        for mach in [-3.0, -0.5, 0.0, 0.8, 2.0, 7.5] {
            assert_eq!(db.cd(mach), 0.67);
            assert_eq!(db.cl_alpha(mach), 2.0);
        }
    }
}

#[test]
fn table_extrapolates_linearly_past_both_ends() {
    let file = table_file(&["1.0,0.0,0.3,2.0", "2.0,0.0,0.5,2.0", "3.0,0.0,0.4,2.0"]);
    let db = AeroDatabase::load(file.path());
    assert!(!db.is_fallback());

    // first segment: 0.3 + (0.5 - 0.3) * (0.5 - 1.0)
    assert_relative_eq!(db.cd(0.5), 0.2, epsilon = 1e-12);
    // last segment: 0.4 + (0.4 - 0.5) * (4.0 - 3.0)
    assert_relative_eq!(db.cd(4.0), 0.3, epsilon = 1e-12);
    assert!(db.cd(-1.0).is_finite());
}

#[test]
fn ballistic_flight_without_lift_follows_drag_and_gravity() {
    let scenario = Scenario::default();
    let aero = ConstantAero::new(0.67, 0.0);
    let mut p = Projectile::new(&scenario.vehicle, &scenario.sim, &scenario.initial, aero);
    let area = scenario.vehicle.reference_area();

    while p.state().time < 5.0 {
        let before = p.state().clone();
        assert!(p.update(scenario.sim.dt, &scenario.target));
        let step = p.last_step().unwrap();

        let speed = before.vel.norm();
        let rho = 1.225 * (-before.pos.y / 8500.0).exp();
        let drag_accel = 0.5 * rho * speed * speed * area * 0.67 / scenario.vehicle.mass;
        assert_relative_eq!(step.accel.x, -drag_accel * before.vel.x / speed, epsilon = 1e-9);
        assert_relative_eq!(
            step.accel.y,
            -drag_accel * before.vel.y / speed - 9.81,
            epsilon = 1e-9
        );
    }
}

#[test]
fn vacuum_drop_impacts_at_free_fall_time() {
    let scenario = Scenario::default();
    let outcome = sim::simulate(&scenario, ConstantAero::new(0.0, 0.0));

    let expected = (2.0 * 2000.0 / 9.81_f64).sqrt();
    match outcome.termination {
        Termination::Impact { time } => {
            assert!(
                (time - expected).abs() <= scenario.sim.dt,
                "impact at {time}, expected {expected}"
            );
        }
        other => panic!("expected impact, got {other:?}"),
    }

    // no drag: downrange speed is untouched
    assert_eq!(outcome.final_state.vel.x, 680.0);
}

#[test]
fn clamped_angle_of_attack_drives_lift() {
    // Target far above the line of flight: raw command 3 * 45 deg.
    let target = Target::new(1000.0, 3000.0, 0.0);
    let initial = InitialConditions::default();
    let mut p = Projectile::new(
        &Vehicle::default(),
        &SimulationConfig::default(),
        &initial,
        ConstantAero::fallback(),
    );

    assert!(p.update(0.01, &target));
    let step = p.last_step().unwrap();
    let limit = 10.0_f64.to_radians();
    assert!(step.alpha_saturated);
    assert_eq!(step.alpha, limit);
    assert_eq!(step.cl, 2.0 * limit);
    assert_relative_eq!(step.lift, step.dynamic_force * 2.0 * limit, epsilon = 1e-12);
}

#[test]
fn identical_runs_are_bit_identical() {
    let samples = [
        AeroSample { mach: 0.8, alpha: 0.0, cd: 0.35, cl_alpha: 2.4 },
        AeroSample { mach: 1.2, alpha: 0.0, cd: 0.62, cl_alpha: 2.1 },
        AeroSample { mach: 2.0, alpha: 0.0, cd: 0.48, cl_alpha: 1.8 },
    ];
    let table = AeroTable::from_samples(&samples).unwrap();
    let scenario = Scenario::default();

    let a = sim::simulate(&scenario, table.clone());
    let b = sim::simulate(&scenario, table);
    assert_eq!(a.trajectory, b.trajectory);
    assert_eq!(a.termination, b.termination);
    assert_eq!(a.final_state, b.final_state);
}

#[test]
fn integration_schemes_agree_to_first_order() {
    let mut scenario = Scenario::default();
    scenario.sim.max_time = 5.0;
    let forward = sim::simulate(&scenario, ConstantAero::fallback());
    scenario.sim.integration = IntegrationScheme::SemiImplicitEuler;
    let semi = sim::simulate(&scenario, ConstantAero::fallback());

    let (f, s) = (forward.final_state, semi.final_state);
    assert_ne!(f.pos, s.pos);
    assert_abs_diff_eq!(f.pos.x, s.pos.x, epsilon = 5.0);
    assert_abs_diff_eq!(f.pos.y, s.pos.y, epsilon = 5.0);
}

#[test]
fn crossrange_never_moves() {
    let mut scenario = Scenario::default();
    scenario.initial.position = Vector3::new(0.0, 2000.0, 25.0);
    scenario.target = Target::new(15_000.0, 500.0, -400.0);
    let outcome = sim::simulate(&scenario, ConstantAero::fallback());
    assert_eq!(outcome.final_state.pos.z, 25.0);
    assert_eq!(outcome.final_state.vel.z, 0.0);
}

#[test]
fn bundled_scenario_and_table_load() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut scenario = Scenario::from_file(root.join("data/scenario.json")).unwrap();
    scenario.validate().unwrap();
    scenario.aero_table = Some(root.join("data/aerodynamics.csv"));

    let (outcome, aero) = sim::run(&scenario);
    assert!(!aero.is_fallback());
    assert_relative_eq!(aero.cd(2.0), 0.30, epsilon = 1e-12);
    assert_eq!(outcome.trajectory.len(), outcome.steps);
}
