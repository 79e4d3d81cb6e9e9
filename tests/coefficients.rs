mod common;

use common::synthetic_volume::{constant_volume, noise_volume, polynomial_volume, PolyCoeffs};
use lpa_tensor::{
    AnalysisWindow, LpaEngine, LpaError, LpaParams, StepOut, Volume, ZMargin,
    COEFFICIENT_OUTPUTS, NUM_COEFFS,
};

const TOL: f64 = 1e-8;

fn engine_for(step: usize, margin: i32, weight_factor: f64) -> LpaEngine {
    let params = LpaParams {
        step_out: StepOut { inl: step, crl: step },
        z_margin: ZMargin {
            from: -margin,
            to: margin,
        },
        weight_factor,
    };
    LpaEngine::configure(params).expect("valid configuration")
}

#[test]
fn recovers_quadratic_model_coefficients() {
    let _ = env_logger::builder().is_test(true).try_init();
    let c: PolyCoeffs = [0.7, -1.3, 0.4, 2.1, 0.9, -0.5, 1.6, -0.8, 0.3, -1.1];
    for wf in [0.2, 0.5, 1.0] {
        let engine = engine_for(2, 2, wf);
        // 5x5x11 block sampled from the model, anchored at z = 5.
        let block = polynomial_volume(5, 5, 11, 5, &c);
        let out = engine.compute_coefficients(&block).unwrap();
        for k in 0..NUM_COEFFS {
            assert!(
                (out.r[k][5] - c[k]).abs() < TOL,
                "wf {wf}: coefficient {k} expected {} got {}",
                c[k],
                out.r[k][5]
            );
        }
    }
}

#[test]
fn linear_ramp_tracks_depth() {
    let slope = 0.25;
    let engine = LpaEngine::configure(LpaParams::default()).unwrap();
    let block = Volume::from_fn(3, 3, 9, |_, _, z| slope * z as f64);
    let out = engine.compute_coefficients(&block).unwrap();
    for z in out.valid.clone() {
        assert!((out.r[0][z] - slope * z as f64).abs() < TOL, "r0 at z={z}");
        assert!((out.r[3][z] - slope).abs() < TOL, "r3 at z={z}");
        for k in [1, 2, 4, 5, 6, 7, 8, 9] {
            assert!(out.r[k][z].abs() < TOL, "r{k} at z={z} should vanish");
        }
    }
}

#[test]
fn identity_on_constants() {
    let engine = LpaEngine::configure(LpaParams::default()).unwrap();
    let block = constant_volume(3, 3, 9, 42.5);
    let out = engine.compute_coefficients(&block).unwrap();
    for z in out.valid.clone() {
        assert!((out.r[0][z] - 42.5).abs() < TOL);
        for k in 1..NUM_COEFFS {
            assert!(out.r[k][z].abs() < TOL);
        }
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let engine = engine_for(1, 2, 0.3);
    let block = noise_volume(5, 5, 13, 0xC0FFEE);
    let first = engine.compute_coefficients(&block).unwrap();
    let second = engine.compute_coefficients(&block).unwrap();
    for k in 0..NUM_COEFFS {
        assert_eq!(first.r[k], second.r[k], "profile r{k} must be bitwise stable");
    }
    assert_eq!(first.valid, second.valid);
}

#[test]
fn valid_range_matches_kernel_half_length() {
    // z extent 3 on a block of 7 samples: only [1, 6) is defined.
    let engine = LpaEngine::configure(LpaParams::default()).unwrap();
    let block = noise_volume(3, 3, 7, 7);
    let out = engine.compute_coefficients(&block).unwrap();
    assert_eq!(out.valid, 1..6);
}

#[test]
fn output_names_are_the_contract() {
    assert_eq!(
        COEFFICIENT_OUTPUTS,
        ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9"]
    );
    let engine = LpaEngine::configure(LpaParams::default()).unwrap();
    let block = noise_volume(3, 3, 5, 11);
    let out = engine.compute_coefficients(&block).unwrap();
    for (k, name) in COEFFICIENT_OUTPUTS.iter().enumerate() {
        assert_eq!(out.by_name(name).unwrap(), out.profile(k));
    }
}

#[test]
fn undersized_blocks_are_rejected() {
    let engine = engine_for(2, 1, 0.2); // needs 5x5x3
    for (nx, ny, nz) in [(4, 5, 3), (5, 4, 3), (5, 5, 2)] {
        let err = engine
            .compute_coefficients(&Volume::zeros(nx, ny, nz))
            .unwrap_err();
        assert_eq!(
            err,
            LpaError::Shape {
                got: (nx, ny, nz),
                need: (5, 5, 3)
            }
        );
    }
}

#[test]
fn invalid_configurations_are_rejected() {
    for wf in [0.0, -0.2] {
        let params = LpaParams {
            weight_factor: wf,
            ..Default::default()
        };
        assert!(matches!(
            LpaEngine::configure(params),
            Err(LpaError::Configuration(_))
        ));
    }
    // 1x1x3 window: 3 points cannot constrain 10 unknowns.
    let params = LpaParams {
        step_out: StepOut { inl: 0, crl: 0 },
        ..Default::default()
    };
    assert!(matches!(
        LpaEngine::configure(params),
        Err(LpaError::Configuration(_))
    ));
    // Direct extents below the minimum fail the same way.
    assert!(matches!(
        AnalysisWindow::new(3, 3, 1),
        Err(LpaError::Configuration(_))
    ));
}
