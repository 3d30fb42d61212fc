use sim::{presets, Quatf, Vec3f, VehicleDynamics, VehicleState, VehicleStepDebug};

// Small deterministic generator so property runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }

    /// Uniform in [lo, hi).
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn at_depth(depth: f32) -> VehicleDynamics {
    VehicleDynamics::with_state(
        presets::work_class_rov(),
        VehicleState {
            position: Vec3f::new(0.0, -depth, 0.0),
            ..VehicleState::default()
        },
    )
}

#[test]
fn full_forward_thrust_reaches_terminal_speed() {
    init_logs();
    let mut vehicle = at_depth(50.0);
    let spec = vehicle.spec().clone();
    let terminal = spec.terminal_speed(spec.thrust_forward_n);
    assert!(terminal < spec.max_speed, "terminal speed must not be clipped by max_speed");

    let dt = 1.0 / 60.0;
    for _ in 0..300 {
        vehicle.apply_thrust(1.0, 0.0, 0.0, 0.0);
        vehicle.update(dt);
    }

    let speed = vehicle.velocity().length();
    let err = (speed - terminal).abs() / terminal;
    assert!(
        err < 0.01,
        "speed {speed} not within 1% of terminal {terminal} (err {:.4})",
        err
    );
    // Motion is overwhelmingly along body forward.
    assert!(vehicle.velocity().z > 0.99 * speed);
}

#[test]
fn velocity_limits_hold_for_arbitrary_commands() {
    init_logs();
    let mut rng = Lcg(0x5eed);
    let mut vehicle = at_depth(150.0);
    let spec = vehicle.spec().clone();
    let mut dbg = VehicleStepDebug::default();

    for tick in 0..5000 {
        // Occasionally out of range on purpose; the integrator must clamp.
        vehicle.apply_thrust(
            rng.range(-1.5, 1.5),
            rng.range(-1.5, 1.5),
            rng.range(-1.5, 1.5),
            rng.range(-1.5, 1.5),
        );
        let dt = rng.range(0.0, 0.3);
        vehicle.update_with_debug(dt, Some(&mut dbg));

        let v = vehicle.velocity();
        assert!(
            v.length() <= spec.max_speed + 1e-4,
            "tick {tick}: |v| = {} > {}",
            v.length(),
            spec.max_speed
        );
        let w = vehicle.angular_velocity();
        for c in [w.x, w.y, w.z] {
            assert!(c.abs() <= spec.max_rotation_speed + 1e-6, "tick {tick}: omega {w:?}");
        }
        let depth = vehicle.depth();
        assert!((0.0..=spec.max_depth).contains(&depth), "tick {tick}: depth {depth}");
        assert!((vehicle.orientation().length() - 1.0).abs() < 1e-3);
        assert!(dbg.dt <= spec.max_dt);
    }
}

#[test]
fn released_vehicle_drifts_up() {
    let mut vehicle = at_depth(20.0);
    for _ in 0..600 {
        vehicle.update(1.0 / 60.0);
    }
    assert!(vehicle.velocity().y > 0.0, "positively buoyant hull should rise");
    assert!(vehicle.depth() < 20.0);
}

#[test]
fn thrust_is_applied_in_body_frame() {
    let mut vehicle = at_depth(50.0);
    // Face +X: a quarter turn about world up.
    vehicle.set_rotation(Quatf::from_rotation_y(std::f32::consts::FRAC_PI_2));
    for _ in 0..120 {
        vehicle.apply_thrust(1.0, 0.0, 0.0, 0.0);
        vehicle.update(1.0 / 60.0);
    }
    let v = vehicle.velocity();
    assert!(v.x > 1.0 && v.z.abs() < 1e-3, "v = {v:?}");
}

#[test]
fn strafe_and_vertical_axes() {
    let mut vehicle = at_depth(50.0);
    for _ in 0..60 {
        vehicle.apply_thrust(0.0, 1.0, -1.0, 0.0);
        vehicle.update(1.0 / 60.0);
    }
    let v = vehicle.velocity();
    assert!(v.x > 0.5, "strafe should move starboard: {v:?}");
    assert!(v.y < -0.5, "vertical -1 should dive: {v:?}");
}
