#[cfg(test)]
mod integration {
    use anyhow::Result;
    use sim::{ArmInput, Rating, ThrustCommand, Vec3f};
    use trainer::{run_session, Config, ControlFrame, Phase, Rig, Script};
    use tracing::info;

    const DT: f32 = 1.0 / 60.0;
    const HOVER: ThrustCommand = ThrustCommand {
        forward: 0.0,
        strafe: 0.0,
        vertical: -0.0245,
        roll: 0.0,
    };

    fn init_logs() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn busy_frame(tick: usize) -> ControlFrame {
        let t = tick as f32 * DT;
        ControlFrame {
            thrust: ThrustCommand::new(t.sin(), (0.7 * t).cos(), -0.5, 0.3 * t.sin()),
            arm: ArmInput::new((1.3 * t).sin(), (0.4 * t).cos(), 0.5, -1.0),
            torch: (tick / 45) % 2 == 1,
        }
    }

    #[test]
    fn coop_rigs_do_not_interfere() -> Result<()> {
        init_logs();
        let cfg = Config::default();

        let mut solo = Rig::new(&cfg, 0);
        let mut paired = Rig::new(&cfg, 0);
        let mut noisy = Rig::new(&cfg, 1);

        let steady = ControlFrame {
            thrust: HOVER,
            torch: true,
            ..ControlFrame::default()
        };
        for tick in 0..600 {
            let frame = if tick % 120 < 100 { steady } else { ControlFrame::default() };
            solo.tick(DT, &frame);
            paired.tick(DT, &frame);
            noisy.tick(DT, &busy_frame(tick));
        }

        assert_eq!(solo.vehicle().state(), paired.vehicle().state());
        assert_eq!(solo.arm().state(), paired.arm().state());
        assert_eq!(solo.welds(), paired.welds());
        assert_eq!(solo.scoring().state(), paired.scoring().state());
        assert!(!noisy.welds().is_empty(), "noisy rig should have welded too");
        assert_ne!(noisy.vehicle().state(), paired.vehicle().state());
        Ok(())
    }

    #[test]
    fn tip_sample_uses_this_ticks_vehicle_and_arm() -> Result<()> {
        init_logs();
        let cfg = Config::default();
        let mut rig = Rig::new(&cfg, 0);

        let frame = ControlFrame {
            thrust: ThrustCommand::new(1.0, 0.5, 0.0, 0.0),
            arm: ArmInput::new(0.5, 0.5, 0.5, 0.0),
            torch: true,
        };
        for _ in 0..20 {
            rig.tick(DT, &frame);
            // The newest sample sits where the tip is after both updates ran.
            let last = rig
                .weld()
                .samples()
                .last()
                .map(|s| s.position)
                .unwrap_or(Vec3f::NAN);
            assert!((last - rig.tip_position()).length() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn combo_decays_after_scoring_within_the_same_tick() -> Result<()> {
        init_logs();
        let cfg = Config::default();
        let mut rig = Rig::new(&cfg, 0);

        let lit = ControlFrame { thrust: HOVER, torch: true, ..ControlFrame::default() };
        for _ in 0..60 {
            rig.tick(DT, &lit);
        }
        let record = rig
            .tick(DT, &ControlFrame { thrust: HOVER, ..ControlFrame::default() })
            .cloned();
        let record = record.ok_or_else(|| anyhow::anyhow!("torch release produced no record"))?;

        let after_award = record.award.multiplier_after;
        let now = rig.scoring().multiplier();
        if after_award > 1.0 {
            let expected = (after_award - cfg.sim.scoring.decay_rate * DT).max(1.0);
            assert!((now - expected).abs() < 1e-6, "{now} vs {expected}");
        } else {
            assert_eq!(now, 1.0);
        }
        Ok(())
    }

    #[test]
    fn scripted_session_scores_every_weld() -> Result<()> {
        init_logs();
        let cfg = Config { players: 2, ..Config::default() };
        let report = run_session(&cfg, None)?;
        info!("\n{}", report.summary());

        assert_eq!(report.players.len(), 2);
        for p in &report.players {
            assert_eq!(p.welds.len(), 2, "player {}", p.id);
            assert_eq!(p.total, p.welds.iter().map(|w| w.award.points).sum::<u64>());
            for w in &p.welds {
                assert_eq!(w.result.rating, Rating::from_score(w.result.overall_score));
                assert!(w.finished_at > w.started_at);
                assert!(p.multiplier >= 1.0 && p.multiplier <= cfg.sim.scoring.max_multiplier);
            }
            assert!(p.final_depth > 0.0 && p.final_depth < cfg.sim.vehicle.max_depth);
        }
        Ok(())
    }

    #[test]
    fn steady_hover_weld_beats_a_rushed_one() -> Result<()> {
        init_logs();
        // Build up travel speed with the torch off, then lay a bead.
        let weld_for = |approach: ThrustCommand, bead: ThrustCommand| -> Result<u32> {
            let cfg = Config {
                script: Script {
                    tick_hz: 60.0,
                    phases: vec![
                        Phase {
                            name: "settle".into(),
                            seconds: 0.5,
                            thrust: HOVER,
                            ..Phase::default()
                        },
                        Phase {
                            name: "approach".into(),
                            seconds: 1.5,
                            thrust: approach,
                            ..Phase::default()
                        },
                        Phase {
                            name: "bead".into(),
                            seconds: 1.5,
                            thrust: bead,
                            torch: true,
                            ..Phase::default()
                        },
                    ],
                },
                ..Config::default()
            };
            let report = run_session(&cfg, None)?;
            let score = report.players[0]
                .welds
                .first()
                .map(|w| w.result.overall_score)
                .ok_or_else(|| anyhow::anyhow!("no weld recorded"))?;
            Ok(score)
        };

        let flat_out = ThrustCommand { strafe: 1.0, ..HOVER };
        let rushed = weld_for(flat_out, flat_out)?;
        let steady = weld_for(
            ThrustCommand { strafe: 0.05, ..HOVER },
            ThrustCommand { strafe: 0.02, ..HOVER },
        )?;
        info!(rushed, steady, "bead scores");
        assert!(steady > rushed, "steady {steady} vs rushed {rushed}");
        assert!(steady >= 55, "steady bead only scored {steady}");
        Ok(())
    }
}
