//! Property tests for the simulation invariants

use flappy::persistence::MemoryStorage;
use flappy::sim::{Bird, GameCore, GamePhase, Pipe, PipeSpawner, TickInput, tick};
use flappy::{Assets, ScoreStore, Tuning};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn bird() -> Bird {
    Bird::new(Assets::builtin().bird)
}

fn core(tuning: Tuning, seed: u64) -> GameCore {
    GameCore::new(tuning, &Assets::builtin(), Box::new(MemoryStorage::new()), seed)
}

proptest! {
    #[test]
    fn gravity_always_increases_velocity(
        y in 50.0f32..500.0,
        velocity in -12.0f32..12.0,
        gravity in 0.1f32..2.0,
    ) {
        let tuning = Tuning { gravity, ..Tuning::default() };
        let mut bird = bird();
        bird.y = y;
        bird.velocity = velocity;
        bird.update(&tuning);
        prop_assert!(bird.is_alive());
        prop_assert!(bird.velocity > velocity);
    }

    #[test]
    fn jump_sets_fixed_impulse_only_when_alive(velocity in -50.0f32..50.0) {
        let tuning = Tuning::default();
        let mut alive = bird();
        alive.velocity = velocity;
        prop_assert!(alive.jump(&tuning));
        prop_assert_eq!(alive.velocity, tuning.jump_velocity);

        let mut dead = bird();
        dead.velocity = velocity;
        dead.kill();
        prop_assert!(!dead.jump(&tuning));
        prop_assert_eq!(dead.velocity, velocity);
    }

    #[test]
    fn every_cleared_pipe_scores_once(spacings in prop::collection::vec(100.0f32..300.0, 1..8)) {
        // Weightless bird hovering inside every gap, no random pipes
        let tuning = Tuning {
            gravity: 0.0,
            spawn_interval_ms: 1_000_000,
            ..Tuning::default()
        };
        let mut core = core(tuning, 1);
        tick(&mut core, &TickInput { start: true, ..Default::default() });

        let mut x = 60.0;
        for (i, spacing) in spacings.iter().enumerate() {
            core.pipes.push(Pipe::new(1000 + i as u32, x, 300));
            x += spacing;
        }

        for _ in 0..400 {
            tick(&mut core, &TickInput::default());
        }
        prop_assert_eq!(core.phase, GamePhase::Playing);
        prop_assert_eq!(core.score(), spacings.len() as u64);
    }

    #[test]
    fn death_is_permanent_and_ends_run_same_tick(
        seed in any::<u64>(),
        flaps in prop::collection::vec(any::<bool>(), 1..600),
    ) {
        let mut core = core(Tuning::default(), seed);
        tick(&mut core, &TickInput { start: true, ..Default::default() });

        let mut died = false;
        for flap in flaps {
            tick(&mut core, &TickInput { jump: flap, ..Default::default() });
            if died {
                prop_assert!(core.bird.is_dead());
            }
            if core.bird.is_dead() {
                prop_assert_eq!(core.phase, GamePhase::GameOver);
                died = true;
            } else {
                prop_assert_eq!(core.phase, GamePhase::Playing);
            }
        }
    }

    #[test]
    fn high_score_save_is_idempotent(stored in 0u64..500, score in 0u64..500) {
        let storage = MemoryStorage::with_contents(&stored.to_string());
        let mut store = ScoreStore::load(Box::new(storage.clone()));
        for _ in 0..score {
            store.increment();
        }

        let wrote = store.save_high_score();
        let expected = stored.max(score);
        prop_assert_eq!(wrote, score > stored);
        prop_assert_eq!(storage.contents(), Some(expected.to_string()));
        prop_assert_eq!(store.is_new_high_score(), score > stored);

        prop_assert!(!store.save_high_score());
        prop_assert_eq!(storage.contents(), Some(expected.to_string()));
    }

    #[test]
    fn spawned_gaps_stay_in_bounds(seed in any::<u64>()) {
        let tuning = Tuning::default();
        let spawner = PipeSpawner::from_tuning(&tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        for id in 0..100 {
            let pipe = spawner.spawn(id, &mut rng, &tuning);
            prop_assert!(pipe.gap_top >= tuning.pipe_min_margin);
            prop_assert!(pipe.gap_top + tuning.pipe_gap <= 740 - 100 - tuning.pipe_min_margin);
        }
    }
}
