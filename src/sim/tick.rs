//! Fixed timestep simulation tick
//!
//! Per tick: input -> phase transition -> bird -> pipes + spawner ->
//! scoring/collision -> phase transition on death.

use super::bird::BirdEvent;
use super::collision::bird_pipe_collision;
use super::particles::{emit_feathers, emit_impact, update_particles};
use super::state::{GameCore, GameEvent, GamePhase};
use crate::consts::{GROUND_LINE, WINDOW_WIDTH};

/// Vertical slack the autopilot keeps above the lower pipe
const AUTOPILOT_MARGIN: f32 = 15.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap
    pub jump: bool,
    /// Leave the menu and begin a run
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
    /// Back to the menu after game over
    pub menu: bool,
    /// Stop the game loop
    pub quit: bool,
    /// Let the built-in pilot decide when to flap
    pub autopilot: bool,
}

/// Advance the game by one fixed tick
pub fn tick(core: &mut GameCore, input: &TickInput) {
    core.events.clear();

    if input.quit {
        if !core.quit_requested {
            log::info!("Quit requested");
        }
        core.quit_requested = true;
        return;
    }

    core.time_ticks += 1;

    // Particles animate in every phase
    update_particles(&mut core.particles);

    let mut input = input.clone();
    if input.autopilot {
        match core.phase {
            GamePhase::Menu => input.start = true,
            GamePhase::Playing => input.jump = autopilot_wants_flap(core),
            GamePhase::GameOver => {}
        }
    }
    let input = &input;

    match core.phase {
        GamePhase::Menu => {
            if input.start {
                core.start();
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                core.restart();
            } else if input.menu {
                core.return_to_menu();
            }
        }
        GamePhase::Playing => {}
    }

    match core.phase {
        GamePhase::Menu => scroll_background(core),
        GamePhase::Playing => {
            if input.jump && core.bird.jump(&core.tuning) {
                core.events.push(GameEvent::Flapped);
            }
            step_playing(core);
        }
        // Everything is frozen except the bird's own death animation
        GamePhase::GameOver => {
            if let Some(event) = core.bird.update(&core.tuning) {
                handle_bird_event(core, event);
            }
        }
    }
}

fn step_playing(core: &mut GameCore) {
    if let Some(event) = core.bird.update(&core.tuning) {
        if event == BirdEvent::HitGround {
            core.end_run();
        }
        handle_bird_event(core, event);
        if core.phase != GamePhase::Playing {
            return;
        }
    }

    if core.spawner.tick() {
        core.spawn_pipe();
    }

    let speed = core.tuning.pipe_speed;
    for pipe in &mut core.pipes {
        pipe.update(speed);
    }

    // Each pipe scores once, the first tick its trailing edge is behind the bird
    let bird_x = core.bird.x;
    for pipe in &mut core.pipes {
        if pipe.mark_passed(bird_x) {
            core.scores.increment();
            core.events.push(GameEvent::Scored {
                score: core.scores.score(),
            });
        }
    }

    let bird_rect = core.bird.rect();
    let gap = core.tuning.pipe_gap;
    let hit = core
        .pipes
        .iter()
        .find_map(|pipe| bird_pipe_collision(&bird_rect, pipe, gap));

    if let Some(hit) = hit {
        core.bird.kill();
        core.events.push(GameEvent::HitPipe);
        emit_impact(&mut core.particles, &mut core.particle_rng, hit.point, 30);
        emit_feathers(
            &mut core.particles,
            &mut core.particle_rng,
            bird_rect.center(),
            15,
        );
        core.end_run();
    }

    core.pipes.retain(|pipe| !pipe.is_offscreen());

    if core.phase == GamePhase::Playing {
        scroll_background(core);
    }
}

fn handle_bird_event(core: &mut GameCore, event: BirdEvent) {
    match event {
        BirdEvent::HitGround | BirdEvent::Landed => {
            core.events.push(if event == BirdEvent::HitGround {
                GameEvent::HitGround
            } else {
                GameEvent::Landed
            });
            core.emit_ground_dust();
            // No bounces configured: the bird is already at rest
            if core.bird.is_resting() {
                settle(core);
            }
        }
        BirdEvent::Bounced => core.events.push(GameEvent::Bounced),
        BirdEvent::Settled => settle(core),
    }
}

fn settle(core: &mut GameCore) {
    core.bird_falling = false;
    core.events.push(GameEvent::Settled);
}

fn scroll_background(core: &mut GameCore) {
    core.background_x -= core.tuning.background_scroll_speed;
    if core.background_x <= -WINDOW_WIDTH {
        core.background_x = 0.0;
    }
}

/// Flap whenever the bird sinks below a line just above the next lower pipe
fn autopilot_wants_flap(core: &GameCore) -> bool {
    let bird = &core.bird;
    let target = core
        .pipes
        .iter()
        .find(|pipe| pipe.right() >= bird.x)
        .map(|pipe| {
            (pipe.gap_top + core.tuning.pipe_gap) as f32 - bird.height() - AUTOPILOT_MARGIN
        })
        .unwrap_or(GROUND_LINE * 0.5);
    bird.y > target && bird.velocity > -2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::persistence::MemoryStorage;
    use crate::sim::pipe::Pipe;
    use crate::tuning::Tuning;

    fn core_with(tuning: Tuning, storage: MemoryStorage) -> GameCore {
        GameCore::new(tuning, &Assets::builtin(), Box::new(storage), 12345)
    }

    fn core() -> GameCore {
        core_with(Tuning::default(), MemoryStorage::new())
    }

    /// Nearly weightless bird so it hovers at the spawn height
    fn floaty() -> Tuning {
        Tuning {
            gravity: 0.01,
            ..Tuning::default()
        }
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_menu_waits_for_start() {
        let mut core = core();
        assert_eq!(core.phase, GamePhase::Menu);
        let y = core.bird.y;
        for _ in 0..100 {
            tick(&mut core, &idle());
        }
        assert_eq!(core.phase, GamePhase::Menu);
        assert_eq!(core.bird.y, y);
        assert!(core.pipes.is_empty());
    }

    #[test]
    fn test_start_button_starts_without_flap() {
        let mut core = core();
        tick(&mut core, &start());
        assert_eq!(core.phase, GamePhase::Playing);
        assert_eq!(core.events, vec![GameEvent::Started]);
        assert!((core.bird.velocity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_jump_on_menu_is_ignored() {
        let mut core = core();
        let y = core.bird.y;
        for _ in 0..10 {
            tick(&mut core, &jump());
            assert_eq!(core.phase, GamePhase::Menu);
            assert!(core.events.is_empty());
        }
        assert_eq!(core.bird.y, y);
        assert_eq!(core.bird.velocity, 0.0);
        assert!(core.pipes.is_empty());

        tick(&mut core, &start());
        assert_eq!(core.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pipes_spawn_on_interval_while_playing() {
        let mut core = core_with(floaty(), MemoryStorage::new());
        tick(&mut core, &start());
        for _ in 0..43 {
            tick(&mut core, &idle());
        }
        assert!(core.pipes.is_empty());
        tick(&mut core, &idle());
        assert_eq!(core.pipes.len(), 1);
        // Spawned at the right edge, then scrolled this tick
        assert_eq!(core.pipes[0].x, WINDOW_WIDTH - 8.0);
    }

    #[test]
    fn test_each_pipe_scores_exactly_once() {
        let mut core = core_with(floaty(), MemoryStorage::new());
        tick(&mut core, &start());
        core.pipes.push(Pipe::new(100, 60.0, 300));
        core.pipes.push(Pipe::new(101, 200.0, 300));

        let mut scored = Vec::new();
        for _ in 0..40 {
            tick(&mut core, &idle());
            for event in &core.events {
                if let GameEvent::Scored { score } = event {
                    scored.push(*score);
                }
            }
        }
        assert_eq!(core.phase, GamePhase::Playing);
        assert_eq!(scored, vec![1, 2]);
        assert_eq!(core.score(), 2);
        // Both have scrolled off and been dropped
        assert!(core.pipes.iter().all(|p| p.id != 100));
    }

    #[test]
    fn test_pipe_collision_ends_run_same_tick() {
        let mut core = core_with(floaty(), MemoryStorage::new());
        tick(&mut core, &start());
        // Lower segment covers the bird
        core.pipes.push(Pipe::new(100, 120.0, 50));

        let mut ticks = 0;
        while core.phase == GamePhase::Playing && ticks < 20 {
            tick(&mut core, &idle());
            ticks += 1;
        }
        assert_eq!(core.phase, GamePhase::GameOver);
        assert!(core.events.contains(&GameEvent::HitPipe));
        assert!(core.bird.is_dead());
        assert!(core.bird_falling);
        assert!(!core.particles.is_empty());

        // Pipes are frozen after death
        let x = core.pipes[0].x;
        tick(&mut core, &idle());
        assert_eq!(core.pipes[0].x, x);
    }

    #[test]
    fn test_score_survives_collision_in_same_tick() {
        let mut core = core_with(floaty(), MemoryStorage::new());
        tick(&mut core, &start());
        // Passes the bird this tick
        core.pipes.push(Pipe::new(100, -29.0, 300));
        // Overlaps the bird this tick
        core.pipes.push(Pipe::new(101, 60.0, 0));

        tick(&mut core, &idle());
        assert!(core.events.contains(&GameEvent::Scored { score: 1 }));
        assert!(core.events.contains(&GameEvent::HitPipe));
        assert_eq!(core.phase, GamePhase::GameOver);
        assert_eq!(core.score(), 1);
        assert_eq!(core.high_score(), 1);
    }

    #[test]
    fn test_ground_death_plays_out_then_settles() {
        let mut core = core();
        tick(&mut core, &start());
        let mut events = Vec::new();
        for _ in 0..200 {
            tick(&mut core, &idle());
            events.extend(core.events.iter().copied());
        }
        assert_eq!(core.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::HitGround));
        assert!(events.contains(&GameEvent::Settled));
        assert!(!core.bird_falling);
        assert!(core.bird.is_resting());
        assert_eq!(core.bird.y, core.bird.rest_y());
    }

    #[test]
    fn test_jump_after_death_is_noop() {
        let mut core = core();
        tick(&mut core, &start());
        while core.phase == GamePhase::Playing {
            tick(&mut core, &idle());
        }
        tick(&mut core, &jump());
        assert_eq!(core.phase, GamePhase::GameOver);
        assert_eq!(core.bird.velocity, 0.0);
        assert!(!core.events.contains(&GameEvent::Flapped));
        assert!(core.bird.y <= core.bird.rest_y());
    }

    #[test]
    fn test_high_score_written_on_game_over() {
        let storage = MemoryStorage::with_contents("10");
        let mut core = core_with(Tuning::default(), storage.clone());
        assert_eq!(core.high_score(), 10);
        tick(&mut core, &start());
        for _ in 0..15 {
            core.scores.increment();
        }
        while core.phase == GamePhase::Playing {
            tick(&mut core, &idle());
        }
        assert_eq!(storage.contents().as_deref(), Some("15"));
        assert!(core.snapshot().new_high_score);
        assert!(core.events.contains(&GameEvent::GameOver {
            score: 15,
            new_high_score: true
        }));
    }

    #[test]
    fn test_lower_score_keeps_stored_best() {
        let storage = MemoryStorage::with_contents("10");
        let mut core = core_with(Tuning::default(), storage.clone());
        tick(&mut core, &start());
        for _ in 0..7 {
            core.scores.increment();
        }
        while core.phase == GamePhase::Playing {
            tick(&mut core, &idle());
        }
        assert_eq!(storage.contents().as_deref(), Some("10"));
        assert!(!core.snapshot().new_high_score);
    }

    #[test]
    fn test_restart_and_return_to_menu() {
        let mut core = core();
        tick(&mut core, &start());
        core.pipes.push(Pipe::new(100, 400.0, 200));
        core.scores.increment();
        while core.phase == GamePhase::Playing {
            tick(&mut core, &idle());
        }

        tick(
            &mut core,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(core.phase, GamePhase::Playing);
        assert!(core.events.contains(&GameEvent::Restarted));
        assert_eq!(core.score(), 0);
        assert!(core.pipes.is_empty());
        assert!(core.bird.is_alive());
        assert!(!core.bird_falling);
        assert!((core.bird.y - 370.9).abs() < 1e-4);

        while core.phase == GamePhase::Playing {
            tick(&mut core, &idle());
        }
        tick(
            &mut core,
            &TickInput {
                menu: true,
                ..Default::default()
            },
        );
        assert_eq!(core.phase, GamePhase::Menu);
        assert!(core.events.contains(&GameEvent::ReturnedToMenu));
        assert_eq!(core.bird.y, 370.0);
    }

    #[test]
    fn test_restart_ignored_outside_game_over() {
        let mut core = core();
        tick(
            &mut core,
            &TickInput {
                restart: true,
                menu: true,
                ..Default::default()
            },
        );
        assert_eq!(core.phase, GamePhase::Menu);
        tick(&mut core, &start());
        tick(
            &mut core,
            &TickInput {
                menu: true,
                ..Default::default()
            },
        );
        assert_eq!(core.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_stops_simulation() {
        let mut core = core();
        tick(
            &mut core,
            &TickInput {
                quit: true,
                ..Default::default()
            },
        );
        assert!(core.quit_requested());
        assert_eq!(core.time_ticks, 0);
    }

    #[test]
    fn test_background_scroll_wraps_and_freezes_on_game_over() {
        let mut core = core();
        for _ in 0..(WINDOW_WIDTH as usize - 1) {
            tick(&mut core, &idle());
        }
        assert_eq!(core.background_x, -(WINDOW_WIDTH - 1.0));
        tick(&mut core, &idle());
        assert_eq!(core.background_x, 0.0);

        tick(&mut core, &start());
        while core.phase == GamePhase::Playing {
            tick(&mut core, &idle());
        }
        let x = core.background_x;
        tick(&mut core, &idle());
        assert_eq!(core.background_x, x);
    }

    #[test]
    fn test_determinism() {
        // Two cores with the same seed produce identical pipes
        let mut a = core_with(floaty(), MemoryStorage::new());
        let mut b = core_with(floaty(), MemoryStorage::new());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        let gaps_a: Vec<i32> = a.pipes.iter().map(|p| p.gap_top).collect();
        let gaps_b: Vec<i32> = b.pipes.iter().map(|p| p.gap_top).collect();
        assert!(!gaps_a.is_empty());
        assert_eq!(gaps_a, gaps_b);
        assert_eq!(a.bird.y, b.bird.y);
        assert_eq!(a.score(), b.score());
    }
}
