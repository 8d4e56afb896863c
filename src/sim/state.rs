//! Game phases and the simulation core
//!
//! `GameCore` is the single owner of all gameplay state. A driver feeds it
//! one `TickInput` per tick and reads back a `Snapshot` for rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::particles::{Particle, emit_dust};
use super::pipe::{Pipe, PipeSpawner};
use crate::assets::Assets;
use crate::consts::GROUND_LINE;
use crate::highscores::ScoreStore;
use crate::persistence::ScoreStorage;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start trigger
    Menu,
    /// Active run
    Playing,
    /// Run ended; the bird may still be falling
    GameOver,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u64 },
    HitPipe,
    HitGround,
    Landed,
    Bounced,
    Settled,
    GameOver { score: u64, new_high_score: bool },
    Restarted,
    ReturnedToMenu,
}

/// Stream offset for the visual RNG so particles never share the pipe stream
const PARTICLE_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug)]
pub struct GameCore {
    pub tuning: Tuning,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) particle_rng: Pcg32,
    pub phase: GamePhase,
    /// Set on game over until the bird's death animation settles
    pub bird_falling: bool,
    pub bird: Bird,
    /// Active pipes in spawn order
    pub pipes: Vec<Pipe>,
    pub spawner: PipeSpawner,
    pub scores: ScoreStore,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Background scroll offset (0 to -WINDOW_WIDTH)
    pub background_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) quit_requested: bool,
    next_id: u32,
}

impl GameCore {
    /// Create a core in the menu, loading the best score from `storage`
    pub fn new(tuning: Tuning, assets: &Assets, storage: Box<dyn ScoreStorage>, seed: u64) -> Self {
        let spawner = PipeSpawner::from_tuning(&tuning);
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            particle_rng: Pcg32::seed_from_u64(seed ^ PARTICLE_STREAM),
            phase: GamePhase::Menu,
            bird_falling: false,
            bird: Bird::new(assets.bird),
            pipes: Vec::new(),
            spawner,
            scores: ScoreStore::load(storage),
            particles: Vec::new(),
            background_x: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            quit_requested: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> u64 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u64 {
        self.scores.high_score()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Spawn a pipe at the right edge
    pub fn spawn_pipe(&mut self) {
        let id = self.next_entity_id();
        let pipe = self.spawner.spawn(id, &mut self.rng, &self.tuning);
        self.pipes.push(pipe);
    }

    /// Clear everything a run leaves behind
    fn reset_run(&mut self) {
        self.bird.reset();
        self.pipes.clear();
        self.spawner.reset();
        self.scores.reset();
        self.particles.clear();
        self.bird_falling = false;
    }

    /// Menu -> Playing
    pub(crate) fn start(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Run started");
    }

    /// GameOver -> Playing
    pub(crate) fn restart(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    /// GameOver -> Menu (score discarded, best already persisted)
    pub(crate) fn return_to_menu(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
        log::info!("Returned to menu");
    }

    /// Playing -> GameOver, persisting the best score
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.bird_falling = true;
        let new_high_score = self.scores.is_new_high_score();
        self.scores.save_high_score();
        let score = self.scores.score();
        self.events.push(GameEvent::GameOver {
            score,
            new_high_score,
        });
        log::info!(
            "Game over: score {} (best {}){}",
            score,
            self.scores.high_score(),
            if new_high_score { " - new high score!" } else { "" }
        );
    }

    /// Dust where the bird meets the ground
    pub(crate) fn emit_ground_dust(&mut self) {
        let at = Vec2::new(self.bird.x + self.bird.width() / 2.0, GROUND_LINE);
        emit_dust(&mut self.particles, &mut self.particle_rng, at, 25);
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            bird_falling: self.bird_falling,
            bird: BirdView {
                x: self.bird.x,
                y: self.bird.y,
                width: self.bird.width(),
                height: self.bird.height(),
                tilt: self.bird.tilt,
                wing_frame: self.bird.wing_frame,
                alive: self.bird.is_alive(),
            },
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    gap_top: p.gap_top,
                    gap: self.tuning.pipe_gap,
                })
                .collect(),
            particles: self.particles.clone(),
            score: self.scores.score(),
            high_score: self.scores.high_score(),
            new_high_score: self.scores.is_new_high_score(),
            background_x: self.background_x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub tilt: f32,
    pub wing_frame: u8,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeView {
    pub x: f32,
    pub gap_top: i32,
    pub gap: i32,
}

/// Everything the presentation layer may look at
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub bird_falling: bool,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub high_score: u64,
    pub new_high_score: bool,
    pub background_x: f32,
}
