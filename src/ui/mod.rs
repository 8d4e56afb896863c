//! Presentation state that sits on top of the simulation
//!
//! Nothing here feeds back into `GameCore`; drivers read it to decide what
//! to show and which menu inputs to forward.

use crate::consts::{
    DEATH_SCREEN_DELAY_MS, OVERLAY_FADE_STEP, OVERLAY_MAX_ALPHA, OVERLAY_SHOW_ALPHA,
};
use crate::ms_to_ticks;
use crate::sim::{GamePhase, Snapshot};

/// Fade-in of the game-over screen once the bird has come to rest
#[derive(Debug, Clone)]
pub struct DeathOverlay {
    delay_ticks: u32,
    /// Ticks spent resting on the ground
    grounded_ticks: u32,
    fade_alpha: u8,
}

impl Default for DeathOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl DeathOverlay {
    pub fn new() -> Self {
        Self {
            delay_ticks: ms_to_ticks(DEATH_SCREEN_DELAY_MS),
            grounded_ticks: 0,
            fade_alpha: 0,
        }
    }

    /// Advance one tick against the latest snapshot
    pub fn update(&mut self, snapshot: &Snapshot) {
        if snapshot.phase != GamePhase::GameOver {
            self.reset();
            return;
        }
        if snapshot.bird_falling {
            return;
        }
        if self.grounded_ticks < self.delay_ticks {
            self.grounded_ticks += 1;
            return;
        }
        self.fade_alpha = self.fade_alpha.saturating_add(OVERLAY_FADE_STEP);
    }

    pub fn reset(&mut self) {
        self.grounded_ticks = 0;
        self.fade_alpha = 0;
    }

    /// Alpha of the darkening quad (0-255)
    pub fn alpha(&self) -> u8 {
        self.fade_alpha.min(OVERLAY_MAX_ALPHA)
    }

    /// Game-over text and buttons are shown (and accept input)
    pub fn is_visible(&self) -> bool {
        self.fade_alpha > OVERLAY_SHOW_ALPHA
    }
}

/// Score HUD shows during a run and hides behind the game-over screen
pub fn hud_visible(snapshot: &Snapshot, overlay: &DeathOverlay) -> bool {
    snapshot.phase != GamePhase::Menu && !overlay.is_visible()
}

/// Score lines drawn while a run is on screen
pub fn hud_lines(snapshot: &Snapshot) -> Vec<String> {
    match snapshot.phase {
        GamePhase::Menu => Vec::new(),
        GamePhase::Playing | GamePhase::GameOver => vec![
            format!("Score: {}", snapshot.score),
            format!("High Score: {}", snapshot.high_score),
        ],
    }
}

/// Text of the game-over screen
pub fn game_over_lines(snapshot: &Snapshot) -> Vec<String> {
    let best = if snapshot.new_high_score {
        "New High Score!".to_string()
    } else {
        format!("High Score: {}", snapshot.high_score)
    };
    vec!["Game Over".to_string(), format!("Score: {}", snapshot.score), best]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::persistence::MemoryStorage;
    use crate::sim::{GameCore, TickInput, tick};
    use crate::tuning::Tuning;

    fn dead_core(stored: &str) -> GameCore {
        let mut core = GameCore::new(
            Tuning::default(),
            &Assets::builtin(),
            Box::new(MemoryStorage::with_contents(stored)),
            7,
        );
        tick(
            &mut core,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        while core.phase == GamePhase::Playing {
            tick(&mut core, &TickInput::default());
        }
        core
    }

    #[test]
    fn test_overlay_waits_for_bird_then_delay() {
        let mut core = dead_core("0");
        let mut overlay = DeathOverlay::new();

        while core.bird_falling {
            overlay.update(&core.snapshot());
            assert_eq!(overlay.alpha(), 0);
            tick(&mut core, &TickInput::default());
        }

        // 30 ticks of delay, then +5 per tick until past 128
        let mut ticks = 0;
        while !overlay.is_visible() {
            overlay.update(&core.snapshot());
            tick(&mut core, &TickInput::default());
            ticks += 1;
        }
        assert_eq!(ticks, 30 + 26);
        assert_eq!(overlay.alpha(), 130);

        for _ in 0..100 {
            overlay.update(&core.snapshot());
        }
        assert_eq!(overlay.alpha(), OVERLAY_MAX_ALPHA);
    }

    #[test]
    fn test_overlay_resets_on_restart() {
        let mut core = dead_core("0");
        let mut overlay = DeathOverlay::new();
        for _ in 0..300 {
            tick(&mut core, &TickInput::default());
            overlay.update(&core.snapshot());
        }
        assert!(overlay.is_visible());

        tick(
            &mut core,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        overlay.update(&core.snapshot());
        assert!(!overlay.is_visible());
        assert_eq!(overlay.alpha(), 0);
    }

    #[test]
    fn test_hud_hidden_once_game_over_shows() {
        let mut core = dead_core("0");
        let mut overlay = DeathOverlay::new();
        assert!(hud_visible(&core.snapshot(), &overlay));

        while !overlay.is_visible() {
            tick(&mut core, &TickInput::default());
            overlay.update(&core.snapshot());
        }
        assert!(!hud_visible(&core.snapshot(), &overlay));

        tick(
            &mut core,
            &TickInput {
                menu: true,
                ..Default::default()
            },
        );
        overlay.update(&core.snapshot());
        assert_eq!(core.phase, GamePhase::Menu);
        assert!(!hud_visible(&core.snapshot(), &overlay));

        tick(
            &mut core,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        overlay.update(&core.snapshot());
        assert!(hud_visible(&core.snapshot(), &overlay));
    }

    #[test]
    fn test_text_lines() {
        let core = dead_core("4");
        let snapshot = core.snapshot();
        assert_eq!(hud_lines(&snapshot), vec!["Score: 0", "High Score: 4"]);
        assert_eq!(game_over_lines(&snapshot)[2], "High Score: 4");

        let mut snapshot = snapshot;
        snapshot.score = 9;
        snapshot.new_high_score = true;
        assert_eq!(
            game_over_lines(&snapshot),
            vec!["Game Over", "Score: 9", "New High Score!"]
        );

        snapshot.phase = GamePhase::Menu;
        assert!(hud_lines(&snapshot).is_empty());
    }
}
