//! Per-frame driver
//!
//! One call to [`App::frame`] per display frame: handle the input batch,
//! advance the simulation once, forward its events to audio and the
//! cosmetic view-models, then build and present the frame.

use crate::audio::AudioSink;
use crate::catalog::Catalog;
use crate::consts::MAX_DT;
use crate::input::{InputEvent, wants_quit};
use crate::layout::{Hit, Viewport, hit_test};
use crate::renderer::{RenderSink, SceneExtras, build_frame};
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, TickInput, tick};
use crate::ui::{EndScreen, Mascot};

/// Salt for the end screen's cosmetic RNG
const END_SCREEN_SALT: u64 = 0x5eed_0f_e4d5;
/// Step between successive run seeds after a restart
const RESTART_SEED_STEP: u64 = 0x9e37_79b9_7f4a_7c15;

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Game plus everything cosmetic kept alongside it
pub struct App {
    pub state: GameState,
    pub settings: Settings,
    pub viewport: Viewport,
    pub mascot: Mascot,
    pub end_screen: Option<EndScreen>,
    base_seed: u64,
    restarts: u64,
    /// Presentation clock (seconds since start)
    clock: f32,
}

impl App {
    pub fn new(settings: Settings, catalog: Catalog, seed: u64) -> Self {
        let settings = settings.sanitized();
        let state = GameState::with_particle_cap(seed, catalog, settings.max_particles());
        let viewport = Viewport::new(settings.window_width as f32, settings.window_height as f32);
        log::info!(
            "New run: seed {seed}, quality {}, {} recipes",
            settings.quality.as_str(),
            state.catalog.recipes().len()
        );
        Self {
            state,
            settings,
            viewport,
            mascot: Mascot::default(),
            end_screen: None,
            base_seed: seed,
            restarts: 0,
            clock: 0.0,
        }
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Start over from level 1 (from any phase)
    pub fn restart(&mut self) {
        self.restarts += 1;
        let seed = self
            .base_seed
            .wrapping_add(self.restarts.wrapping_mul(RESTART_SEED_STEP));
        log::info!("Restart #{} (seed {seed})", self.restarts);
        self.state.reset(seed);
        self.end_screen = None;
        self.mascot = Mascot::default();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width as f32, height as f32);
    }

    /// Resolve a window-space click to a command
    pub fn command_for_click(&self, x: f32, y: f32) -> Option<Command> {
        let p = self.viewport.to_design(x, y);
        hit_test(&self.state.catalog, p).map(|hit| match hit {
            Hit::Ingredient(id) => Command::AddIngredient(id),
            Hit::Serve => Command::Serve,
            Hit::Undo => Command::Undo,
        })
    }

    /// Run one frame
    pub fn frame(
        &mut self,
        events: &[InputEvent],
        dt: f32,
        audio: &mut dyn AudioSink,
        sink: &mut dyn RenderSink,
    ) -> Flow {
        if wants_quit(events) {
            log::info!("Quit requested (score {})", self.state.score);
            audio.stop();
            return Flow::Quit;
        }

        let mut commands = Vec::new();
        for event in events {
            match *event {
                InputEvent::Restart => {
                    // Anything clicked before the restart belonged to the old run
                    commands.clear();
                    self.restart();
                }
                InputEvent::Click { x, y } => commands.extend(self.command_for_click(x, y)),
                InputEvent::Quit => {}
            }
        }

        let dt = dt.clamp(0.0, MAX_DT);
        tick(&mut self.state, &TickInput::new(commands), dt);

        for event in self.state.take_events() {
            match event {
                GameEvent::Cue(cue) => audio.play(cue),
                GameEvent::Mascot(mood) => self.mascot.react(mood),
                GameEvent::LevelCleared { level } => log::debug!("Level {level} cleared"),
                GameEvent::LevelStarted { level } => log::debug!("Level {level} started"),
                GameEvent::GameOver { win, score } => {
                    self.end_screen = Some(EndScreen::new(
                        win,
                        score,
                        self.state.stars_earned,
                        self.state.level,
                        self.state.seed ^ END_SCREEN_SALT,
                    ));
                }
            }
        }

        self.clock += dt;
        self.mascot.update(dt);
        if let Some(end) = self.end_screen.as_mut() {
            end.update(dt);
        }
        audio.update_music();

        let frame = build_frame(
            &self.state,
            SceneExtras {
                mascot: &self.mascot,
                end_screen: self.end_screen.as_ref(),
                settings: &self.settings,
            },
            self.clock,
        );
        sink.present(&frame);
        Flow::Continue
    }
}
