use std::sync::OnceLock;

use josephus_core::{
    CircleConfig, CircleLayout, ConfigError, Phase, SimulationClock, TickSource, TurnSequencer,
    ViewerSettings, josephus_survivor,
};
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;

use crate::soldier::{SoldierDrawConfig, draw_soldier};
use crate::sprites::SpriteTextures;

mod soldier;
pub mod sprites;

pub use sprites::AssetError;

/// More owed ticks than this per rendered frame are dropped.
const MAX_TICKS_PER_FRAME: u32 = 8;
const HUD_FONT_SIZE: f32 = 22.0;
const HUD_LINE_HEIGHT: f32 = 24.0;
const HUD_MARGIN: f32 = 16.0;

/// Wall clock in milliseconds since the window opened.
pub struct MacroquadTicks;

impl TickSource for MacroquadTicks {
    fn now_ms(&self) -> f64 {
        get_time() * 1000.0
    }
}

pub struct GameState {
    circle: CircleConfig,
    sequencer: TurnSequencer,
    clock: SimulationClock,
    sprites: SpriteTextures,
    soldier_draw: SoldierDrawConfig,
}

impl GameState {
    pub fn new(circle: CircleConfig, settings: &ViewerSettings, sprites: SpriteTextures) -> Self {
        let viewport = screen_width().min(screen_height());
        let layout = CircleLayout::for_viewport(circle.soldiers, viewport);
        let sequencer = TurnSequencer::for_circle(&circle, layout.radius, settings.spare_survivor);
        let clock = SimulationClock::new(settings.velocity, MacroquadTicks.now_ms());

        log::info!(
            "{} soldiers, every {} is eliminated, velocity {}",
            circle.soldiers,
            circle.step,
            settings.velocity
        );

        Self {
            circle,
            sequencer,
            clock,
            sprites,
            soldier_draw: SoldierDrawConfig::for_layout(&layout),
        }
    }

    pub fn handle_input(&mut self) {
        if is_key_pressed(KeyCode::Key1) {
            self.clock.speed_up();
            log::debug!("velocity {}", self.clock.velocity());
        }
        if is_key_pressed(KeyCode::Key2) {
            self.clock.slow_down();
            log::debug!("velocity {}", self.clock.velocity());
        }
    }

    pub fn update(&mut self, source: &impl TickSource) {
        for _ in 0..self.clock.due_ticks(source, MAX_TICKS_PER_FRAME) {
            self.sequencer.tick();
        }
    }

    pub fn render(&self) {
        clear_background(BLACK);
        let circle_center = vec2(screen_width() * 0.5, screen_height() * 0.5);

        for (soldier, frame) in self
            .sequencer
            .soldiers()
            .iter()
            .zip(self.sequencer.frames())
        {
            if let Some(texture) = self.sprites.get(frame) {
                draw_soldier(texture, soldier, frame, circle_center, &self.soldier_draw);
            }
        }

        let status = HudStatus {
            circle: self.circle,
            velocity: self.clock.velocity(),
            eliminated: self.sequencer.eliminated().len(),
            phase: self.sequencer.phase(),
        };
        for (row, line) in hud_lines(&status).iter().enumerate() {
            draw_text(
                line,
                HUD_MARGIN,
                HUD_MARGIN + HUD_LINE_HEIGHT * (row as f32 + 1.0),
                HUD_FONT_SIZE,
                WHITE,
            );
        }
    }
}

struct HudStatus {
    circle: CircleConfig,
    velocity: i32,
    eliminated: usize,
    phase: Phase,
}

fn hud_lines(status: &HudStatus) -> Vec<String> {
    let CircleConfig { soldiers, step } = status.circle;
    let mut lines = vec![
        format!("N = {soldiers}, K = {step}"),
        format!("velocity {} (1 faster, 2 slower)", status.velocity),
        format!("eliminated {}/{}", status.eliminated, soldiers),
    ];

    lines.push(match status.phase {
        Phase::Executing => format!(
            "predicted survivor: soldier {}",
            josephus_survivor(soldiers, step)
        ),
        Phase::Finale => "the last soldier takes the final turn".to_string(),
        Phase::Finished {
            survivor: Some(index),
        } => format!("survivor: soldier {}", index + 1),
        Phase::Finished { survivor: None } => "nobody survived".to_string(),
    });

    lines
}

/// Settings file contents, `Ok(None)` when there is no file. The browser build
/// has no filesystem and always uses defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> Result<Option<ViewerSettings>, ConfigError> {
    ViewerSettings::load(std::path::Path::new(josephus_core::SETTINGS_FILE))
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> Result<Option<ViewerSettings>, ConfigError> {
    Ok(None)
}

/// Settings after falling back to defaults. `problem` keeps a load failure
/// until logging is up to report it.
#[derive(Debug)]
pub struct StartupSettings {
    pub settings: ViewerSettings,
    pub problem: Option<ConfigError>,
}

impl StartupSettings {
    fn resolve(loaded: Result<Option<ViewerSettings>, ConfigError>) -> Self {
        match loaded {
            Ok(settings) => Self {
                settings: settings.unwrap_or_default(),
                problem: None,
            },
            Err(err) => Self {
                settings: ViewerSettings::default(),
                problem: Some(err),
            },
        }
    }
}

/// Read once, when the window is configured; `run` reuses the same result.
pub fn startup_settings() -> &'static StartupSettings {
    static STARTUP_SETTINGS: OnceLock<StartupSettings> = OnceLock::new();
    STARTUP_SETTINGS.get_or_init(|| StartupSettings::resolve(load_settings()))
}

pub async fn run() {
    install_panic_hook();
    init_logging();

    let startup = startup_settings();
    if let Some(problem) = &startup.problem {
        log::warn!("{problem}, using default settings");
    }
    let settings = &startup.settings;

    let (circle, warnings) = CircleConfig::from_args(std::env::args().skip(1));
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let sprites = match SpriteTextures::load(&settings.asset_root).await {
        Ok(sprites) => sprites,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let mut game = GameState::new(circle, settings, sprites);

    loop {
        game.handle_input();
        game.update(&MacroquadTicks);
        game.render();

        next_frame().await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}
