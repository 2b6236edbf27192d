pub mod circle;
pub mod clock;
pub mod config;
pub mod coordinates;
pub mod counting;
pub mod frames;
pub mod sequencer;
pub mod soldier;

pub use circle::{CircleLayout, SpriteSize, arrange_in_circle};
pub use clock::{DEFAULT_VELOCITY, ManualTicks, SimulationClock, TickSource};
pub use config::{CircleConfig, ConfigError, ConfigWarning, SETTINGS_FILE, ViewerSettings};
pub use coordinates::Point;
pub use counting::{CountingQueue, elimination_order, josephus_survivor};
pub use frames::{FrameKind, SpriteFrame, select_frame};
pub use sequencer::{Phase, TurnSequencer};
pub use soldier::{FRAME_COUNT, Home, Soldier, Stage};
