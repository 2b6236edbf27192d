use serde::{Deserialize, Serialize};

use crate::soldier::{FRAME_COUNT, Soldier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    Idle,
    Move,
    Reload,
    Suicide,
    Dead,
}

impl FrameKind {
    pub const ANIMATED: [FrameKind; 4] = [
        FrameKind::Idle,
        FrameKind::Move,
        FrameKind::Reload,
        FrameKind::Suicide,
    ];

    pub fn frame_count(self) -> usize {
        match self {
            FrameKind::Dead => 1,
            _ => FRAME_COUNT,
        }
    }

    /// Only the idle, move and reload cycles have a survivor tint.
    pub fn has_tinted_variant(self) -> bool {
        matches!(self, FrameKind::Idle | FrameKind::Move | FrameKind::Reload)
    }
}

/// Which texture to draw for one soldier this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub kind: FrameKind,
    pub index: usize,
    pub tinted: bool,
}

impl SpriteFrame {
    fn new(kind: FrameKind, index: usize, designate: bool) -> Self {
        Self {
            kind,
            index: index.min(kind.frame_count() - 1),
            tinted: designate && kind.has_tinted_variant(),
        }
    }
}

/// Picks the texture for `soldier`. `finale_frame` is set only for the soldier
/// currently playing its own finale.
pub fn select_frame(soldier: &Soldier, finale_frame: Option<u32>) -> SpriteFrame {
    let designate = soldier.is_survivor_designate();

    if let Some(frame) = finale_frame {
        return SpriteFrame::new(FrameKind::Suicide, frame as usize, false);
    }

    if !soldier.is_alive() {
        return SpriteFrame::new(FrameKind::Dead, 0, false);
    }

    if soldier.is_walking() {
        return SpriteFrame::new(FrameKind::Move, soldier.idle_counter(), designate);
    }

    let counter = soldier.counter() as usize;
    if counter > 0 && counter < FRAME_COUNT {
        return SpriteFrame::new(FrameKind::Reload, counter, designate);
    }

    SpriteFrame::new(FrameKind::Idle, soldier.idle_counter(), designate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Point;

    fn soldier() -> Soldier {
        Soldier::new(Point::new(0.0, -50.0), 90, 7)
    }

    #[test]
    fn resting_soldier_uses_idle_cycle() {
        let frame = select_frame(&soldier(), None);
        assert_eq!(frame.kind, FrameKind::Idle);
        assert_eq!(frame.index, 7);
        assert!(!frame.tinted);
    }

    #[test]
    fn walking_soldier_uses_move_cycle() {
        let mut walker = soldier();
        walker.murder();
        let frame = select_frame(&walker, None);
        assert_eq!(frame.kind, FrameKind::Move);
        assert_eq!(frame.index, 7);
    }

    #[test]
    fn dead_soldier_is_never_tinted() {
        let mut body = soldier();
        body.designate_survivor();
        body.kill();
        let frame = select_frame(&body, None);
        assert_eq!(frame.kind, FrameKind::Dead);
        assert!(!frame.tinted);
    }

    #[test]
    fn survivor_designate_gets_tinted_idle() {
        let mut designate = soldier();
        designate.designate_survivor();
        let frame = select_frame(&designate, None);
        assert_eq!(frame.kind, FrameKind::Idle);
        assert!(frame.tinted);
    }

    #[test]
    fn finale_takes_priority_and_stays_untinted() {
        let mut last = soldier();
        last.designate_survivor();
        let frame = select_frame(&last, Some(4));
        assert_eq!(frame.kind, FrameKind::Suicide);
        assert_eq!(frame.index, 4);
        assert!(!frame.tinted);
    }
}
