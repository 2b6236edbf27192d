use crate::coordinates::{Point, heading_degrees, opposite_degrees};

/// Units per tick while walking to the center or back home.
pub const MOVE_SPEED: f32 = 2.0;
/// Degrees per tick while turning.
pub const ROTATION_STEP: i32 = 2;
/// Ticks the executioner holds the strike before turning away.
pub const STRIKE_PAUSE_TICKS: u32 = 20;
/// Length of every animation cycle.
pub const FRAME_COUNT: usize = 20;

/// Where a soldier stood, and which way it will face on the way back, when its
/// turn as executioner started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Home {
    pub position: Point,
    pub rotation: i32,
}

/// One elimination sequence, in order. Every stage that still has to find its
/// way back carries the home snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Idle,
    MovingToCenter(Home),
    RotatingToFace(Home),
    StrikeHold(Home),
    MovingHome(Home),
    RotatingToRest,
}

impl Stage {
    pub fn index(&self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::MovingToCenter(_) => 1,
            Stage::RotatingToFace(_) => 2,
            Stage::StrikeHold(_) => 3,
            Stage::MovingHome(_) => 4,
            Stage::RotatingToRest => 5,
        }
    }

    pub fn home(&self) -> Option<Home> {
        match *self {
            Stage::MovingToCenter(home)
            | Stage::RotatingToFace(home)
            | Stage::StrikeHold(home)
            | Stage::MovingHome(home) => Some(home),
            Stage::Idle | Stage::RotatingToRest => None,
        }
    }

    fn next(self) -> Stage {
        match self {
            Stage::Idle => Stage::Idle,
            Stage::MovingToCenter(home) => Stage::RotatingToFace(home),
            Stage::RotatingToFace(home) => Stage::StrikeHold(home),
            Stage::StrikeHold(home) => Stage::MovingHome(home),
            Stage::MovingHome(_) => Stage::RotatingToRest,
            Stage::RotatingToRest => Stage::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Soldier {
    position: Point,
    rotation: i32,
    target_rotation: i32,
    stage: Stage,
    idle_counter: usize,
    counter: u32,
    alive: bool,
    survivor_designate: bool,
}

impl Soldier {
    pub fn new(position: Point, rotation: i32, idle_counter: usize) -> Self {
        Self {
            position,
            rotation,
            target_rotation: rotation,
            stage: Stage::Idle,
            idle_counter: idle_counter % FRAME_COUNT,
            counter: 0,
            alive: true,
            survivor_designate: false,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn target_rotation(&self) -> i32 {
        self.target_rotation
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn idle_counter(&self) -> usize {
        self.idle_counter
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    /// Walking, either toward the center or back home.
    pub fn is_walking(&self) -> bool {
        matches!(self.stage, Stage::MovingToCenter(_) | Stage::MovingHome(_))
    }

    pub fn is_survivor_designate(&self) -> bool {
        self.survivor_designate
    }

    pub fn designate_survivor(&mut self) {
        self.survivor_designate = true;
    }

    /// Marks the soldier dead. Returns true only on the call that actually
    /// killed it.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Starts an elimination sequence. Ignored unless the soldier is idle.
    pub fn murder(&mut self) {
        if self.stage != Stage::Idle {
            return;
        }
        self.counter = 0;
        self.stage = Stage::MovingToCenter(Home {
            position: self.position,
            rotation: opposite_degrees(self.rotation),
        });
    }

    pub fn move_to_position(&mut self) {
        match self.stage {
            Stage::MovingToCenter(_) => self.move_toward(Point::ORIGIN, MOVE_SPEED),
            Stage::MovingHome(home) => self.move_toward(home.position, MOVE_SPEED),
            _ => {}
        }
    }

    /// One movement step toward `target`. Arrival is detected before moving, so
    /// the stage changes on the call after the position snaps onto `target`.
    pub fn move_toward(&mut self, target: Point, speed: f32) {
        if self.position == target {
            match self.stage {
                Stage::MovingToCenter(home) => self.stage = Stage::RotatingToFace(home),
                Stage::MovingHome(_) => {
                    self.stage = Stage::RotatingToRest;
                    self.target_rotation = opposite_degrees(self.rotation);
                }
                _ => {}
            }
        }

        let distance = self.position.distance_to(target);
        if distance < speed {
            self.position = target;
        } else {
            let dx = target.x - self.position.x;
            let dy = target.y - self.position.y;
            self.position.x += dx / distance * speed;
            self.position.y += dy / distance * speed;
        }
    }

    /// Aims at the victim while walking in and while turning toward it.
    pub fn face(&mut self, victim: Point) {
        if matches!(
            self.stage,
            Stage::MovingToCenter(_) | Stage::RotatingToFace(_)
        ) {
            self.target_rotation = heading_degrees(self.position, victim);
        }
    }

    /// After the strike pause, aims back toward home.
    pub fn rotate_to_original(&mut self) {
        if let Stage::StrikeHold(home) = self.stage {
            if self.counter >= STRIKE_PAUSE_TICKS {
                self.target_rotation = home.rotation;
            }
        }
    }

    pub fn update_rotation(&mut self) {
        match self.stage {
            Stage::Idle | Stage::MovingToCenter(_) | Stage::MovingHome(_) => return,
            Stage::StrikeHold(_) => {
                let holding = self.counter < STRIKE_PAUSE_TICKS;
                self.counter += 1;
                if holding {
                    return;
                }
            }
            Stage::RotatingToFace(_) | Stage::RotatingToRest => {}
        }

        if self.rotation == self.target_rotation {
            self.stage = self.stage.next();
            return;
        }

        if (self.rotation - self.target_rotation).abs() == 1 {
            self.rotation = self.target_rotation;
            return;
        }

        if self.rotation > self.target_rotation {
            self.rotation -= ROTATION_STEP;
        } else {
            self.rotation += ROTATION_STEP;
        }
    }

    pub(crate) fn advance_idle_frame(&mut self) {
        self.idle_counter = (self.idle_counter + 1) % FRAME_COUNT;
    }

    /// Returns the current finale frame and moves on to the next one.
    pub(crate) fn take_finale_frame(&mut self) -> u32 {
        let frame = self.counter;
        self.counter += 1;
        frame
    }

    /// Ends the self-inflicted finale: back to idle, and dead.
    pub(crate) fn collapse(&mut self) -> bool {
        self.stage = Stage::Idle;
        self.kill()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn soldier_at(x: f32, y: f32, rotation: i32) -> Soldier {
        Soldier::new(Point::new(x, y), rotation, 0)
    }

    fn tick_toward(soldier: &mut Soldier, victim: Point) {
        soldier.move_to_position();
        soldier.face(victim);
        soldier.rotate_to_original();
        soldier.update_rotation();
    }

    #[test]
    fn murder_snapshots_home_and_faces_away() {
        let mut soldier = soldier_at(0.0, -100.0, 90);
        soldier.murder();

        assert_eq!(soldier.stage().index(), 1);
        let home = soldier.stage().home().unwrap();
        assert_eq!(home.position, Point::new(0.0, -100.0));
        assert_eq!(home.rotation, 270);
        assert_eq!(soldier.counter(), 0);
    }

    #[test]
    fn murder_is_ignored_mid_sequence() {
        let mut soldier = soldier_at(0.0, -100.0, 90);
        soldier.murder();
        soldier.move_to_position();
        let before = soldier.clone();
        soldier.murder();
        assert_eq!(soldier, before);
    }

    #[test]
    fn move_toward_already_arrived_advances_on_same_call() {
        let mut soldier = soldier_at(0.0, 0.0, 90);
        soldier.murder();
        soldier.move_toward(Point::ORIGIN, MOVE_SPEED);
        assert_eq!(soldier.stage().index(), 2);
        assert_eq!(soldier.position(), Point::ORIGIN);
    }

    #[test]
    fn snapping_onto_target_advances_on_following_call() {
        let mut soldier = soldier_at(0.0, -1.5, 90);
        soldier.murder();
        soldier.move_to_position();
        assert_eq!(soldier.position(), Point::ORIGIN);
        assert_eq!(soldier.stage().index(), 1);
        soldier.move_to_position();
        assert_eq!(soldier.stage().index(), 2);
    }

    #[test]
    fn arriving_home_turns_back_toward_center() {
        let mut soldier = soldier_at(0.0, -4.0, 90);
        soldier.murder();
        let home = soldier.stage().home().unwrap();
        soldier.position = Point::new(0.0, -4.0);
        soldier.rotation = 270;
        soldier.stage = Stage::MovingHome(home);

        soldier.move_to_position();
        assert_eq!(soldier.stage(), Stage::RotatingToRest);
        assert_eq!(soldier.target_rotation(), 90);
    }

    #[test]
    fn rotation_snaps_when_one_degree_away() {
        let mut soldier = soldier_at(0.0, 0.0, 91);
        soldier.stage = Stage::RotatingToRest;
        soldier.target_rotation = 90;
        soldier.update_rotation();
        assert_eq!(soldier.rotation(), 90);
        assert_eq!(soldier.stage(), Stage::RotatingToRest);
        soldier.update_rotation();
        assert_eq!(soldier.stage(), Stage::Idle);
    }

    #[test]
    fn strike_hold_keeps_facing_during_pause() {
        let victim = Point::new(100.0, 0.0);
        let mut soldier = soldier_at(0.0, 0.0, 0);
        soldier.murder();
        let home = soldier.stage().home().unwrap();
        soldier.stage = Stage::StrikeHold(home);

        for _ in 0..STRIKE_PAUSE_TICKS {
            tick_toward(&mut soldier, victim);
            assert_eq!(soldier.rotation(), 0);
            assert_eq!(soldier.target_rotation(), 0);
            assert!(matches!(soldier.stage(), Stage::StrikeHold(_)));
        }
        assert_eq!(soldier.counter(), STRIKE_PAUSE_TICKS);

        tick_toward(&mut soldier, victim);
        assert_eq!(soldier.target_rotation(), home.rotation);
        assert_eq!(soldier.rotation(), ROTATION_STEP);
    }

    #[test]
    fn full_sequence_returns_home_facing_center() {
        let victim = Point::new(100.0, 0.0);
        let mut soldier = soldier_at(0.0, -60.0, 90);
        soldier.murder();

        let mut stages_seen = vec![soldier.stage().index()];
        let mut ticks = 0;
        while !soldier.is_idle() {
            tick_toward(&mut soldier, victim);
            let index = soldier.stage().index();
            if stages_seen.last() != Some(&index) {
                stages_seen.push(index);
            }
            ticks += 1;
            assert!(ticks < 10_000, "sequence never finished");
        }

        assert_eq!(stages_seen, vec![1, 2, 3, 4, 5, 0]);
        assert_eq!(soldier.position(), Point::new(0.0, -60.0));
        assert_eq!(soldier.rotation(), 90);
    }

    #[test]
    fn kill_reports_only_first_death() {
        let mut soldier = soldier_at(1.0, 1.0, 0);
        assert!(soldier.kill());
        assert!(!soldier.kill());
        assert!(!soldier.is_alive());
    }

    proptest! {
        #[test]
        fn rotation_stepping_terminates(start in 0i32..360, target in 0i32..360) {
            let mut soldier = soldier_at(0.0, 0.0, start);
            soldier.stage = Stage::RotatingToRest;
            soldier.target_rotation = target;

            let mut previous = (start - target).abs();
            let mut ticks = 0;
            while soldier.stage() != Stage::Idle {
                soldier.update_rotation();
                let gap = (soldier.rotation() - target).abs();
                prop_assert!(gap <= previous);
                previous = gap;
                ticks += 1;
                prop_assert!(ticks <= 200);
            }
            prop_assert_eq!(soldier.rotation(), target);
        }

        #[test]
        fn movement_lands_exactly_on_target(
            sx in -2000.0f32..2000.0,
            sy in -2000.0f32..2000.0,
            tx in -2000.0f32..2000.0,
            ty in -2000.0f32..2000.0,
        ) {
            let target = Point::new(tx, ty);
            let mut soldier = soldier_at(sx, sy, 0);
            let mut ticks = 0;
            while soldier.position() != target {
                soldier.move_toward(target, MOVE_SPEED);
                ticks += 1;
                prop_assert!(ticks <= 5000);
            }
            prop_assert_eq!(soldier.position(), target);
        }
    }
}
