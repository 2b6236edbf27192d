use crate::circle::arrange_in_circle;
use crate::config::CircleConfig;
use crate::counting::{CountingQueue, josephus_survivor};
use crate::frames::{SpriteFrame, select_frame};
use crate::soldier::{Soldier, Stage};

/// A finale ends once the soldier's counter reaches this frame.
const FINALE_LAST_FRAME: u32 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Turns are still being handed out.
    Executing,
    /// The executioner drew itself and is playing its own finale. Turns
    /// resume afterwards unless it was the last draw.
    Finale,
    /// Nothing moves any more. `survivor` is `None` when the finale was played.
    Finished { survivor: Option<usize> },
}

/// Drives the counting-out: picks the executioner and its victim, ticks the
/// executioner's animation and marks victims dead.
#[derive(Debug, Clone)]
pub struct TurnSequencer {
    soldiers: Vec<Soldier>,
    queue: CountingQueue,
    moving: usize,
    target: usize,
    debounce: bool,
    phase: Phase,
    spare_survivor: bool,
    eliminated: Vec<usize>,
    frames: Vec<SpriteFrame>,
    tick: u64,
}

impl TurnSequencer {
    pub fn for_circle(config: &CircleConfig, radius: f32, spare_survivor: bool) -> Self {
        Self::new(
            arrange_in_circle(config.soldiers, radius),
            config.step,
            spare_survivor,
        )
    }

    pub fn new(mut soldiers: Vec<Soldier>, step: usize, spare_survivor: bool) -> Self {
        let survivor = josephus_survivor(soldiers.len(), step);
        if let Some(designate) = survivor.checked_sub(1).and_then(|i| soldiers.get_mut(i)) {
            designate.designate_survivor();
        }

        let mut sequencer = Self {
            queue: CountingQueue::new(soldiers.len(), step),
            soldiers,
            moving: 0,
            target: 0,
            debounce: false,
            phase: Phase::Executing,
            spare_survivor,
            eliminated: Vec::new(),
            frames: Vec::new(),
            tick: 0,
        };

        match sequencer.queue.next_victim() {
            Some(victim) => {
                sequencer.target = victim;
                sequencer.begin_turn();
            }
            None => sequencer.phase = Phase::Finished { survivor: None },
        }
        sequencer.refresh_frames();
        sequencer
    }

    pub fn soldiers(&self) -> &[Soldier] {
        &self.soldiers
    }

    pub fn frames(&self) -> &[SpriteFrame] {
        &self.frames
    }

    pub fn moving(&self) -> usize {
        self.moving
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// Victims in the order they fell, 0-based.
    pub fn eliminated(&self) -> &[usize] {
        &self.eliminated
    }

    pub fn alive_count(&self) -> usize {
        self.soldiers.iter().filter(|soldier| soldier.is_alive()).count()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn step(&self) -> usize {
        self.queue.step()
    }

    pub fn tick(&mut self) {
        if self.soldiers.is_empty() {
            return;
        }
        self.tick += 1;

        if self.phase == Phase::Executing {
            self.hand_out_turn();
        }

        let phase = self.phase;
        match phase {
            Phase::Executing if self.moving != self.target => self.drive_executioner(),
            Phase::Finale if self.soldiers[self.moving].counter() >= FINALE_LAST_FRAME => {
                self.end_finale();
            }
            _ => {}
        }

        if matches!(self.soldiers[self.moving].stage(), Stage::StrikeHold(_))
            && self.soldiers[self.target].kill()
        {
            self.eliminated.push(self.target);
            log::debug!(
                "soldier {} eliminated by soldier {}",
                self.target + 1,
                self.moving + 1
            );
        }

        self.advance_animation();
    }

    /// Waits one idle tick after the executioner comes home, then passes the
    /// sword to the next living soldier after the last victim.
    fn hand_out_turn(&mut self) {
        if !self.soldiers[self.moving].is_idle() {
            return;
        }
        if !self.debounce {
            self.debounce = true;
            return;
        }
        self.debounce = false;

        let Some(victim) = self.queue.next_victim() else {
            self.phase = Phase::Finished { survivor: None };
            return;
        };
        let previous_victim = self.target;
        self.target = victim;
        self.moving = self.next_alive_after(previous_victim);
        self.begin_turn();
    }

    /// A self-target drawn while others are still queued always plays the
    /// finale. Only the last draw may be spared.
    fn begin_turn(&mut self) {
        if self.moving != self.target {
            self.soldiers[self.moving].murder();
            return;
        }

        let last_draw = self.queue.is_empty();
        if last_draw && self.spare_survivor {
            log::info!("soldier {} survives", self.moving + 1);
            self.phase = Phase::Finished {
                survivor: Some(self.moving),
            };
        } else {
            self.soldiers[self.moving].murder();
            self.phase = Phase::Finale;
        }
    }

    fn end_finale(&mut self) {
        if self.soldiers[self.moving].collapse() {
            self.eliminated.push(self.moving);
        }

        if self.queue.is_empty() {
            log::info!("soldier {} fell last; nobody is left", self.moving + 1);
            self.phase = Phase::Finished { survivor: None };
        } else {
            log::debug!("soldier {} drew itself", self.moving + 1);
            self.phase = Phase::Executing;
        }
    }

    fn drive_executioner(&mut self) {
        let victim = self.soldiers[self.target].position();
        let executioner = &mut self.soldiers[self.moving];
        executioner.move_to_position();
        executioner.face(victim);
        executioner.rotate_to_original();
        executioner.update_rotation();
    }

    fn next_alive_after(&self, start: usize) -> usize {
        let count = self.soldiers.len();
        (1..=count)
            .map(|offset| (start + offset) % count)
            .find(|&index| self.soldiers[index].is_alive())
            .unwrap_or(self.target)
    }

    fn advance_animation(&mut self) {
        for soldier in &mut self.soldiers {
            soldier.advance_idle_frame();
        }
        self.refresh_frames();
    }

    fn refresh_frames(&mut self) {
        let finale = self.phase == Phase::Finale;
        let moving = self.moving;
        self.frames = self
            .soldiers
            .iter_mut()
            .enumerate()
            .map(|(index, soldier)| {
                let finale_frame = (finale && index == moving).then(|| soldier.take_finale_frame());
                select_frame(soldier, finale_frame)
            })
            .collect();
    }
}
