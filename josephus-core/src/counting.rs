use std::collections::VecDeque;

/// Closed-form Josephus survivor, 1-based: `J(1) = 1`,
/// `J(n) = (J(n - 1) + k - 1) % n + 1`.
///
/// Folded iteratively so large circles do not recurse `n` frames deep.
pub fn josephus_survivor(n: usize, k: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (2..=n).fold(1, |previous, size| (previous + k - 1) % size + 1)
}

/// Live counting-out queue: every draw passes `step - 1` soldiers to the back
/// of the line and removes the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountingQueue {
    queue: VecDeque<usize>,
    step: usize,
}

impl CountingQueue {
    pub fn new(soldiers: usize, step: usize) -> Self {
        Self {
            queue: (0..soldiers).collect(),
            step: step.max(1),
        }
    }

    /// Rotates the queue `step` times and returns the 0-based index dropped on
    /// the last rotation.
    pub fn next_victim(&mut self) -> Option<usize> {
        for _ in 1..self.step {
            let front = self.queue.pop_front()?;
            self.queue.push_back(front);
        }
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

/// Every draw of a fresh queue in order, 0-based. The last entry is the
/// survivor.
pub fn elimination_order(n: usize, k: usize) -> Vec<usize> {
    let mut queue = CountingQueue::new(n, k);
    std::iter::from_fn(|| queue.next_victim()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survivor_base_case_is_first_soldier() {
        assert_eq!(josephus_survivor(1, 2), 1);
        assert_eq!(josephus_survivor(1, 7), 1);
    }

    #[test]
    fn survivor_matches_known_values() {
        assert_eq!(josephus_survivor(5, 2), 3);
        assert_eq!(josephus_survivor(7, 3), 4);
        assert_eq!(josephus_survivor(41, 3), 31);
        assert_eq!(josephus_survivor(41, 2), 19);
    }

    #[test]
    fn five_by_two_eliminates_in_classic_order() {
        let order: Vec<usize> = elimination_order(5, 2).iter().map(|i| i + 1).collect();
        assert_eq!(order, vec![2, 4, 1, 5, 3]);
    }

    #[test]
    fn queue_drains_one_per_draw() {
        let mut queue = CountingQueue::new(4, 3);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.next_victim(), Some(2));
        assert_eq!(queue.len(), 3);
        queue.next_victim();
        queue.next_victim();
        queue.next_victim();
        assert!(queue.is_empty());
        assert_eq!(queue.next_victim(), None);
    }

    #[test]
    fn last_draw_is_closed_form_survivor() {
        for n in 1..60 {
            for k in 2..8 {
                let order = elimination_order(n, k);
                assert_eq!(order.len(), n);
                assert_eq!(order[n - 1] + 1, josephus_survivor(n, k), "n={n} k={k}");
            }
        }
    }
}
