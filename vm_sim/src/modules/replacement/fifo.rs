/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::collections::VecDeque;

use super::{frame_of, ReplacementPolicyModule, Victim};
use crate::page::PageKey;

/// First-in first-out replacement: the victim is the resident page that
/// was loaded the longest ago, regardless of how often it was touched
/// since.
#[derive(Debug)]
pub struct FifoReplacementModule {
    /// Load order, head is the oldest resident page.
    queue: VecDeque<PageKey>,
}

impl ReplacementPolicyModule for FifoReplacementModule {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    fn note_loaded(&mut self, key: &PageKey, _stamp: u64) {
        if !self.queue.contains(key) {
            self.queue.push_back(key.clone());
        }
    }

    fn note_accessed(&mut self, _key: &PageKey, _stamp: u64) {
        // load order is fixed once the page is resident
    }

    fn note_evicted(&mut self, key: &PageKey) {
        self.queue.retain(|tracked| tracked != key);
    }

    fn select_victim(&mut self, frames: &[Option<PageKey>]) -> Option<Victim> {
        let key = self.queue.pop_front()?;
        match frame_of(frames, &key) {
            Some(frame) => Some(Victim { key, frame }),
            // stale entry, the page is no longer resident; it has already
            // been dropped from the queue, the caller may retry
            None => None,
        }
    }

    fn seed_resident(&mut self, frames: &[Option<PageKey>], _stamp: u64) {
        for key in frames.iter().flatten() {
            if !self.queue.contains(key) {
                self.queue.push_back(key.clone());
            }
        }
    }

    fn reset(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod test {
    use super::FifoReplacementModule;
    use crate::modules::replacement::{ReplacementPolicyModule, Victim};
    use crate::page::PageKey;

    fn key(page: usize) -> PageKey {
        PageKey::new("p", page)
    }

    #[test]
    fn test_victim_is_oldest_loaded() {
        let mut fifo = FifoReplacementModule::new();
        let frames = vec![Some(key(0)), Some(key(1)), Some(key(2))];

        fifo.note_loaded(&key(0), 1);
        fifo.note_loaded(&key(1), 2);
        fifo.note_loaded(&key(2), 3);

        // touching a page must not change the load order
        fifo.note_accessed(&key(0), 4);

        assert_eq!(
            fifo.select_victim(&frames),
            Some(Victim {
                key: key(0),
                frame: 0
            })
        );
        assert_eq!(
            fifo.select_victim(&frames),
            Some(Victim {
                key: key(1),
                frame: 1
            })
        );
    }

    #[test]
    fn test_double_load_does_not_duplicate() {
        let mut fifo = FifoReplacementModule::new();
        let frames = vec![Some(key(0))];

        fifo.note_loaded(&key(0), 1);
        fifo.note_loaded(&key(0), 2);

        assert!(fifo.select_victim(&frames).is_some());
        assert!(fifo.select_victim(&frames).is_none());
    }

    #[test]
    fn test_stale_entry_yields_none() {
        let mut fifo = FifoReplacementModule::new();
        // queue knows page 0, but it is not resident anymore
        fifo.note_loaded(&key(0), 1);
        fifo.note_loaded(&key(1), 2);
        let frames = vec![Some(key(1))];

        assert_eq!(fifo.select_victim(&frames), None);
        // the stale key was consumed, the next call finds page 1
        assert_eq!(
            fifo.select_victim(&frames),
            Some(Victim {
                key: key(1),
                frame: 0
            })
        );
    }

    #[test]
    fn test_evicted_key_is_dropped() {
        let mut fifo = FifoReplacementModule::new();
        let frames = vec![None, Some(key(1))];

        fifo.note_loaded(&key(0), 1);
        fifo.note_loaded(&key(1), 2);
        fifo.note_evicted(&key(0));

        assert_eq!(
            fifo.select_victim(&frames),
            Some(Victim {
                key: key(1),
                frame: 1
            })
        );
    }

    #[test]
    fn test_seed_resident_is_idempotent_and_preserves_order() {
        let mut fifo = FifoReplacementModule::new();
        fifo.note_loaded(&key(1), 1);

        let frames = vec![Some(key(0)), Some(key(1)), Some(key(2))];
        fifo.seed_resident(&frames, 5);
        fifo.seed_resident(&frames, 6);

        // page 1 keeps its place at the head, missing keys are appended
        assert_eq!(fifo.select_victim(&frames).unwrap().key, key(1));
        assert_eq!(fifo.select_victim(&frames).unwrap().key, key(0));
        assert_eq!(fifo.select_victim(&frames).unwrap().key, key(2));
        assert!(fifo.select_victim(&frames).is_none());
    }
}
