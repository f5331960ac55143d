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

use std::collections::BTreeMap;

use super::{frame_of, ReplacementPolicyModule, Victim};
use crate::page::PageKey;

/// Least-recently-used replacement: the victim is the resident page with
/// the smallest last-access stamp. Stamps are logical timestamps taken
/// from the engine's global access counter.
#[derive(Debug)]
pub struct LruReplacementModule {
    /// Last-access stamp per resident page. BTreeMap so that equal stamps
    /// resolve to the smallest key, deterministically.
    stamps: BTreeMap<PageKey, u64>,
}

impl LruReplacementModule {
    /// Least-recent tracked key. Ties resolve to the smallest key because
    /// only strictly smaller stamps replace the candidate during the
    /// in-order walk.
    fn least_recent(&self) -> Option<PageKey> {
        let mut best: Option<(&PageKey, u64)> = None;
        for (key, &stamp) in &self.stamps {
            match best {
                Some((_, best_stamp)) if stamp >= best_stamp => {}
                _ => best = Some((key, stamp)),
            }
        }
        best.map(|(key, _)| key.clone())
    }
}

impl ReplacementPolicyModule for LruReplacementModule {
    fn new() -> Self {
        Self {
            stamps: BTreeMap::new(),
        }
    }

    fn note_loaded(&mut self, key: &PageKey, stamp: u64) {
        self.stamps.insert(key.clone(), stamp);
    }

    fn note_accessed(&mut self, key: &PageKey, stamp: u64) {
        self.stamps.insert(key.clone(), stamp);
    }

    fn note_evicted(&mut self, key: &PageKey) {
        self.stamps.remove(key);
    }

    fn select_victim(&mut self, frames: &[Option<PageKey>]) -> Option<Victim> {
        while let Some(key) = self.least_recent() {
            // drop the stamp before eviction proceeds, so a failed
            // eviction cannot select the same victim again
            self.stamps.remove(&key);

            if let Some(frame) = frame_of(frames, &key) {
                return Some(Victim { key, frame });
            }
            // stale stamp, the page is not resident; try the next
            // least-recent candidate
        }
        None
    }

    fn seed_resident(&mut self, frames: &[Option<PageKey>], stamp: u64) {
        for key in frames.iter().flatten() {
            self.stamps.entry(key.clone()).or_insert(stamp);
        }
    }

    fn reset(&mut self) {
        self.stamps.clear();
    }
}
