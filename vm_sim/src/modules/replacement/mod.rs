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

use std::fmt;
use std::str::FromStr;

use crate::error::ParseAlgorithmError;
use crate::page::PageKey;

mod fifo;
mod lru;

pub use fifo::FifoReplacementModule;
pub use lru::LruReplacementModule;

/// Tag selecting which policy future faults use for victim selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReplacementAlgorithm {
    Fifo,
    Lru,
}

impl ReplacementAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplacementAlgorithm::Fifo => "FIFO",
            ReplacementAlgorithm::Lru => "LRU",
        }
    }
}

impl fmt::Display for ReplacementAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplacementAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("FIFO") {
            Ok(ReplacementAlgorithm::Fifo)
        } else if s.eq_ignore_ascii_case("LRU") {
            Ok(ReplacementAlgorithm::Lru)
        } else {
            Err(ParseAlgorithmError(s.to_owned()))
        }
    }
}

/// A page selected for eviction together with the frame it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victim {
    pub key: PageKey,
    pub frame: usize,
}

/// Victim selection contract shared by FIFO and LRU.
///
/// The engine feeds `note_*` events to every policy instance regardless of
/// which one is active, so the tracking structures never diverge and
/// switching policies mid-run keeps the eviction history. Eviction itself
/// (swap insert, frame release, page table transition) is engine side;
/// implementations only pick victims.
pub trait ReplacementPolicyModule {
    fn new() -> Self
    where
        Self: Sized;

    /// A page was placed into a frame.
    fn note_loaded(&mut self, key: &PageKey, stamp: u64);

    /// A resident page was touched by a translation hit.
    fn note_accessed(&mut self, key: &PageKey, stamp: u64);

    /// A page left physical memory.
    fn note_evicted(&mut self, key: &PageKey);

    /// Pick the page to evict next, or `None` if nothing is eligible.
    /// `frames` is the physical frame array, used to locate the victim's
    /// frame.
    fn select_victim(&mut self, frames: &[Option<PageKey>]) -> Option<Victim>;

    /// Make every currently resident page eligible for eviction. Existing
    /// tracking state is preserved; only missing keys are added.
    fn seed_resident(&mut self, frames: &[Option<PageKey>], stamp: u64);

    fn reset(&mut self);
}

/// Frame currently owned by `key`, if any.
pub(crate) fn frame_of(frames: &[Option<PageKey>], key: &PageKey) -> Option<usize> {
    frames
        .iter()
        .position(|frame| frame.as_ref() == Some(key))
}
