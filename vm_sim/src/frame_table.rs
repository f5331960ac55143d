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

use crate::page::PageKey;

/// Occupancy of the fixed physical frame array. Each slot holds the
/// owning page key or nothing; a key owns at most one frame.
#[derive(Debug)]
pub(crate) struct FrameTable {
    frames: Vec<Option<PageKey>>,
}

impl FrameTable {
    pub(crate) fn new(frame_count: usize) -> Self {
        Self {
            frames: vec![None; frame_count],
        }
    }

    /// Lowest free frame index, if any. Linear scan, frame counts are
    /// small and bounded.
    pub(crate) fn find_free(&self) -> Option<usize> {
        self.frames.iter().position(Option::is_none)
    }

    pub(crate) fn assign(&mut self, frame: usize, key: PageKey) {
        self.frames[frame] = Some(key);
    }

    pub(crate) fn release(&mut self, frame: usize) {
        self.frames[frame] = None;
    }

    pub(crate) fn as_slice(&self) -> &[Option<PageKey>] {
        &self.frames
    }

    pub(crate) fn reset(&mut self) {
        self.frames.iter_mut().for_each(|frame| *frame = None);
    }
}

#[cfg(test)]
mod test {
    use super::FrameTable;
    use crate::page::PageKey;

    #[test]
    fn test_find_free_returns_lowest_index() {
        let mut frames = FrameTable::new(3);
        assert_eq!(frames.find_free(), Some(0));

        frames.assign(0, PageKey::new("a", 0));
        frames.assign(1, PageKey::new("a", 1));
        assert_eq!(frames.find_free(), Some(2));

        frames.release(0);
        assert_eq!(frames.find_free(), Some(0));
    }

    #[test]
    fn test_full_table_has_no_free_frame() {
        let mut frames = FrameTable::new(2);
        frames.assign(0, PageKey::new("a", 0));
        frames.assign(1, PageKey::new("a", 1));
        assert_eq!(frames.find_free(), None);

        frames.reset();
        assert_eq!(frames.find_free(), Some(0));
        assert!(frames.as_slice().iter().all(Option::is_none));
    }
}
