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

use static_assertions::const_assert;

pub const DEFAULT_PAGE_SIZE: usize = 4096;
pub const DEFAULT_FRAME_COUNT: usize = 10;
pub const DEFAULT_MAX_VIRTUAL_PAGES: usize = 64;

const_assert!(DEFAULT_PAGE_SIZE.is_power_of_two());
const_assert!(DEFAULT_FRAME_COUNT > 0);
const_assert!(DEFAULT_MAX_VIRTUAL_PAGES > 0);

/// Simulator wide constants, fixed at engine construction and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VMConfig {
    /// Size of one page and one frame, in bytes.
    pub page_size: usize,
    /// Number of physical frames shared by all processes.
    pub frame_count: usize,
    /// Upper bound on pages a single process may declare.
    pub max_virtual_pages: usize,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            frame_count: DEFAULT_FRAME_COUNT,
            max_virtual_pages: DEFAULT_MAX_VIRTUAL_PAGES,
        }
    }
}
