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

/// Identifies one virtual page of one process. Keys frame ownership, the
/// swap store and both replacement tracking structures.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageKey {
    pub pid: String,
    pub page: usize,
}

impl PageKey {
    pub fn new(pid: impl Into<String>, page: usize) -> Self {
        Self {
            pid: pid.into(),
            page,
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pid, self.page)
    }
}

/// Residency state of one page table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PageStatus {
    /// Never loaded since creation (or since a memory reset).
    Invalid,
    /// Resident in a physical frame.
    Valid,
    /// Evicted to the swap store.
    Swapped,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Invalid => "Invalid",
            PageStatus::Valid => "Valid",
            PageStatus::Swapped => "Swapped",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a per process page table.
///
/// `status == Valid` if and only if `physical_frame` is set and the owning
/// frame records this page; `status == Swapped` if and only if the key is
/// present in the swap store and `physical_frame` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageEntry {
    pub physical_frame: Option<usize>,
    pub status: PageStatus,
    pub referenced: bool,
    /// Set probabilistically on simulated writes, display only.
    pub modified: bool,
    /// Logical timestamp: value of the global access counter at last touch.
    pub access_time: u64,
    /// Monotonic per page hit counter.
    pub access_count: u64,
}

impl Default for PageEntry {
    fn default() -> Self {
        Self {
            physical_frame: None,
            status: PageStatus::Invalid,
            referenced: false,
            modified: false,
            access_time: 0,
            access_count: 0,
        }
    }
}
