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

use log::info;

use crate::error::CreateProcessError;
use crate::page::PageEntry;
use crate::util::ceil_div;
use crate::vm_config::VMConfig;

/// A software-defined process: a declared size and the page table covering
/// exactly `[0, pages_needed)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Process {
    pub size_kb: usize,
    pub pages_needed: usize,
    /// Fixed-length table, indexed by page number.
    pub page_table: Vec<PageEntry>,
    /// Creation-time base address, always zero; record keeping only.
    pub base_address: usize,
}

/// Owns all process definitions plus the active-process pointer.
#[derive(Debug, Default)]
pub(crate) struct ProcessTable {
    processes: BTreeMap<String, Process>,
    current: Option<String>,
}

impl ProcessTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new process with an all-invalid page table. The first
    /// process ever created becomes the active one.
    pub(crate) fn create(
        &mut self,
        pid: &str,
        size_kb: usize,
        config: &VMConfig,
    ) -> Result<String, CreateProcessError> {
        let pages_needed = ceil_div(size_kb * 1024, config.page_size);

        if self.processes.contains_key(pid) {
            return Err(CreateProcessError::DuplicatePid(pid.to_owned()));
        }
        if pages_needed == 0 {
            return Err(CreateProcessError::ZeroPages {
                pid: pid.to_owned(),
                size_kb,
            });
        }
        if pages_needed > config.max_virtual_pages {
            return Err(CreateProcessError::PageLimitExceeded {
                pid: pid.to_owned(),
                requested: pages_needed,
                limit: config.max_virtual_pages,
            });
        }

        self.processes.insert(
            pid.to_owned(),
            Process {
                size_kb,
                pages_needed,
                page_table: vec![PageEntry::default(); pages_needed],
                base_address: 0,
            },
        );
        if self.current.is_none() {
            self.current = Some(pid.to_owned());
        }

        info!("created process {pid}: {size_kb} KB, {pages_needed} pages");
        Ok(format!(
            "process {pid} created: {size_kb} KB, {pages_needed} pages"
        ))
    }

    /// No-op unless `pid` is registered.
    pub(crate) fn set_active(&mut self, pid: &str) {
        if self.processes.contains_key(pid) {
            self.current = Some(pid.to_owned());
        }
    }

    pub(crate) fn active(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub(crate) fn get(&self, pid: &str) -> Option<&Process> {
        self.processes.get(pid)
    }

    pub(crate) fn get_mut(&mut self, pid: &str) -> Option<&mut Process> {
        self.processes.get_mut(pid)
    }

    pub(crate) fn all(&self) -> &BTreeMap<String, Process> {
        &self.processes
    }

    pub(crate) fn clear(&mut self) {
        self.processes.clear();
        self.current = None;
    }

    /// Reinitialize every page table entry to invalid while keeping the
    /// process definitions and the active pointer.
    pub(crate) fn reset_pages(&mut self) {
        for process in self.processes.values_mut() {
            for entry in &mut process.page_table {
                *entry = PageEntry::default();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::ProcessTable;
    use crate::error::CreateProcessError;
    use crate::page::PageStatus;
    use crate::vm_config::VMConfig;

    fn config() -> VMConfig {
        VMConfig {
            page_size: 1024,
            frame_count: 4,
            max_virtual_pages: 8,
        }
    }

    #[test]
    fn test_create_rounds_pages_up() {
        let mut table = ProcessTable::new();
        // 6 KB at 4096 bytes per page -> 1.5 pages, rounded up to 2
        let config = VMConfig {
            page_size: 4096,
            frame_count: 4,
            max_virtual_pages: 8,
        };
        table.create("a", 6, &config).unwrap();

        let process = table.get("a").unwrap();
        assert_eq!(process.pages_needed, 2);
        assert_eq!(process.page_table.len(), 2);
        assert!(process
            .page_table
            .iter()
            .all(|entry| entry.status == PageStatus::Invalid));
    }

    #[test]
    fn test_first_process_becomes_active() {
        let mut table = ProcessTable::new();
        assert_eq!(table.active(), None);

        table.create("a", 1, &config()).unwrap();
        table.create("b", 1, &config()).unwrap();
        assert_eq!(table.active(), Some("a"));

        table.set_active("b");
        assert_eq!(table.active(), Some("b"));

        // unknown pid is ignored
        table.set_active("ghost");
        assert_eq!(table.active(), Some("b"));
    }

    #[test]
    fn test_create_rejections() {
        let mut table = ProcessTable::new();
        table.create("a", 4, &config()).unwrap();

        assert_eq!(
            table.create("a", 8, &config()),
            Err(CreateProcessError::DuplicatePid("a".to_owned()))
        );
        assert_eq!(
            table.create("b", 0, &config()),
            Err(CreateProcessError::ZeroPages {
                pid: "b".to_owned(),
                size_kb: 0
            })
        );
        assert_eq!(
            table.create("c", 9, &config()),
            Err(CreateProcessError::PageLimitExceeded {
                pid: "c".to_owned(),
                requested: 9,
                limit: 8
            })
        );
    }
}
