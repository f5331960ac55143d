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

use log::{debug, trace, warn};
use rand::Rng;

use crate::error::{CreateProcessError, TranslationError};
use crate::frame_table::FrameTable;
use crate::modules::replacement::{
    FifoReplacementModule, LruReplacementModule, ReplacementAlgorithm, ReplacementPolicyModule,
    Victim,
};
use crate::page::{PageEntry, PageKey, PageStatus};
use crate::process::{Process, ProcessTable};
use crate::statistics::{AccessCounters, MemoryStatistics};
use crate::swap_store::SwapStore;
use crate::thrashing::ThrashingDetector;
use crate::util::fnv1a_64;
use crate::vm_config::VMConfig;

/// Probability that a successfully translated simulated access also marks
/// its page modified. Display only, no effect on eviction or swap.
pub(crate) const WRITE_PROBABILITY: f64 = 0.3;

/// The virtual-memory engine: one explicit state container owning the
/// process registry, the physical frame array, the swap store, the
/// replacement policies and all counters. Single-threaded by contract;
/// every operation runs to completion and every failure is a returned
/// value.
pub struct VMSimulator {
    config: VMConfig,
    processes: ProcessTable,
    frames: FrameTable,
    swap: SwapStore,
    counters: AccessCounters,
    fifo: FifoReplacementModule,
    lru: LruReplacementModule,
    algorithm: ReplacementAlgorithm,
    thrashing: ThrashingDetector,
}

impl Default for VMSimulator {
    fn default() -> Self {
        Self::new(VMConfig::default())
    }
}

impl VMSimulator {
    pub fn new(config: VMConfig) -> Self {
        Self {
            frames: FrameTable::new(config.frame_count),
            processes: ProcessTable::new(),
            swap: SwapStore::new(),
            counters: AccessCounters::new(),
            fifo: FifoReplacementModule::new(),
            lru: LruReplacementModule::new(),
            algorithm: ReplacementAlgorithm::Fifo,
            thrashing: ThrashingDetector::new(),
            config,
        }
    }

    pub fn create_process(
        &mut self,
        pid: &str,
        size_kb: usize,
    ) -> Result<String, CreateProcessError> {
        self.processes.create(pid, size_kb, &self.config)
    }

    /// No-op unless `pid` is registered.
    pub fn set_active_process(&mut self, pid: &str) {
        self.processes.set_active(pid);
    }

    pub fn active_process(&self) -> Option<&str> {
        self.processes.active()
    }

    /// Switch which policy future faults use for victim selection. The
    /// target policy's tracking structure is seeded with every currently
    /// resident page so all of them stay eviction-eligible; since both
    /// structures are fed continuously this never reorders history.
    pub fn change_algorithm(&mut self, algorithm: ReplacementAlgorithm) {
        self.algorithm = algorithm;
        let stamp = self.counters.access_count;
        match algorithm {
            ReplacementAlgorithm::Fifo => self.fifo.seed_resident(self.frames.as_slice(), stamp),
            ReplacementAlgorithm::Lru => self.lru.seed_resident(self.frames.as_slice(), stamp),
        }
        debug!("replacement algorithm changed to {algorithm}");
    }

    pub fn algorithm(&self) -> ReplacementAlgorithm {
        self.algorithm
    }

    /// Translate a virtual address of the active process into a physical
    /// address, demand-loading the page on a fault.
    pub fn translate(&mut self, virtual_address: usize) -> Result<usize, TranslationError> {
        let pid = self
            .processes
            .active()
            .ok_or(TranslationError::NoActiveProcess)?
            .to_owned();

        let page = virtual_address / self.config.page_size;
        let offset = virtual_address % self.config.page_size;

        let pages_needed = match self.processes.get(&pid) {
            Some(process) => process.pages_needed,
            None => return Err(TranslationError::NoActiveProcess),
        };
        if page >= pages_needed {
            // rejected before any counter is touched
            return Err(TranslationError::SegmentationFault {
                pid,
                page,
                pages_needed,
            });
        }

        self.counters.access_count += 1;
        let stamp = self.counters.access_count;
        let key = PageKey::new(pid.clone(), page);

        let hit_frame = match self.processes.get_mut(&pid) {
            Some(process) => {
                let entry = &mut process.page_table[page];
                match (entry.status, entry.physical_frame) {
                    (PageStatus::Valid, Some(frame)) => {
                        entry.referenced = true;
                        entry.access_time = stamp;
                        entry.access_count += 1;
                        Some(frame)
                    }
                    _ => None,
                }
            }
            None => return Err(TranslationError::NoActiveProcess),
        };

        if let Some(frame) = hit_frame {
            self.counters.page_hits += 1;
            self.lru.note_accessed(&key, stamp);
            trace!("hit: {key} resident in frame {frame}");
            return Ok(frame * self.config.page_size + offset);
        }

        self.counters.page_faults += 1;
        self.thrashing.record_fault();
        debug!("page fault on {key}");
        self.load_page_on_demand(&pid, page)?;

        match self
            .processes
            .get(&pid)
            .and_then(|process| process.page_table[page].physical_frame)
        {
            Some(frame) => Ok(frame * self.config.page_size + offset),
            None => Err(TranslationError::UnresolvableFault { pid, page }),
        }
    }

    /// Convenience wrapper for load drivers: translate, and on success
    /// mark the page modified with fixed probability to emulate a write.
    /// Translation failures are swallowed, the simulator stays usable.
    pub fn simulate_memory_access<R: Rng>(&mut self, virtual_address: usize, rng: &mut R) {
        if self.translate(virtual_address).is_err() {
            return;
        }

        if rng.gen_bool(WRITE_PROBABILITY) {
            let page = virtual_address / self.config.page_size;
            let Some(pid) = self.processes.active().map(str::to_owned) else {
                return;
            };
            if let Some(process) = self.processes.get_mut(&pid) {
                if let Some(entry) = process.page_table.get_mut(page) {
                    entry.modified = true;
                }
            }
        }
    }

    /// Illustrative symbolic-to-physical pipeline: echoes the symbol,
    /// derives a deterministic relative address from its FNV-1a hash,
    /// reduces it into the active process's address space and runs the
    /// result through `translate`. Returns the stage descriptions and the
    /// logical address (`None` when no process is active).
    pub fn translate_symbolic_stages(&mut self, symbolic: &str) -> (Vec<String>, Option<usize>) {
        let mut stages = Vec::new();
        stages.push(format!("1. symbolic address: {symbolic}"));

        let space = self.config.max_virtual_pages * self.config.page_size;
        let relative = (fnv1a_64(symbolic) % space as u64) as usize;

        let pages_needed = self
            .processes
            .active()
            .and_then(|pid| self.processes.get(pid))
            .map(|process| process.pages_needed);
        let Some(pages_needed) = pages_needed else {
            stages.push(format!(
                "2. relative address (derived from symbol): {relative:#010X}"
            ));
            stages.push(format!(
                "3. potential logical/virtual address: {relative:#010X}"
            ));
            stages.push("4. physical address (MMU): error: no active process".to_owned());
            return (stages, None);
        };

        let logical = relative % (pages_needed * self.config.page_size);
        stages.push(format!(
            "2. relative address (derived from symbol): {relative:#010X}"
        ));
        stages.push(format!("3. logical/virtual address: {logical:#010X}"));

        let page = logical / self.config.page_size;
        let was_resident = self
            .processes
            .active()
            .and_then(|pid| self.processes.get(pid))
            .map(|process| process.page_table[page].status == PageStatus::Valid)
            .unwrap_or(false);

        match self.translate(logical) {
            Ok(physical) => {
                stages.push(format!("4. physical address (MMU): {physical:#010X}"));
                if was_resident {
                    stages.push(
                        "translation succeeded (page hit), the page was already resident"
                            .to_owned(),
                    );
                } else {
                    let frame = physical / self.config.page_size;
                    stages.push(format!(
                        "translation succeeded (page fault resolved), \
                         page {page} loaded into frame {frame}"
                    ));
                }
            }
            Err(err) => {
                stages.push(format!("4. physical address (MMU): error: {err}"));
            }
        }

        (stages, Some(logical))
    }

    pub fn statistics(&self) -> MemoryStatistics {
        MemoryStatistics {
            access_count: self.counters.access_count,
            page_hits: self.counters.page_hits,
            page_faults: self.counters.page_faults,
            swaps_in: self.counters.swaps_in,
            swaps_out: self.counters.swaps_out,
            pages_in_swap: self.swap.len(),
            hit_rate: self.counters.hit_rate(),
            fault_rate: self.counters.fault_rate(),
            algorithm: self.algorithm,
        }
    }

    pub fn detect_thrashing(&self) -> (bool, String) {
        self.thrashing
            .detect(self.counters.page_faults, self.counters.access_count)
    }

    /// Full clear: processes, frames, swap, counters, tracking state.
    pub fn reset_system(&mut self) {
        self.processes.clear();
        self.frames.reset();
        self.swap.clear();
        self.counters.clear();
        self.fifo.reset();
        self.lru.reset();
        self.thrashing.clear();
        debug!("system reset");
    }

    /// Clear physical state only: frames, swap, counters and tracking are
    /// wiped and every page table entry becomes invalid again, but process
    /// definitions and the active pointer survive.
    pub fn reset_memory_only(&mut self) {
        self.frames.reset();
        self.swap.clear();
        self.counters.clear();
        self.fifo.reset();
        self.lru.reset();
        self.thrashing.clear();
        self.processes.reset_pages();
        debug!("memory reset, process definitions kept");
    }

    pub fn processes(&self) -> &BTreeMap<String, Process> {
        self.processes.all()
    }

    /// Page table of `pid`, empty for unknown pids.
    pub fn page_table(&self, pid: &str) -> &[PageEntry] {
        self.processes
            .get(pid)
            .map(|process| process.page_table.as_slice())
            .unwrap_or(&[])
    }

    /// Frame occupancy, length equals the configured frame count.
    pub fn physical_memory(&self) -> &[Option<PageKey>] {
        self.frames.as_slice()
    }

    pub fn swap_space(&self) -> &BTreeMap<PageKey, String> {
        self.swap.entries()
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn frame_count(&self) -> usize {
        self.config.frame_count
    }

    pub fn max_virtual_pages(&self) -> usize {
        self.config.max_virtual_pages
    }

    /// Bring `page` of `pid` into a frame: reuse a free frame or evict a
    /// victim, consume a matching swap entry, update the page table entry
    /// and register the key with both tracking structures.
    fn load_page_on_demand(&mut self, pid: &str, page: usize) -> Result<(), TranslationError> {
        let key = PageKey::new(pid, page);

        let frame = match self.frames.find_free() {
            Some(frame) => frame,
            None => match self.evict_victim() {
                Some(frame) => frame,
                None => {
                    warn!("no frame could be freed for {key}");
                    return Err(TranslationError::UnresolvableFault {
                        pid: pid.to_owned(),
                        page,
                    });
                }
            },
        };

        if self.swap.retrieve(&key) {
            self.counters.swaps_in += 1;
            debug!("swapped {key} back in");
        }

        let stamp = self.counters.access_count;
        if let Some(process) = self.processes.get_mut(pid) {
            let entry = &mut process.page_table[page];
            entry.physical_frame = Some(frame);
            entry.status = PageStatus::Valid;
            entry.referenced = true;
            entry.access_time = stamp;
            entry.access_count += 1;
        }
        self.frames.assign(frame, key.clone());

        // both structures stay consistent no matter which policy is
        // active, so switching algorithms mid-run keeps the history
        self.fifo.note_loaded(&key, stamp);
        self.lru.note_loaded(&key, stamp);

        debug!("loaded {key} into frame {frame}");
        Ok(())
    }

    /// Run the active policy and move its victim to swap. Returns the
    /// freed frame.
    fn evict_victim(&mut self) -> Option<usize> {
        let victim = match self.algorithm {
            ReplacementAlgorithm::Fifo => self.fifo.select_victim(self.frames.as_slice()),
            ReplacementAlgorithm::Lru => self.lru.select_victim(self.frames.as_slice()),
        }?;
        Some(self.move_page_to_swap(victim))
    }

    fn move_page_to_swap(&mut self, victim: Victim) -> usize {
        let Victim { key, frame } = victim;

        if let Some(process) = self.processes.get_mut(&key.pid) {
            if let Some(entry) = process.page_table.get_mut(key.page) {
                entry.status = PageStatus::Swapped;
                entry.physical_frame = None;
                entry.referenced = false;
            }
        }

        self.swap.store(key.clone());
        self.counters.swaps_out += 1;
        self.frames.release(frame);
        self.fifo.note_evicted(&key);
        self.lru.note_evicted(&key);

        debug!("evicted {key} from frame {frame} to swap");
        frame
    }
}
