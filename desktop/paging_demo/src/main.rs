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

use vm_sim::modules::replacement::ReplacementAlgorithm;
use vm_sim::{AccessDriver, MemoryStatistics, VMConfig, VMSimulator};

const SEED: u64 = 5446535461589659585;

fn print_statistics(stats: &MemoryStatistics) {
    println!(
        "accesses: {}, hits: {} ({:.1}%), faults: {} ({:.1}%), swaps in/out: {}/{}, in swap: {}, algorithm: {}",
        stats.access_count,
        stats.page_hits,
        stats.hit_rate,
        stats.page_faults,
        stats.fault_rate,
        stats.swaps_in,
        stats.swaps_out,
        stats.pages_in_swap,
        stats.algorithm
    );
}

fn print_frames(sim: &VMSimulator) {
    for (index, frame) in sim.physical_memory().iter().enumerate() {
        match frame {
            Some(key) => println!("frame {index}: {key}"),
            None => println!("frame {index}: free"),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log::LevelFilter::Debug)
        .format_module_path(false)
        .init();

    let mut sim = VMSimulator::new(VMConfig::default());

    // two processes; the first one created becomes the active one
    println!("{}", sim.create_process("editor", 24).unwrap());
    println!("{}", sim.create_process("browser", 96).unwrap());

    // walk a few named addresses through the MMU stages
    for symbol in ["main", "heap_top", "stack_guard"] {
        let (stages, _logical) = sim.translate_symbolic_stages(symbol);
        for stage in stages {
            println!("  {stage}");
        }
    }

    // random load under FIFO
    let mut driver = AccessDriver::with_seed(SEED);
    driver.intensive_load(&mut sim, None, |_| {});
    print_statistics(&sim.statistics());

    // switch policy mid-run (eviction history is kept) and stress the
    // larger process, which cannot fit into physical memory
    sim.change_algorithm(ReplacementAlgorithm::Lru);
    sim.set_active_process("browser");
    driver.intensive_load(&mut sim, None, |_| {});
    print_statistics(&sim.statistics());

    let (thrashing, message) = sim.detect_thrashing();
    println!("thrashing: {thrashing} ({message})");

    print_frames(&sim);
    for (key, payload) in sim.swap_space() {
        println!("swap {key}: {payload}");
    }
}
