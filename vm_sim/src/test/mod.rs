use crate::{VMConfig, VMSimulator};

mod translation;

/// Simulator with a small page size so tests can cross page boundaries
/// without large addresses.
pub(crate) fn get_test_simulator(frame_count: usize) -> VMSimulator {
    VMSimulator::new(VMConfig {
        page_size: 1024,
        frame_count,
        max_virtual_pages: 64,
    })
}
