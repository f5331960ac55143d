use super::get_test_simulator;
use crate::{PageStatus, TranslationError};

#[test]
fn test_translate_without_process_fails() {
    let mut sim = get_test_simulator(4);
    assert_eq!(sim.translate(0), Err(TranslationError::NoActiveProcess));
    assert_eq!(sim.statistics().access_count, 0);
}

#[test]
fn test_out_of_range_page_is_a_segmentation_fault() {
    let mut sim = get_test_simulator(4);
    sim.create_process("a", 2).unwrap();

    // page 2 of a 2-page process
    let result = sim.translate(2 * 1024);
    assert_eq!(
        result,
        Err(TranslationError::SegmentationFault {
            pid: "a".to_owned(),
            page: 2,
            pages_needed: 2
        })
    );

    // rejected requests touch no counter
    let stats = sim.statistics();
    assert_eq!(stats.access_count, 0);
    assert_eq!(stats.page_faults, 0);
    assert_eq!(stats.page_hits, 0);
}

#[test]
fn test_first_access_faults_then_hits() {
    let mut sim = get_test_simulator(4);
    sim.create_process("a", 2).unwrap();

    // first touch: demand load into the lowest free frame
    assert_eq!(sim.translate(10).unwrap(), 10);
    let stats = sim.statistics();
    assert_eq!(stats.page_faults, 1);
    assert_eq!(stats.page_hits, 0);

    // second touch: plain hit, same frame
    assert_eq!(sim.translate(20).unwrap(), 20);
    let stats = sim.statistics();
    assert_eq!(stats.page_faults, 1);
    assert_eq!(stats.page_hits, 1);
    assert_eq!(stats.access_count, 2);
}

#[test]
fn test_offset_is_preserved_across_frames() {
    let mut sim = get_test_simulator(4);
    sim.create_process("a", 3).unwrap();

    // page 1 lands in frame 0, page 0 in frame 1
    assert_eq!(sim.translate(1024 + 7).unwrap(), 7);
    assert_eq!(sim.translate(123).unwrap(), 1024 + 123);
}

#[test]
fn test_access_count_equals_number_of_successful_translations() {
    let mut sim = get_test_simulator(4);
    sim.create_process("a", 4).unwrap();

    for i in 0..40 {
        sim.translate((i % 4) * 1024).unwrap();
    }
    assert_eq!(sim.statistics().access_count, 40);

    // a rejected request does not move the counter
    sim.translate(4 * 1024).unwrap_err();
    assert_eq!(sim.statistics().access_count, 40);
}

#[test]
fn test_hit_updates_entry_metadata() {
    let mut sim = get_test_simulator(4);
    sim.create_process("a", 1).unwrap();

    sim.translate(0).unwrap(); // fault, load
    sim.translate(1).unwrap(); // hit
    sim.translate(2).unwrap(); // hit

    let entry = &sim.page_table("a")[0];
    assert_eq!(entry.status, PageStatus::Valid);
    assert!(entry.referenced);
    assert_eq!(entry.access_time, 3);
    assert_eq!(entry.access_count, 3);
}

#[test]
fn test_resident_page_owner_matches_frame() {
    let mut sim = get_test_simulator(4);
    sim.create_process("a", 2).unwrap();
    sim.create_process("b", 2).unwrap();

    sim.translate(0).unwrap();
    sim.set_active_process("b");
    sim.translate(0).unwrap();
    sim.translate(1024).unwrap();

    // every valid entry is owned by exactly one frame
    for (pid, process) in sim.processes() {
        for (page, entry) in process.page_table.iter().enumerate() {
            if entry.status != PageStatus::Valid {
                continue;
            }
            let owners = sim
                .physical_memory()
                .iter()
                .filter(|frame| {
                    frame
                        .as_ref()
                        .is_some_and(|key| key.pid == *pid && key.page == page)
                })
                .count();
            assert_eq!(owners, 1, "process {pid} page {page}");
            let frame = entry.physical_frame.unwrap();
            let owner = sim.physical_memory()[frame].as_ref().unwrap();
            assert_eq!((owner.pid.as_str(), owner.page), (pid.as_str(), page));
        }
    }
}

#[test]
fn test_zero_frames_makes_faults_unresolvable() {
    let mut sim = get_test_simulator(0);
    sim.create_process("a", 1).unwrap();

    assert_eq!(
        sim.translate(0),
        Err(TranslationError::UnresolvableFault {
            pid: "a".to_owned(),
            page: 0
        })
    );

    // the fault itself was counted before resolution failed
    let stats = sim.statistics();
    assert_eq!(stats.access_count, 1);
    assert_eq!(stats.page_faults, 1);
}
