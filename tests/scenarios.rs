use rgrp_bits::{bitmap, BlockState, ErrorKind, RgrpCounters, BFIT_NOT_FOUND};

#[test]
fn single_byte_allocation() {
    let mut counters = RgrpCounters::new(0x10, 4);
    let mut buffer = [0u8; 1];

    assert_eq!(bitmap::count(&counters, &buffer, 4, BlockState::Free).unwrap(), 4);
    assert_eq!(bitmap::find(&buffer, 4, 0, BlockState::Free).unwrap(), Some(0));

    let t = bitmap::set(&counters, &mut buffer, 4, 2, BlockState::AllocatedData).unwrap();
    counters.apply(&t);

    assert_eq!(bitmap::test(&buffer, 4, 2).unwrap(), BlockState::AllocatedData);
    assert_eq!(bitmap::count(&counters, &buffer, 4, BlockState::Free).unwrap(), 3);
    assert_eq!(bitmap::find(&buffer, 4, 1, BlockState::Free).unwrap(), Some(1));
    // 目标块本身空闲
    assert_eq!(bitmap::find(&buffer, 4, 3, BlockState::Free).unwrap(), Some(3));

    let t = bitmap::set(&counters, &mut buffer, 4, 3, BlockState::AllocatedData).unwrap();
    counters.apply(&t);
    assert_eq!(bitmap::find(&buffer, 4, 3, BlockState::Free).unwrap(), Some(0));
}

#[test]
fn double_allocation_is_corruption() {
    let mut counters = RgrpCounters::new(0x10, 4);
    let mut buffer = [0u8; 1];

    let t = bitmap::set(&counters, &mut buffer, 4, 2, BlockState::AllocatedData).unwrap();
    counters.apply(&t);

    let err = bitmap::set(&counters, &mut buffer, 4, 2, BlockState::AllocatedData).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptionDetected);
    assert!(err.is_fatal());
    assert_eq!(bitmap::test(&buffer, 4, 2).unwrap(), BlockState::AllocatedData);
}

#[test]
fn test_past_end_is_out_of_range() {
    let buffer = [0u8; 1];
    let err = bitmap::test(&buffer, 4, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(!err.is_fatal());
}

#[test]
fn full_group_reports_sentinel() {
    let buffer = [0xFFu8; 8];
    assert_eq!(bitmap::find(&buffer, 32, 17, BlockState::Free).unwrap(), None);
    assert_eq!(bitmap::find_raw(&buffer, 32, 17, BlockState::Free).unwrap(), BFIT_NOT_FOUND);
    assert_eq!(bitmap::find_raw(&buffer, 32, 17, BlockState::AllocatedMeta).unwrap(), 17);
}

#[test]
fn allocate_every_block_in_goal_order() {
    let mut counters = RgrpCounters::new(0x10, 37);
    let mut buffer = [0u8; 10];
    let mut goal = 20;

    // 每次从上次分配的下一个块开始，依次分配完整个资源组
    for expected in (20..37).chain(0..20) {
        let blk = bitmap::find(&buffer, 37, goal, BlockState::Free).unwrap().unwrap();
        assert_eq!(blk, expected);
        let t = bitmap::set(&counters, &mut buffer, 37, blk, BlockState::AllocatedData).unwrap();
        counters.apply(&t);
        goal = (blk + 1) % 37;
    }

    assert_eq!(bitmap::find(&buffer, 37, goal, BlockState::Free).unwrap(), None);
    assert_eq!(counters.used_data, 37);
    assert_eq!(counters.free, 0);
    // 填充字段没有被改动
    assert_eq!(buffer[9] >> 2, 0);
}
