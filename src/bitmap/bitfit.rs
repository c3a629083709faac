//! bitfit：从目标块开始查找最近的指定状态块
//!
//! 目标所在字节中目标之前的字段不能参与匹配，所以逐个字段检查；
//! 之后的每个整字节用 `FIRST_OFFSET_TABLE` 一次判断 4 个块，
//! 不含目标状态的字节整体跳过。
//!
//! 扫描到位图末尾仍未找到时，`find` 回绕到块 0，一直扫描到目标之前，
//! 每个块在一次调用中恰好被检查一次。

use super::{codec, tables};
use crate::{
    consts::*,
    error::{Error, ErrorKind, Result},
    types::BlockState,
};

/// 在 `[start, end)` 中查找第一个处于 `state` 的块
///
/// 调用者保证 `end` 不超过缓冲区容量
pub(crate) fn scan_range(buffer: &[u8], start: u32, end: u32, state: BlockState) -> Option<u32> {
    if start >= end {
        return None;
    }

    // 目标所在字节的剩余部分
    let mut blk = start;
    while blk % BLOCKS_PER_BYTE != 0 {
        if blk >= end {
            return None;
        }
        let (byte_index, _) = codec::locate(blk);
        if codec::field(buffer[byte_index], blk % BLOCKS_PER_BYTE) == state {
            return Some(blk);
        }
        blk += 1;
    }

    let first_byte = (blk / BLOCKS_PER_BYTE) as usize;
    let last_byte = end.div_ceil(BLOCKS_PER_BYTE) as usize;
    let bytes = buffer.get(first_byte..last_byte)?;

    for (i, &byte) in bytes.iter().enumerate() {
        if let Some(pos) = tables::first_in_byte(byte, state) {
            let found = (first_byte + i) as u64 * BLOCKS_PER_BYTE as u64 + pos as u64;
            // 尾部不完整字节中超出 end 的字段不算；字节内第一个匹配已越界，后面的也一样
            return (found < end as u64).then_some(found as u32);
        }
    }

    None
}

fn check_goal(buffer: &[u8], total_blocks: u32, goal: u32) -> Result<()> {
    codec::check_total(buffer, total_blocks)?;
    if goal >= total_blocks {
        return Err(Error::new(ErrorKind::OutOfRange, "Search goal out of range"));
    }
    Ok(())
}

/// 从 `goal` 开始查找最近的 `state` 块，必要时回绕
///
/// # 参数
///
/// * `buffer` - 位图数据
/// * `total_blocks` - 位图中有效的块数
/// * `goal` - 起始块索引（不要求本身处于 `state`）
/// * `state` - 目标状态
///
/// # 返回
///
/// 找到返回块索引，所有块都不匹配时返回 `None`；
/// `goal >= total_blocks` 时返回 `OutOfRange`
pub fn find(buffer: &[u8], total_blocks: u32, goal: u32, state: BlockState) -> Result<Option<u32>> {
    check_goal(buffer, total_blocks, goal)?;

    if let Some(blk) = scan_range(buffer, goal, total_blocks, state) {
        log::trace!("[BITFIT] goal={} state={:?} -> {}", goal, state, blk);
        return Ok(Some(blk));
    }

    let wrapped = scan_range(buffer, 0, goal, state);
    log::trace!(
        "[BITFIT] goal={} state={:?} wrapped -> {:?}",
        goal,
        state,
        wrapped
    );
    Ok(wrapped)
}

/// 从 `goal` 开始向后查找，不回绕
///
/// 只检查 `[goal, total_blocks)`，供自行处理回绕的调用者使用
pub fn find_from(
    buffer: &[u8],
    total_blocks: u32,
    goal: u32,
    state: BlockState,
) -> Result<Option<u32>> {
    check_goal(buffer, total_blocks, goal)?;
    Ok(scan_range(buffer, goal, total_blocks, state))
}

/// 同 [`find`]，但未找到时返回哨兵值 [`BFIT_NOT_FOUND`]
pub fn find_raw(buffer: &[u8], total_blocks: u32, goal: u32, state: BlockState) -> Result<u32> {
    Ok(find(buffer, total_blocks, goal, state)?.unwrap_or(BFIT_NOT_FOUND))
}
