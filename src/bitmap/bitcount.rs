//! bitcount：统计位图中处于指定状态的块数
//!
//! 资源组管理器用它核对描述符中缓存的计数。

use super::{codec, tables};
use crate::{
    consts::*,
    error::Result,
    rgrp::RgrpContext,
    types::{BlockState, StateSet},
};

/// 逐字节累加四种状态的计数
///
/// 尾部不完整的字节逐字段统计，超出 `total_blocks` 的填充字段不计入
pub(crate) fn tally(buffer: &[u8], total_blocks: u32) -> [u32; BLKST_COUNT] {
    let full_bytes = (total_blocks / BLOCKS_PER_BYTE) as usize;
    let tail = total_blocks % BLOCKS_PER_BYTE;
    let mut counts = [0u32; BLKST_COUNT];

    for &byte in &buffer[..full_bytes] {
        for (count, &n) in counts.iter_mut().zip(tables::counts_of_byte(byte)) {
            *count += n as u32;
        }
    }

    if tail != 0 {
        let byte = buffer[full_bytes];
        for pos in 0..tail {
            counts[codec::field(byte, pos).index()] += 1;
        }
    }

    counts
}

fn count_one(buffer: &[u8], total_blocks: u32, state: BlockState) -> u32 {
    let full_bytes = (total_blocks / BLOCKS_PER_BYTE) as usize;
    let tail = total_blocks % BLOCKS_PER_BYTE;

    let mut count: u32 = buffer[..full_bytes]
        .iter()
        .map(|&byte| tables::count_in_byte(byte, state))
        .sum();

    if tail != 0 {
        let byte = buffer[full_bytes];
        count += (0..tail).filter(|&pos| codec::field(byte, pos) == state).count() as u32;
    }

    count
}

/// 统计处于 `state` 的块数
///
/// # 参数
///
/// * `ctx` - 资源组上下文（用于日志）
/// * `buffer` - 位图数据
/// * `total_blocks` - 位图中有效的块数
/// * `state` - 目标状态
///
/// # 返回
///
/// 块数；`total_blocks` 超出缓冲区容量时返回 `OutOfRange`
pub fn count<C: RgrpContext + ?Sized>(
    ctx: &C,
    buffer: &[u8],
    total_blocks: u32,
    state: BlockState,
) -> Result<u32> {
    codec::check_total(buffer, total_blocks)?;

    let count = count_one(buffer, total_blocks, state);
    log::trace!(
        "[BITCOUNT] rgrp {:#x}: {} of {} blocks are {:?}",
        ctx.rgrp_addr(),
        count,
        total_blocks,
        state
    );
    Ok(count)
}

/// 统计处于 `states` 中任一状态的块数
pub fn count_set<C: RgrpContext + ?Sized>(
    ctx: &C,
    buffer: &[u8],
    total_blocks: u32,
    states: StateSet,
) -> Result<u32> {
    codec::check_total(buffer, total_blocks)?;

    let counts = tally(buffer, total_blocks);
    let count: u32 = states.states().map(|s| counts[s.index()]).sum();
    log::trace!(
        "[BITCOUNT] rgrp {:#x}: {} of {} blocks are in {:?}",
        ctx.rgrp_addr(),
        count,
        total_blocks,
        states
    );
    Ok(count)
}
