//! 单块状态读写
//!
//! `test` 读取一个块的状态，`set` 按分配生命周期修改一个块的状态。

use super::codec;
use crate::{
    error::{Error, ErrorKind, Result},
    rgrp::RgrpContext,
    types::{BlockState, Transition},
};

fn check_index(buffer: &[u8], total_blocks: u32, index: u32) -> Result<()> {
    codec::check_total(buffer, total_blocks)?;
    if index >= total_blocks {
        return Err(Error::new(ErrorKind::OutOfRange, "Block index out of range"));
    }
    Ok(())
}

/// 读取块状态
///
/// # 参数
///
/// * `buffer` - 位图数据
/// * `total_blocks` - 位图中有效的块数
/// * `index` - 块索引
///
/// # 返回
///
/// 块状态；`index >= total_blocks` 时返回 `OutOfRange`
pub fn test(buffer: &[u8], total_blocks: u32, index: u32) -> Result<BlockState> {
    check_index(buffer, total_blocks, index)?;
    codec::decode(buffer, index)
}

/// 修改块状态
///
/// # 参数
///
/// * `ctx` - 资源组上下文
/// * `buffer` - 位图数据
/// * `total_blocks` - 位图中有效的块数
/// * `index` - 块索引
/// * `new_state` - 新状态
///
/// # 返回
///
/// 成功返回执行的转换，调用者据此更新资源组计数
///
/// # 错误
///
/// * `OutOfRange` - 索引越界
/// * `CorruptionDetected` - 转换不在生命周期内，或描述符认为没有块处于原状态。
///   此时位图保持不变
pub fn set<C: RgrpContext + ?Sized>(
    ctx: &C,
    buffer: &mut [u8],
    total_blocks: u32,
    index: u32,
    new_state: BlockState,
) -> Result<Transition> {
    check_index(buffer, total_blocks, index)?;

    let current = codec::decode(buffer, index)?;

    if !current.can_transition(new_state) {
        log::error!(
            "[SETBIT] rgrp {:#x}: illegal transition {:?} -> {:?} at block {}",
            ctx.rgrp_addr(),
            current,
            new_state,
            index
        );
        return Err(Error::new(
            ErrorKind::CorruptionDetected,
            "Illegal block state transition",
        ));
    }

    if ctx.expected(current) == 0 {
        log::error!(
            "[SETBIT] rgrp {:#x}: block {} is {:?} but descriptor counts none",
            ctx.rgrp_addr(),
            index,
            current
        );
        return Err(Error::new(
            ErrorKind::CorruptionDetected,
            "Bitmap disagrees with resource group counters",
        ));
    }

    codec::encode(buffer, index, new_state)?;

    Ok(Transition {
        block: index,
        from: current,
        to: new_state,
    })
}
