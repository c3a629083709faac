//! 资源组描述符计数
//!
//! 位图引擎只读取这些计数，更新它们是资源组管理器的职责。

use crate::types::{BlockState, Transition};

/// 资源组上下文
///
/// 由资源组管理器实现，向位图引擎提供描述符中缓存的计数。
/// 引擎用它校验状态转换，并在日志中标识资源组。
pub trait RgrpContext {
    /// 资源组的磁盘地址（仅用于日志）
    fn rgrp_addr(&self) -> u64;

    /// 描述符认为处于 `state` 的块数
    fn expected(&self, state: BlockState) -> u32;
}

/// 资源组描述符中的块计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgrpCounters {
    /// 资源组地址
    pub addr: u64,
    /// 空闲块数
    pub free: u32,
    /// 已分配数据块数
    pub used_data: u32,
    /// 预留元数据块数
    pub free_meta: u32,
    /// 已分配元数据块数
    pub used_meta: u32,
}

impl RgrpCounters {
    /// 全部空闲的资源组
    pub const fn new(addr: u64, data_blocks: u32) -> Self {
        Self {
            addr,
            free: data_blocks,
            used_data: 0,
            free_meta: 0,
            used_meta: 0,
        }
    }

    /// 计数之和
    ///
    /// 一致的描述符中等于资源组的数据块数
    pub fn total(&self) -> u64 {
        self.free as u64 + self.used_data as u64 + self.free_meta as u64 + self.used_meta as u64
    }

    fn slot(&mut self, state: BlockState) -> &mut u32 {
        match state {
            BlockState::Free => &mut self.free,
            BlockState::AllocatedData => &mut self.used_data,
            BlockState::ReservedMeta => &mut self.free_meta,
            BlockState::AllocatedMeta => &mut self.used_meta,
        }
    }

    /// 按一次转换更新计数
    ///
    /// 计数已经为 0 时保持为 0；`set` 已经拒绝了这种转换
    pub fn apply(&mut self, transition: &Transition) {
        let from = self.slot(transition.from);
        *from = from.saturating_sub(1);
        let to = self.slot(transition.to);
        *to = to.saturating_add(1);
    }
}

impl RgrpContext for RgrpCounters {
    fn rgrp_addr(&self) -> u64 {
        self.addr
    }

    fn expected(&self, state: BlockState) -> u32 {
        match state {
            BlockState::Free => self.free,
            BlockState::AllocatedData => self.used_data,
            BlockState::ReservedMeta => self.free_meta,
            BlockState::AllocatedMeta => self.used_meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_transition() {
        let mut counters = RgrpCounters::new(0x1000, 16);
        assert_eq!(counters.total(), 16);

        counters.apply(&Transition {
            block: 3,
            from: BlockState::Free,
            to: BlockState::ReservedMeta,
        });
        counters.apply(&Transition {
            block: 3,
            from: BlockState::ReservedMeta,
            to: BlockState::AllocatedMeta,
        });

        assert_eq!(counters.expected(BlockState::Free), 15);
        assert_eq!(counters.expected(BlockState::ReservedMeta), 0);
        assert_eq!(counters.expected(BlockState::AllocatedMeta), 1);
        assert_eq!(counters.total(), 16);
    }
}
