//! 块状态类型定义
//!
//! ## 设计原则
//!
//! 1. **磁盘编码** - `BlockState` 的判别值即磁盘上的 2 位编码
//! 2. **生命周期** - 合法的状态转换集中定义在 [`BlockState::allowed_targets`]
//! 3. **集合** - 多个状态的组合使用 `StateSet` 位标志表示

use crate::consts::*;
use crate::error::{Error, ErrorKind};
use bitflags::bitflags;

/// 块的分配状态
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockState {
    /// 空闲
    Free = BLKST_FREE,
    /// 已分配的数据块
    AllocatedData = BLKST_USED_DATA,
    /// 预留的元数据块（尚未写入）
    ReservedMeta = BLKST_FREE_META,
    /// 已分配的元数据块
    AllocatedMeta = BLKST_USED_META,
}

bitflags! {
    /// 块状态集合
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StateSet: u8 {
        /// 空闲
        const FREE           = 1 << BLKST_FREE;
        /// 已分配的数据块
        const ALLOCATED_DATA = 1 << BLKST_USED_DATA;
        /// 预留的元数据块
        const RESERVED_META  = 1 << BLKST_FREE_META;
        /// 已分配的元数据块
        const ALLOCATED_META = 1 << BLKST_USED_META;
    }
}

impl BlockState {
    /// 全部状态，按编码顺序排列
    pub const ALL: [BlockState; BLKST_COUNT] = [
        BlockState::Free,
        BlockState::AllocatedData,
        BlockState::ReservedMeta,
        BlockState::AllocatedMeta,
    ];

    /// 从 2 位字段解码
    ///
    /// 高位会被忽略，因此任何字节值都能得到合法状态
    pub const fn from_bits(bits: u8) -> Self {
        match bits & BLOCK_STATE_MASK {
            BLKST_FREE => BlockState::Free,
            BLKST_USED_DATA => BlockState::AllocatedData,
            BLKST_FREE_META => BlockState::ReservedMeta,
            _ => BlockState::AllocatedMeta,
        }
    }

    /// 磁盘编码
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// 作为查找表下标
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 只包含自身的集合
    pub const fn as_set(self) -> StateSet {
        StateSet::from_bits_truncate(1 << self.bits())
    }

    /// 从该状态出发允许到达的状态
    pub const fn allowed_targets(self) -> StateSet {
        match self {
            BlockState::Free => StateSet::ALLOCATED_DATA.union(StateSet::RESERVED_META),
            BlockState::AllocatedData => StateSet::FREE,
            BlockState::ReservedMeta => StateSet::ALLOCATED_META.union(StateSet::FREE),
            BlockState::AllocatedMeta => StateSet::FREE.union(StateSet::RESERVED_META),
        }
    }

    /// 转换 `self -> to` 是否合法
    pub const fn can_transition(self, to: BlockState) -> bool {
        self.allowed_targets().contains(to.as_set())
    }
}

impl TryFrom<u8> for BlockState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > BLOCK_STATE_MASK {
            return Err(Error::new(ErrorKind::InvalidInput, "Block state value out of range"));
        }
        Ok(BlockState::from_bits(value))
    }
}

impl From<BlockState> for u8 {
    fn from(state: BlockState) -> Self {
        state.bits()
    }
}

impl StateSet {
    /// 集合中的状态，按编码顺序迭代
    pub fn states(self) -> impl Iterator<Item = BlockState> {
        BlockState::ALL.into_iter().filter(move |s| self.contains(s.as_set()))
    }
}

/// 一次已执行的状态转换
///
/// 由 [`crate::bitmap::set`] 返回，调用者据此更新资源组计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// 块索引
    pub block: u32,
    /// 原状态
    pub from: BlockState,
    /// 新状态
    pub to: BlockState,
}
