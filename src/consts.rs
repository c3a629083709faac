//! 位图常量定义
//!
//! 这个模块包含了资源组块状态位图的所有常量定义，包括：
//! - 位图打包格式
//! - 块状态编码（持久化在磁盘上，不可更改）
//! - 查找哨兵值

//=============================================================================
// 打包格式
//=============================================================================

/// 每个块状态占用的位数
pub const BLOCK_STATE_BITS: u32 = 2;

/// 单个块状态字段的掩码
pub const BLOCK_STATE_MASK: u8 = 0x03;

/// 每字节包含的块数
pub const BLOCKS_PER_BYTE: u32 = 8 / BLOCK_STATE_BITS;

//=============================================================================
// 块状态编码
//=============================================================================

/// 空闲块
pub const BLKST_FREE: u8 = 0;

/// 已分配的数据块
pub const BLKST_USED_DATA: u8 = 1;

/// 已预留但尚未写入的元数据块
pub const BLKST_FREE_META: u8 = 2;

/// 已分配的元数据块
pub const BLKST_USED_META: u8 = 3;

/// 状态种类数
pub const BLKST_COUNT: usize = 4;

//=============================================================================
// 查找
//=============================================================================

/// bitfit 未找到时的哨兵值
///
/// 有效块索引总小于位图容量，因此不会与之冲突
pub const BFIT_NOT_FOUND: u32 = 0xFFFF_FFFF;

/// 查找表中"字节内不存在该状态"的标记
pub const NO_OFFSET: u8 = 0xFF;
