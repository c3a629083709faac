//! 字节查找表
//!
//! 两张表都以字节值为下标（256 项），在编译期由 `const fn` 生成，
//! 之后只读，可被任意线程并发读取。
//!
//! - `COUNT_TABLE[byte][state]`：字节中等于 `state` 的字段个数
//! - `FIRST_OFFSET_TABLE[byte][state]`：字节中第一个等于 `state` 的字段位置（0-3），
//!   不存在时为 [`NO_OFFSET`]
//!
//! bitfit 和 bitcount 借助它们一次处理 4 个块。

use crate::{consts::*, types::BlockState};

static COUNT_TABLE: [[u8; BLKST_COUNT]; 256] = build_count_table();

static FIRST_OFFSET_TABLE: [[u8; BLKST_COUNT]; 256] = build_first_offset_table();

const fn build_count_table() -> [[u8; BLKST_COUNT]; 256] {
    let mut table = [[0u8; BLKST_COUNT]; 256];
    let mut byte: usize = 0;
    while byte < 256 {
        let mut pos = 0;
        while pos < BLOCKS_PER_BYTE {
            let state = (byte >> (pos * BLOCK_STATE_BITS)) as u8 & BLOCK_STATE_MASK;
            table[byte][state as usize] += 1;
            pos += 1;
        }
        byte += 1;
    }
    table
}

const fn build_first_offset_table() -> [[u8; BLKST_COUNT]; 256] {
    let mut table = [[NO_OFFSET; BLKST_COUNT]; 256];
    let mut byte: usize = 0;
    while byte < 256 {
        // 从高位往低位扫，最后写入的就是最低位置
        let mut pos = BLOCKS_PER_BYTE;
        while pos > 0 {
            pos -= 1;
            let state = (byte >> (pos * BLOCK_STATE_BITS)) as u8 & BLOCK_STATE_MASK;
            table[byte][state as usize] = pos as u8;
        }
        byte += 1;
    }
    table
}

/// 字节中处于 `state` 的块数
#[inline]
pub fn count_in_byte(byte: u8, state: BlockState) -> u32 {
    COUNT_TABLE[byte as usize][state.index()] as u32
}

/// 字节中第一个处于 `state` 的块的位置
#[inline]
pub fn first_in_byte(byte: u8, state: BlockState) -> Option<u32> {
    match FIRST_OFFSET_TABLE[byte as usize][state.index()] {
        NO_OFFSET => None,
        pos => Some(pos as u32),
    }
}

/// 字节中全部四种状态的计数
#[inline]
pub fn counts_of_byte(byte: u8) -> &'static [u8; BLKST_COUNT] {
    &COUNT_TABLE[byte as usize]
}
