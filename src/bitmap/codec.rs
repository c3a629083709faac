//! 块状态编解码
//!
//! 块 `i` 的状态位于字节 `i / 4` 的第 `(i % 4) * 2` 位起的两位，
//! 第 0 位为字节最低位。

use crate::{
    consts::*,
    error::{Error, ErrorKind, Result},
    types::BlockState,
};

/// 缓冲区可寻址的块数
///
/// 超过 `u32` 的部分不可寻址（`BFIT_NOT_FOUND` 保留）
pub fn capacity(buffer: &[u8]) -> u64 {
    buffer.len() as u64 * BLOCKS_PER_BYTE as u64
}

/// 检查 `total_blocks` 是否能容纳在缓冲区中
pub(crate) fn check_total(buffer: &[u8], total_blocks: u32) -> Result<()> {
    if total_blocks as u64 > capacity(buffer) {
        return Err(Error::new(
            ErrorKind::OutOfRange,
            "Block count exceeds bitmap buffer",
        ));
    }
    Ok(())
}

/// 块索引对应的字节下标和字节内位移
#[inline]
pub(crate) const fn locate(index: u32) -> (usize, u32) {
    (
        (index / BLOCKS_PER_BYTE) as usize,
        (index % BLOCKS_PER_BYTE) * BLOCK_STATE_BITS,
    )
}

/// 从字节中取出第 `pos` 个（0-3）字段
#[inline]
pub(crate) const fn field(byte: u8, pos: u32) -> BlockState {
    BlockState::from_bits(byte >> (pos * BLOCK_STATE_BITS))
}

/// 读取块状态
///
/// # 参数
///
/// * `buffer` - 位图数据
/// * `index` - 块索引（从 0 开始）
///
/// # 返回
///
/// 块状态；索引超出缓冲区时返回 `OutOfRange`
pub fn decode(buffer: &[u8], index: u32) -> Result<BlockState> {
    let (byte_index, shift) = locate(index);
    let byte = buffer
        .get(byte_index)
        .ok_or(Error::new(ErrorKind::OutOfRange, "Bitmap index out of range"))?;

    Ok(BlockState::from_bits(*byte >> shift))
}

/// 写入块状态
///
/// 只修改目标字段，同一字节中的其他三个字段保持不变
pub fn encode(buffer: &mut [u8], index: u32, state: BlockState) -> Result<()> {
    let (byte_index, shift) = locate(index);
    let byte = buffer
        .get_mut(byte_index)
        .ok_or(Error::new(ErrorKind::OutOfRange, "Bitmap index out of range"))?;

    *byte = (*byte & !(BLOCK_STATE_MASK << shift)) | (state.bits() << shift);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        // 块 0 = Free, 块 1 = AllocatedData, 块 2 = ReservedMeta, 块 3 = AllocatedMeta
        let buffer = [0b11_10_01_00u8];

        assert_eq!(decode(&buffer, 0).unwrap(), BlockState::Free);
        assert_eq!(decode(&buffer, 1).unwrap(), BlockState::AllocatedData);
        assert_eq!(decode(&buffer, 2).unwrap(), BlockState::ReservedMeta);
        assert_eq!(decode(&buffer, 3).unwrap(), BlockState::AllocatedMeta);
    }

    #[test]
    fn test_encode_preserves_neighbours() {
        let mut buffer = [0xFFu8, 0x00];

        encode(&mut buffer, 1, BlockState::Free).unwrap();
        assert_eq!(buffer, [0b11_11_00_11, 0x00]);

        encode(&mut buffer, 6, BlockState::ReservedMeta).unwrap();
        assert_eq!(buffer, [0b11_11_00_11, 0b00_10_00_00]);

        encode(&mut buffer, 6, BlockState::AllocatedData).unwrap();
        assert_eq!(decode(&buffer, 6).unwrap(), BlockState::AllocatedData);
        assert_eq!(buffer[1], 0b00_01_00_00);
    }

    #[test]
    fn test_out_of_range() {
        let mut buffer = [0u8; 2]; // 8 blocks

        assert_eq!(decode(&buffer, 8).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(
            encode(&mut buffer, 8, BlockState::Free).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(buffer, [0, 0]);
    }

    #[test]
    fn test_check_total() {
        let buffer = [0u8; 3];
        assert!(check_total(&buffer, 12).is_ok());
        assert!(check_total(&buffer, 0).is_ok());
        assert_eq!(check_total(&buffer, 13).unwrap_err().kind(), ErrorKind::OutOfRange);
    }
}
