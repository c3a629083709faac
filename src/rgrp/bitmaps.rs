//! 跨多个缓冲区的资源组位图
//!
//! 一个资源组的位图可能分布在多个缓冲区中，每个缓冲区依次覆盖一段连续的块。
//! `RgrpBitmap` 把资源组内的块号映射到具体缓冲区，并在整个资源组上
//! 提供 test/set/find/count 以及计数校验。

use super::RgrpContext;
use crate::{
    bitmap::{self, bitcount, bitfit, codec},
    consts::*,
    error::{Error, ErrorKind, Result},
    types::{BlockState, Transition},
};

/// 位图段在资源组中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    /// 段下标
    segment: usize,
    /// 段内第一个块的资源组块号
    start: u32,
    /// 段内有效块数
    len: u32,
}

impl Span {
    fn contains(&self, block: u32) -> bool {
        block >= self.start && block - self.start < self.len
    }
}

/// 资源组位图
pub struct RgrpBitmap<'a, S> {
    segments: &'a mut [S],
    data_blocks: u32,
}

impl<'a, S: AsRef<[u8]> + AsMut<[u8]>> RgrpBitmap<'a, S> {
    /// 创建资源组位图
    ///
    /// # 参数
    ///
    /// * `segments` - 按顺序排列的位图缓冲区
    /// * `data_blocks` - 资源组的数据块数
    ///
    /// # 返回
    ///
    /// 缓冲区总容量不足以容纳 `data_blocks` 时返回 `InvalidInput`
    pub fn new(segments: &'a mut [S], data_blocks: u32) -> Result<Self> {
        let capacity: u64 = segments.iter().map(|s| codec::capacity(s.as_ref())).sum();
        if capacity < data_blocks as u64 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Bitmap segments too small for resource group",
            ));
        }

        Ok(Self {
            segments,
            data_blocks,
        })
    }

    /// 资源组的数据块数
    pub fn data_blocks(&self) -> u32 {
        self.data_blocks
    }

    fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        let data = self.data_blocks as u64;
        self.segments
            .iter()
            .enumerate()
            .scan(0u64, move |next, (segment, s)| {
                let start = *next;
                let capacity = codec::capacity(s.as_ref());
                *next += capacity;
                let len = data.saturating_sub(start).min(capacity);
                Some(Span {
                    segment,
                    start: start.min(data) as u32,
                    len: len as u32,
                })
            })
            .filter(|span| span.len > 0)
    }

    fn span_of(&self, block: u32) -> Result<Span> {
        self.spans()
            .find(|span| span.contains(block))
            .ok_or(Error::new(ErrorKind::OutOfRange, "Block outside resource group"))
    }

    /// 读取块状态
    pub fn test(&self, block: u32) -> Result<BlockState> {
        let span = self.span_of(block)?;
        bitmap::test(self.segments[span.segment].as_ref(), span.len, block - span.start)
    }

    /// 修改块状态，规则同 [`bitmap::set`]
    ///
    /// 返回的转换中 `block` 是资源组内块号
    pub fn set<C: RgrpContext + ?Sized>(
        &mut self,
        ctx: &C,
        block: u32,
        new_state: BlockState,
    ) -> Result<Transition> {
        let span = self.span_of(block)?;
        let transition = bitmap::set(
            ctx,
            self.segments[span.segment].as_mut(),
            span.len,
            block - span.start,
            new_state,
        )?;

        Ok(Transition { block, ..transition })
    }

    /// 从 `goal` 开始在整个资源组中查找 `state` 块
    ///
    /// 先扫描 `goal` 所在段的剩余部分，再依次扫描后面的段，
    /// 回绕到第一个段，最后扫描 `goal` 所在段中 `goal` 之前的部分
    pub fn find(&self, goal: u32, state: BlockState) -> Result<Option<u32>> {
        let first = self.span_of(goal)?;
        let buffer = self.segments[first.segment].as_ref();

        if let Some(local) = bitfit::scan_range(buffer, goal - first.start, first.len, state) {
            return Ok(Some(first.start + local));
        }

        let after = self.spans().skip_while(|span| span.segment <= first.segment);
        let before = self.spans().take_while(|span| span.segment < first.segment);
        for span in after.chain(before) {
            let buffer = self.segments[span.segment].as_ref();
            if let Some(local) = bitfit::scan_range(buffer, 0, span.len, state) {
                log::trace!(
                    "[RGRP] goal={} state={:?} found in segment {}",
                    goal,
                    state,
                    span.segment
                );
                return Ok(Some(span.start + local));
            }
        }

        Ok(bitfit::scan_range(buffer, 0, goal - first.start, state).map(|local| first.start + local))
    }

    /// 全部四种状态的块数，按状态编码排列
    pub fn counts(&self) -> [u32; BLKST_COUNT] {
        let mut counts = [0u32; BLKST_COUNT];
        for span in self.spans() {
            let segment = bitcount::tally(self.segments[span.segment].as_ref(), span.len);
            for (total, n) in counts.iter_mut().zip(segment) {
                *total += n;
            }
        }
        counts
    }

    /// 统计处于 `state` 的块数
    pub fn count(&self, state: BlockState) -> u32 {
        self.counts()[state.index()]
    }

    /// 用位图核对资源组描述符中的计数
    ///
    /// 任一状态的计数不一致都返回 `CorruptionDetected`
    pub fn verify<C: RgrpContext + ?Sized>(&self, ctx: &C) -> Result<()> {
        let counts = self.counts();
        let mut consistent = true;

        for state in BlockState::ALL {
            let actual = counts[state.index()];
            let expected = ctx.expected(state);
            if actual != expected {
                log::warn!(
                    "[RGRP] rgrp {:#x}: {:?} count mismatch, bitmap={} descriptor={}",
                    ctx.rgrp_addr(),
                    state,
                    actual,
                    expected
                );
                consistent = false;
            }
        }

        if !consistent {
            log::error!("[RGRP] rgrp {:#x}: bitmap inconsistent with descriptor", ctx.rgrp_addr());
            return Err(Error::new(
                ErrorKind::CorruptionDetected,
                "Resource group counters disagree with bitmap",
            ));
        }

        Ok(())
    }
}
