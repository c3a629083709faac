//! rgrp_bits: 资源组块状态位图引擎
//!
//! 集群文件系统中每个资源组用 2 位/块的位图记录块的分配状态。
//! 这个库在调用者已经加载好的位图缓冲区上做纯计算：
//! - **不做 I/O**，缓冲区的读写由日志/缓冲子系统负责
//! - **不加锁**，调用者在整个操作序列上持有资源组锁
//! - **检测损坏**，非法状态转换返回致命的 `CorruptionDetected`
//!
//! # 示例
//!
//! ```rust
//! use rgrp_bits::{bitmap, BlockState, RgrpCounters};
//!
//! let mut counters = RgrpCounters::new(0x1000, 4);
//! let mut buffer = [0u8; 1];
//!
//! let goal = bitmap::find(&buffer, 4, 0, BlockState::Free)?.unwrap();
//! let t = bitmap::set(&counters, &mut buffer, 4, goal, BlockState::AllocatedData)?;
//! counters.apply(&t);
//!
//! assert_eq!(bitmap::test(&buffer, 4, goal)?, BlockState::AllocatedData);
//! assert_eq!(bitmap::count(&counters, &buffer, 4, BlockState::Free)?, 3);
//! # Ok::<(), rgrp_bits::Error>(())
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`consts`] - 常量定义
//! - [`types`] - 块状态与转换
//! - [`bitmap`] - 编解码、查找表、test/set、bitfit、bitcount
//! - [`rgrp`] - 资源组上下文与多缓冲区位图

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate alloc;

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 块状态类型
pub mod types;

/// 位图操作
pub mod bitmap;

/// 资源组
pub mod rgrp;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 常量
pub use consts::BFIT_NOT_FOUND;

// 类型
pub use types::{BlockState, StateSet, Transition};

// 资源组
pub use rgrp::{RgrpBitmap, RgrpContext, RgrpCounters};
