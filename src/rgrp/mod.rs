//! 资源组
//!
//! 位图引擎与资源组管理器之间的接口：描述符计数和多缓冲区位图

mod bitmaps;
mod counters;

pub use bitmaps::RgrpBitmap;
pub use counters::{RgrpContext, RgrpCounters};
