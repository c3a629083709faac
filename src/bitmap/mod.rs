//! 块状态位图
//!
//! 每个块用 2 位表示状态，每字节 4 个块，低位对应小的块号。

pub mod bitcount;
pub mod bitfit;
pub mod codec;
mod ops;
pub mod tables;

pub use bitcount::{count, count_set};
pub use bitfit::{find, find_from, find_raw};
pub use ops::{set, test};
