//! 错误类型定义
//!
//! 提供位图操作的错误类型。

use core::fmt;

/// 位图操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 块索引、目标或块数超出位图容量（调用者错误，可恢复）
    OutOfRange,
    /// 非法状态转换或计数不一致（致命，需要 withdraw 文件系统）
    CorruptionDetected,
    /// 无效参数
    InvalidInput,
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// 是否为致命错误
    ///
    /// 致命错误必须上报给文件系统的故障处理器，不能重试
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::CorruptionDetected)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result 类型别名
pub type Result<T> = core::result::Result<T, Error>;
