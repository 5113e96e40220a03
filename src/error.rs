//! 统一错误处理 - 校验类操作的错误类型
//!
//! 核心操作（add/lookup/remove/hash）对任意输入都是全函数，不会返回错误；
//! 这里的错误只出现在带检查的辅助操作与配置校验中。

/// 哈希表可能发生的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("键已存在: {key}")]
    KeyAlreadyExists {
        key: String,
    },

    #[error("键不存在: {key}")]
    KeyNotFound {
        key: String,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl TableError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::KeyAlreadyExists { .. } => Some("改用 add 或 update 覆盖已有值"),
            Self::KeyNotFound { .. } => Some("确认键值是否存在，或改用 add 插入"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }

    /// 出错的键（配置错误时为空）
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyAlreadyExists { key } | Self::KeyNotFound { key } => Some(key),
            Self::InvalidConfig { .. } => None,
        }
    }
}
