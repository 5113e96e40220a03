//! 统计模块 - 统一管理哈希表操作指标

pub mod operation;

use std::sync::Arc;

pub use operation::{
    AtomicOperationStats, DisabledOperationRecorder, OperationRecorder, OperationStatsSnapshot,
};

use crate::types::OperationType;

/// 全局统计记录器，`StatsMode::Global` 的哈希表共享它
pub static GLOBAL_STATS: once_cell::sync::Lazy<Arc<AtomicOperationStats>> =
    once_cell::sync::Lazy::new(|| Arc::new(AtomicOperationStats::new()));

/// 统计模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsMode {
    /// 不记录
    Disabled,
    /// 每张表独立计数
    #[default]
    Local,
    /// 计入进程级全局记录器
    Global,
}

impl StatsMode {
    /// 按模式创建记录器
    pub fn recorder(self) -> Arc<dyn OperationRecorder> {
        match self {
            StatsMode::Disabled => Arc::new(DisabledOperationRecorder),
            StatsMode::Local => Arc::new(AtomicOperationStats::new()),
            StatsMode::Global => GLOBAL_STATS.clone(),
        }
    }
}

/// 记录操作统计
pub fn record_operation(op_type: OperationType) {
    GLOBAL_STATS.record(op_type);
}

/// 获取操作统计快照
pub fn operation_snapshot() -> OperationStatsSnapshot {
    GLOBAL_STATS.snapshot()
}

/// 重置所有统计
pub fn reset_stats() {
    GLOBAL_STATS.reset();
}

/// 导出Prometheus格式指标
pub fn export_prometheus() -> String {
    GLOBAL_STATS.export_prometheus()
}
