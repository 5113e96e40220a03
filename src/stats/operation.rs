// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表各类操作次数

use crate::types::OperationType;
use std::{
    fmt::Write as _,
    sync::atomic::{AtomicU64, Ordering},
};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录一次操作
    fn record(&self, op_type: OperationType);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub add_count: u64,
    pub overwrite_count: u64,
    pub lookup_hit_count: u64,
    pub lookup_miss_count: u64,
    pub remove_count: u64,
    pub remove_miss_count: u64,
    pub bucket_created_count: u64,
    pub bucket_pruned_count: u64,
    pub collision_count: u64,
}

impl OperationStatsSnapshot {
    /// 按操作类型读取计数
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Add => self.add_count,
            OperationType::Overwrite => self.overwrite_count,
            OperationType::LookupHit => self.lookup_hit_count,
            OperationType::LookupMiss => self.lookup_miss_count,
            OperationType::Remove => self.remove_count,
            OperationType::RemoveMiss => self.remove_miss_count,
            OperationType::BucketCreated => self.bucket_created_count,
            OperationType::BucketPruned => self.bucket_pruned_count,
            OperationType::Collision => self.collision_count,
        }
    }

    /// 查询命中率，没有查询时为 0
    pub fn hit_rate(&self) -> f32 {
        let total = self.lookup_hit_count + self.lookup_miss_count;
        if total == 0 {
            0.0
        } else {
            self.lookup_hit_count as f32 / total as f32
        }
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    counters: [AtomicU64; OperationType::ALL.len()],
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        &self.counters[op_type.index()]
    }

    fn load(&self, op_type: OperationType) -> u64 {
        self.counter(op_type).load(Ordering::Relaxed)
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            add_count: self.load(OperationType::Add),
            overwrite_count: self.load(OperationType::Overwrite),
            lookup_hit_count: self.load(OperationType::LookupHit),
            lookup_miss_count: self.load(OperationType::LookupMiss),
            remove_count: self.load(OperationType::Remove),
            remove_miss_count: self.load(OperationType::RemoveMiss),
            bucket_created_count: self.load(OperationType::BucketCreated),
            bucket_pruned_count: self.load(OperationType::BucketPruned),
            collision_count: self.load(OperationType::Collision),
        }
    }

    fn reset(&self) {
        for counter in &self.counters {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();

        for op in OperationType::ALL {
            let name = op.as_str();
            let _ = writeln!(
                output,
                "# HELP sum_hashtable_operation_{name}_count Total {name} operations"
            );
            let _ = writeln!(output, "# TYPE sum_hashtable_operation_{name}_count counter");
            let _ = writeln!(
                output,
                "sum_hashtable_operation_{name}_count {}",
                self.load(op)
            );
        }

        output
    }
}

/// 禁用操作统计实现
#[derive(Debug, Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType) {}
    fn snapshot(&self) -> OperationStatsSnapshot { OperationStatsSnapshot::default() }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String { String::new() }
}
