//! 字符码点求和哈希表
//!
//! 哈希值为键中所有字符 Unicode 码点之和，同一哈希码下的键存放在一个
//! 精确匹配的子映射（桶）中。桶在首次插入时创建，最后一个键删除时回收，
//! 表中不会留下空桶。
//!
//! ## 快速开始
//!
//! ```rust
//! use sum_hashtable::HashTable;
//!
//! let mut table = HashTable::new();
//! table.add("abc", "first");
//! table.add("bac", "second");
//!
//! // "abc" 与 "bac" 哈希码相同 (294)，但互不影响
//! assert_eq!(table.hash("abc"), 294);
//! assert_eq!(table.lookup("abc"), Some(&"first"));
//! assert_eq!(table.lookup("bac"), Some(&"second"));
//!
//! table.remove("abc");
//! table.remove("bac");
//! assert!(!table.contains_hash(294));
//! println!("{}", table);
//! ```

#![warn(clippy::all)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}
// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod map;
pub mod stats;

// 公共接口导出
pub use crate::{
    map::{
        HashTable,
        HashTableConfig,
        HashTableStats,
        Bucket,
        SharedHashTable,
        DEFAULT_INITIAL_CAPACITY,
        MAX_INITIAL_CAPACITY
    },
    hash::{char_sum_hash, collides},
    stats::{
        StatsMode,
        OperationRecorder,
        OperationStatsSnapshot,
        record_operation,
        operation_snapshot,
        reset_stats,
        export_prometheus
    },
    error::TableError,
    types::{HashCode, OperationType}
};

// 简化默认类型别名
pub type StringTable = HashTable<String>;

/// 批量插入，返回新增（非覆盖）的键数量
pub fn batch_add<K: Into<String>, V>(
    table: &mut HashTable<V>,
    items: impl IntoIterator<Item = (K, V)>
) -> usize {
    let mut count = 0;
    for (k, v) in items {
        if table.add(k, v).is_none() {
            count += 1;
        }
    }
    count
}

/// 批量查询
pub fn batch_lookup<'a, V>(
    table: &'a HashTable<V>,
    keys: impl IntoIterator<Item = &'a str>
) -> Vec<Option<&'a V>> {
    keys.into_iter().map(|k| table.lookup(k)).collect()
}
