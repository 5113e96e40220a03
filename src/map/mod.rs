//! 哈希表核心模块 - 求和哈希表及其组件

pub mod hash_table;
pub mod bucket;
pub mod shared;

pub use hash_table::{
    HashTable, HashTableConfig, HashTableStats, DEFAULT_INITIAL_CAPACITY, MAX_INITIAL_CAPACITY,
};
pub use bucket::Bucket;
pub use shared::SharedHashTable;
