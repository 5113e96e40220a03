// src/map/bucket.rs
//! 桶实现 - 同一哈希码下所有键的精确匹配映射

use ahash::RandomState;
use std::{collections::HashMap, fmt};

/// 桶：哈希码相同的键值对集合，桶内键唯一
///
/// 存入哈希表的桶永远非空；最后一个键被删除时桶随之回收。
#[derive(Clone)]
pub struct Bucket<V> {
    entries: HashMap<String, V, RandomState>,
}

impl<V> Default for Bucket<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Bucket<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// 插入或覆盖，返回被替换的旧值
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 遍历桶内键值对，顺序不保证
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 按键排序后的键值对，供诊断输出使用
    pub fn sorted_entries(&self) -> Vec<(&str, &V)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// 按键排序后的键列表
    pub fn keys(&self) -> Vec<&str> {
        self.sorted_entries().into_iter().map(|(k, _)| k).collect()
    }
}

impl<V: fmt::Debug> fmt::Debug for Bucket<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sorted_entries()).finish()
    }
}
