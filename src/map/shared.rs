//! 共享哈希表 - 外部加锁的多线程访问封装
//!
//! 核心 `HashTable` 只支持单线程可变访问；需要跨线程共享时用一把读写锁
//! 保护整张表。

use crate::{map::hash_table::HashTable, types::HashCode};
use parking_lot::RwLock;
use std::sync::Arc;

/// 可克隆的共享句柄，所有克隆指向同一张表
pub struct SharedHashTable<V> {
    inner: Arc<RwLock<HashTable<V>>>,
}

impl<V> Clone for SharedHashTable<V> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<V> Default for SharedHashTable<V> {
    fn default() -> Self {
        Self::new(HashTable::new())
    }
}

impl<V> From<HashTable<V>> for SharedHashTable<V> {
    fn from(table: HashTable<V>) -> Self {
        Self::new(table)
    }
}

impl<V> SharedHashTable<V> {
    pub fn new(table: HashTable<V>) -> Self {
        Self { inner: Arc::new(RwLock::new(table)) }
    }

    pub fn add(&self, key: impl Into<String>, value: V) -> Option<V> {
        self.inner.write().add(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn contains_hash(&self, hash: HashCode) -> bool {
        self.inner.read().contains_hash(hash)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// 持读锁执行闭包
    pub fn read<R>(&self, f: impl FnOnce(&HashTable<V>) -> R) -> R {
        f(&self.inner.read())
    }

    /// 持写锁执行闭包，多步修改在同一把锁内完成
    pub fn write<R>(&self, f: impl FnOnce(&mut HashTable<V>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<V: Clone> SharedHashTable<V> {
    /// 查询并克隆值，锁不会跨越调用返回
    pub fn lookup(&self, key: &str) -> Option<V> {
        self.inner.read().lookup(key).cloned()
    }
}
