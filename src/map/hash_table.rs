//! 求和哈希表核心实现

use crate::{
    error::TableError,
    hash::char_sum_hash,
    map::bucket::Bucket,
    stats::{OperationRecorder, OperationStatsSnapshot, StatsMode},
    types::{HashCode, OperationType},
};
use ahash::RandomState;
use std::{collections::HashMap, fmt, sync::Arc};

/// 外层映射默认预分配的桶位数
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;
/// 允许的最大预分配桶位数
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// 哈希表配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashTableConfig {
    // 外层映射预分配容量，不触发任何扩缩容策略
    pub initial_capacity: usize,
    pub stats_mode: StatsMode,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            stats_mode: StatsMode::Local,
        }
    }
}

impl HashTableConfig {
    /// 校验配置参数
    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(TableError::InvalidConfig {
                reason: format!(
                    "initial_capacity {} exceeds maximum {}",
                    self.initial_capacity, MAX_INITIAL_CAPACITY
                ),
            });
        }
        Ok(())
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HashTableStats {
    pub len: usize,
    pub bucket_count: usize,
    pub largest_bucket: usize,
    /// 位于多键桶中的键数量
    pub colliding_keys: usize,
    pub operations: OperationStatsSnapshot,
}

/// 以字符码点之和为哈希、桶内精确匹配解决冲突的哈希表
///
/// 不变式：表中出现的每个哈希码都对应一个非空桶。
pub struct HashTable<V> {
    // 哈希码 -> 桶
    collection: HashMap<HashCode, Bucket<V>, RandomState>,
    // 全部桶内键值对总数
    len: usize,
    config: HashTableConfig,
    stats_recorder: Arc<dyn OperationRecorder>,
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// 创建默认配置的空表
    pub fn new() -> Self {
        Self::build(HashTableConfig::default())
    }

    /// 按配置创建空表；配置无效时回退到默认容量
    pub fn with_config(config: HashTableConfig) -> Self {
        match config.validate() {
            Ok(()) => Self::build(config),
            Err(_err) => {
                log_warn!("{}, falling back to default capacity", _err);
                Self::build(HashTableConfig {
                    initial_capacity: DEFAULT_INITIAL_CAPACITY,
                    ..config
                })
            }
        }
    }

    /// 按配置创建空表，配置无效时返回错误
    pub fn try_with_config(config: HashTableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: HashTableConfig) -> Self {
        log_info!(
            "creating hash table: initial_capacity={}, stats_mode={:?}",
            config.initial_capacity,
            config.stats_mode
        );
        Self {
            collection: HashMap::with_capacity_and_hasher(
                config.initial_capacity,
                RandomState::new(),
            ),
            len: 0,
            stats_recorder: config.stats_mode.recorder(),
            config,
        }
    }

    /// 计算键的哈希码
    pub fn hash(&self, key: &str) -> HashCode {
        char_sum_hash(key)
    }

    /// 插入或覆盖键值对，返回被替换的旧值
    ///
    /// 对任意键（包括空串）都不会失败。
    pub fn add(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let hashed_key = char_sum_hash(&key);
        let recorder = &self.stats_recorder;

        let bucket = self.collection.entry(hashed_key).or_insert_with(|| {
            log_debug!("bucket {} created", hashed_key);
            recorder.record(OperationType::BucketCreated);
            Bucket::new()
        });

        if !bucket.is_empty() && !bucket.contains_key(&key) {
            recorder.record(OperationType::Collision);
        }

        match bucket.insert(key, value) {
            Some(old) => {
                recorder.record(OperationType::Overwrite);
                Some(old)
            }
            None => {
                self.len += 1;
                recorder.record(OperationType::Add);
                None
            }
        }
    }

    /// 查询键对应的值，不存在时返回 `None`
    pub fn lookup(&self, key: &str) -> Option<&V> {
        let found = self
            .collection
            .get(&char_sum_hash(key))
            .and_then(|bucket| bucket.get(key));
        self.stats_recorder.record(if found.is_some() {
            OperationType::LookupHit
        } else {
            OperationType::LookupMiss
        });
        found
    }

    /// 获取值的可变引用
    pub fn lookup_mut(&mut self, key: &str) -> Option<&mut V> {
        let found = self
            .collection
            .get_mut(&char_sum_hash(key))
            .and_then(|bucket| bucket.get_mut(key));
        self.stats_recorder.record(if found.is_some() {
            OperationType::LookupHit
        } else {
            OperationType::LookupMiss
        });
        found
    }

    /// 删除键值对；键不存在时为空操作
    ///
    /// 桶中最后一个键被删除时，桶本身也从表中移除。
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let hashed_key = char_sum_hash(key);

        let Some(bucket) = self.collection.get_mut(&hashed_key) else {
            self.stats_recorder.record(OperationType::RemoveMiss);
            return None;
        };
        let Some(value) = bucket.remove(key) else {
            self.stats_recorder.record(OperationType::RemoveMiss);
            return None;
        };

        if bucket.is_empty() {
            self.collection.remove(&hashed_key);
            log_debug!("bucket {} pruned", hashed_key);
            self.stats_recorder.record(OperationType::BucketPruned);
        }
        self.len -= 1;
        self.stats_recorder.record(OperationType::Remove);
        Some(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.collection
            .get(&char_sum_hash(key))
            .is_some_and(|bucket| bucket.contains_key(key))
    }

    /// 键值对总数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 清空所有桶
    pub fn clear(&mut self) {
        self.collection.clear();
        self.len = 0;
    }

    /// 遍历全部键值对，顺序不保证
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.collection.values().flat_map(|bucket| bucket.iter())
    }

    /// 仅插入新键，键已存在时返回错误且不修改表
    pub fn insert_new(&mut self, key: impl Into<String>, value: V) -> Result<(), TableError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(TableError::KeyAlreadyExists { key });
        }
        self.add(key, value);
        Ok(())
    }

    /// 仅更新已有键，返回旧值
    pub fn update(&mut self, key: &str, value: V) -> Result<V, TableError> {
        let slot = self
            .collection
            .get_mut(&char_sum_hash(key))
            .and_then(|bucket| bucket.get_mut(key));
        match slot {
            Some(slot) => {
                let old = std::mem::replace(slot, value);
                self.stats_recorder.record(OperationType::Overwrite);
                Ok(old)
            }
            None => Err(TableError::KeyNotFound { key: key.to_string() }),
        }
    }

    /// 删除并返回值，键不存在时返回错误
    pub fn take(&mut self, key: &str) -> Result<V, TableError> {
        self.remove(key).ok_or_else(|| TableError::KeyNotFound { key: key.to_string() })
    }

    /// 获取某个哈希码对应的桶
    pub fn bucket(&self, hash: HashCode) -> Option<&Bucket<V>> {
        self.collection.get(&hash)
    }

    pub fn contains_hash(&self, hash: HashCode) -> bool {
        self.collection.contains_key(&hash)
    }

    /// 当前存在的桶数量
    pub fn bucket_count(&self) -> usize {
        self.collection.len()
    }

    /// 升序排列的全部哈希码
    pub fn hash_codes(&self) -> Vec<HashCode> {
        let mut codes: Vec<_> = self.collection.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// 遍历 (哈希码, 桶)，顺序不保证
    pub fn buckets(&self) -> impl Iterator<Item = (HashCode, &Bucket<V>)> {
        self.collection.iter().map(|(h, b)| (*h, b))
    }

    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    /// 获取统计信息
    pub fn stats(&self) -> HashTableStats {
        let (largest_bucket, colliding_keys) =
            self.collection.values().fold((0, 0), |(largest, colliding), bucket| {
                let n = bucket.len();
                (largest.max(n), if n > 1 { colliding + n } else { colliding })
            });

        HashTableStats {
            len: self.len,
            bucket_count: self.bucket_count(),
            largest_bucket,
            colliding_keys,
            operations: self.stats_recorder.snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats_recorder.export_prometheus()
    }
}

impl<V: Clone> Clone for HashTable<V> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            len: self.len,
            config: self.config.clone(),
            // 克隆出的表重新计数
            stats_recorder: self.config.stats_mode.recorder(),
        }
    }
}

impl<V> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("bucket_count", &self.bucket_count())
            .field("stats_mode", &self.config.stats_mode)
            .finish()
    }
}

/// 诊断输出：`{哈希码: {键: 值, ...}, ...}`，哈希码与键均升序
impl<V: fmt::Debug> fmt::Display for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for hash in self.hash_codes() {
            if let Some(bucket) = self.collection.get(&hash) {
                map.entry(&hash, bucket);
            }
        }
        map.finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for HashTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for HashTable<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_empty_bucket<V>(table: &HashTable<V>) {
        assert!(table.buckets().all(|(_, bucket)| !bucket.is_empty()));
        let total: usize = table.buckets().map(|(_, bucket)| bucket.len()).sum();
        assert_eq!(total, table.len());
    }

    #[test]
    fn test_add_and_lookup() {
        let mut table = HashTable::new();
        table.add("name", "John");
        table.add("city", "New York");

        assert_eq!(table.lookup("name"), Some(&"John"));
        assert_eq!(table.lookup("city"), Some(&"New York"));
        assert_eq!(table.lookup("country"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookup_on_empty() {
        let table: HashTable<i32> = HashTable::new();
        assert_eq!(table.lookup("anything"), None);
        assert_eq!(table.lookup(""), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_overwrite() {
        let mut table = HashTable::new();
        assert_eq!(table.add("k", 1), None);
        assert_eq!(table.add("k", 2), Some(1));
        assert_eq!(table.lookup("k"), Some(&2));
        assert_eq!(table.len(), 1);
        assert_eq!(table.bucket(table.hash("k")).map(Bucket::len), Some(1));
    }

    #[test]
    fn test_collision_scenario() {
        let mut table = HashTable::new();
        assert_eq!(table.hash("abc"), 294);
        assert_eq!(table.hash("bac"), 294);

        table.add("abc", "first");
        table.add("bac", "second");
        assert_eq!(table.bucket_count(), 1);
        assert_eq!(table.lookup("abc"), Some(&"first"));
        assert_eq!(table.lookup("bac"), Some(&"second"));

        table.remove("abc");
        assert_eq!(table.lookup("abc"), None);
        assert_eq!(table.lookup("bac"), Some(&"second"));
        assert!(table.contains_hash(294));

        table.remove("bac");
        assert!(!table.contains_hash(294));
        assert_eq!(table.to_string(), "{}");
        assert_no_empty_bucket(&table);
    }

    #[test]
    fn test_empty_key() {
        let mut table = HashTable::new();
        assert_eq!(table.hash(""), 0);
        table.add("", "x");
        assert_eq!(table.lookup(""), Some(&"x"));
        assert!(table.contains_hash(0));
        table.remove("");
        assert!(!table.contains_hash(0));
    }

    #[test]
    fn test_remove_idempotent() {
        let mut table = HashTable::new();
        table.add("age", 25);
        table.add("name", 1);

        assert_eq!(table.remove("age"), Some(25));
        let after_first = table.to_string();
        assert_eq!(table.remove("age"), None);
        assert_eq!(table.to_string(), after_first);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_missing_key_in_existing_bucket() {
        let mut table = HashTable::new();
        table.add("abc", 1);
        // 同一个桶，但键不存在
        assert_eq!(table.remove("cba"), None);
        assert_eq!(table.lookup("abc"), Some(&1));
        assert_eq!(table.remove("nonexistent"), None);
        assert_no_empty_bucket(&table);
    }

    #[test]
    fn test_display_rendering() {
        let mut table = HashTable::new();
        table.add("bac", "second");
        table.add("abc", "first");
        table.add("a", "one");
        assert_eq!(
            table.to_string(),
            r#"{97: {"a": "one"}, 294: {"abc": "first", "bac": "second"}}"#
        );
    }

    #[test]
    fn test_absent_payload() {
        let mut table: HashTable<Option<i32>> = HashTable::new();
        table.add("none", None);
        assert_eq!(table.lookup("none"), Some(&None));
        assert_eq!(table.lookup("missing"), None);
    }

    #[test]
    fn test_unicode_keys() {
        let mut table = HashTable::new();
        table.add("中文", 1);
        table.add("文中", 2);
        table.add("🦀", 3);
        assert_eq!(table.bucket_count(), 2);
        assert_eq!(table.lookup("中文"), Some(&1));
        assert_eq!(table.lookup("文中"), Some(&2));
        assert_eq!(table.lookup("🦀"), Some(&3));
    }

    #[test]
    fn test_checked_operations() {
        let mut table = HashTable::new();
        assert!(table.insert_new("k", 1).is_ok());
        assert_eq!(
            table.insert_new("k", 2),
            Err(TableError::KeyAlreadyExists { key: "k".into() })
        );
        assert_eq!(table.lookup("k"), Some(&1));

        assert_eq!(table.update("k", 3), Ok(1));
        assert_eq!(
            table.update("missing", 4),
            Err(TableError::KeyNotFound { key: "missing".into() })
        );
        assert!(!table.contains_key("missing"));

        assert_eq!(table.take("k"), Ok(3));
        assert!(table.take("k").is_err());
        assert_eq!(table.bucket_count(), 0);
    }

    #[test]
    fn test_stats_counters() {
        let mut table = HashTable::new();
        table.add("abc", 1);
        table.add("bac", 2);
        table.add("bac", 3);
        table.lookup("abc");
        table.lookup("zzz");
        table.remove("abc");
        table.remove("abc");
        table.remove("bac");

        let stats = table.stats();
        assert_eq!(stats.len, 0);
        assert_eq!(stats.bucket_count, 0);
        let ops = stats.operations;
        assert_eq!(ops.add_count, 2);
        assert_eq!(ops.overwrite_count, 1);
        assert_eq!(ops.collision_count, 1);
        assert_eq!(ops.lookup_hit_count, 1);
        assert_eq!(ops.lookup_miss_count, 1);
        assert_eq!(ops.remove_count, 2);
        assert_eq!(ops.remove_miss_count, 1);
        assert_eq!(ops.bucket_created_count, 1);
        assert_eq!(ops.bucket_pruned_count, 1);
    }

    #[test]
    fn test_stats_shape() {
        let table: HashTable<u8> = [("abc", 1), ("bac", 2), ("cba", 3), ("x", 4)]
            .into_iter()
            .collect();
        let stats = table.stats();
        assert_eq!(stats.len, 4);
        assert_eq!(stats.bucket_count, 2);
        assert_eq!(stats.largest_bucket, 3);
        assert_eq!(stats.colliding_keys, 3);
    }

    #[test]
    fn test_update_counts_only_overwrite() {
        let mut table = HashTable::new();
        table.add("k", 1);
        assert_eq!(table.update("k", 2), Ok(1));
        assert!(table.update("missing", 3).is_err());

        let ops = table.stats().operations;
        assert_eq!(ops.lookup_hit_count, 0);
        assert_eq!(ops.lookup_miss_count, 0);
        assert_eq!(ops.overwrite_count, 1);
        assert_eq!(ops.add_count, 1);
    }

    #[test]
    fn test_disabled_stats() {
        let mut table = HashTable::with_config(HashTableConfig {
            stats_mode: StatsMode::Disabled,
            ..Default::default()
        });
        table.add("a", 1);
        assert_eq!(table.stats().operations, OperationStatsSnapshot::default());
        assert!(table.export_prometheus().is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = HashTableConfig {
            initial_capacity: MAX_INITIAL_CAPACITY + 1,
            ..Default::default()
        };
        assert!(matches!(
            HashTable::<i32>::try_with_config(config.clone()),
            Err(TableError::InvalidConfig { .. })
        ));
        let table = HashTable::<i32>::with_config(config);
        assert_eq!(table.config().initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_clear_and_iter() {
        let mut table: HashTable<i32> = HashTable::new();
        table.extend([("a", 1), ("b", 2), ("ab", 3)]);
        let mut seen: Vec<_> = table.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        seen.sort();
        assert_eq!(
            seen,
            vec![("a".to_string(), 1), ("ab".to_string(), 3), ("b".to_string(), 2)]
        );

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut table = HashTable::new();
        table.add("a", 1);
        let mut copy = table.clone();
        copy.add("a", 2);
        copy.remove("a");
        assert_eq!(table.lookup("a"), Some(&1));
        assert!(copy.is_empty());
        assert_eq!(copy.stats().operations.add_count, 0);
    }
}
