//! 核心类型定义 - 共享类型

/// 哈希码：键中所有字符码点之和
pub type HashCode = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 新键插入
    Add = 0,
    /// 已有键覆盖写
    Overwrite = 1,
    /// 查询命中
    LookupHit = 2,
    /// 查询未命中
    LookupMiss = 3,
    /// 删除成功
    Remove = 4,
    /// 删除不存在的键（空操作）
    RemoveMiss = 5,
    /// 新建桶
    BucketCreated = 6,
    /// 空桶被回收
    BucketPruned = 7,
    /// 新键落入已有非空桶
    Collision = 8,
}

impl OperationType {
    /// 全部操作类型，按导出顺序排列
    pub const ALL: [OperationType; 9] = [
        OperationType::Add,
        OperationType::Overwrite,
        OperationType::LookupHit,
        OperationType::LookupMiss,
        OperationType::Remove,
        OperationType::RemoveMiss,
        OperationType::BucketCreated,
        OperationType::BucketPruned,
        OperationType::Collision,
    ];

    /// 计数器下标，与 `ALL` 中的位置一致
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(self, OperationType::LookupHit | OperationType::LookupMiss)
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        !self.is_read()
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Add => "add",
            OperationType::Overwrite => "overwrite",
            OperationType::LookupHit => "lookup_hit",
            OperationType::LookupMiss => "lookup_miss",
            OperationType::Remove => "remove",
            OperationType::RemoveMiss => "remove_miss",
            OperationType::BucketCreated => "bucket_created",
            OperationType::BucketPruned => "bucket_pruned",
            OperationType::Collision => "collision",
        }
    }
}
