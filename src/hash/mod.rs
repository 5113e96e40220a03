//! 哈希模块 - 字符码点求和哈希
//!
//! 哈希值只取决于键中字符的多重集合，与顺序无关：`"abc"`、`"bac"`、`"cba"`
//! 都得到 294。这种冲突是约定行为，桶内的精确匹配映射负责区分它们。

use crate::types::HashCode;

/// 计算键的哈希码：所有字符 Unicode 码点之和，空串为 0
pub fn char_sum_hash(key: &str) -> HashCode {
    key.chars()
        .fold(0, |acc: HashCode, c| acc.wrapping_add(u32::from(c) as HashCode))
}

/// 判断两个键是否落入同一个桶
pub fn collides(a: &str, b: &str) -> bool {
    char_sum_hash(a) == char_sum_hash(b)
}
