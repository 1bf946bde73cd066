//! 系统信息提供者
//!
//! 内存指示器不直接访问全局系统服务，而是通过注入的
//! `SystemInfoProvider` 查询内存快照。

use sysinfo::System;

use crate::core::error::{Result, SystemInfoError};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// 系统内存快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemorySnapshot {
    /// 校验并创建快照：总量为 0 或可用量超过总量视为无效
    pub fn new(total_bytes: u64, available_bytes: u64) -> Result<Self> {
        if total_bytes == 0 || available_bytes > total_bytes {
            return Err(SystemInfoError::InvalidSnapshot { total_bytes, available_bytes }.into());
        }
        Ok(Self { total_bytes, available_bytes })
    }

    pub fn total_mb(&self) -> u64 {
        self.total_bytes / BYTES_PER_MB
    }

    pub fn used_mb(&self) -> u64 {
        self.total_mb().saturating_sub(self.available_bytes / BYTES_PER_MB)
    }

    /// 已用内存百分比（按 MB 计算）
    pub fn usage_percent(&self) -> f32 {
        let total = self.total_mb();
        if total == 0 {
            return 0.0;
        }
        self.used_mb() as f32 / total as f32 * 100.0
    }
}

/// 系统信息能力
pub trait SystemInfoProvider {
    fn memory_snapshot(&mut self) -> Result<MemorySnapshot>;
}

/// 基于 `sysinfo` 的实现
pub struct SysinfoProvider {
    system: System,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        Self { system: System::new() }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemInfoProvider for SysinfoProvider {
    fn memory_snapshot(&mut self) -> Result<MemorySnapshot> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(SystemInfoError::Unavailable("sysinfo reported zero total memory".to_string()).into());
        }
        MemorySnapshot::new(total, self.system.available_memory().min(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_snapshot_usage() {
        let snapshot = MemorySnapshot::new(8 * GB, 2 * GB).unwrap();
        assert_eq!(snapshot.total_mb(), 8192);
        assert_eq!(snapshot.used_mb(), 6144);
        assert!((snapshot.usage_percent() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(MemorySnapshot::new(0, 0).is_err());
        assert!(MemorySnapshot::new(GB, 2 * GB).is_err());
    }
}
