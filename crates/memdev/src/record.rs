//! 设备记录与设备表

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use sync::SpinLock;

use crate::{AccessMode, MemDevError, UserCopyOps, io};

/// 单个设备的静态配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSpec {
    /// 缓冲区容量（字节）
    pub size: usize,
    /// 序列号，仅用于诊断
    pub serial: &'static str,
    /// 设备声明的访问模式
    pub mode: AccessMode,
}

impl DeviceSpec {
    /// 创建设备配置
    pub const fn new(size: usize, serial: &'static str, mode: AccessMode) -> Self {
        Self { size, serial, mode }
    }

    /// 检查单个设备配置
    ///
    /// 容量必须为正，且能用 `i64` 表示（llseek 在有符号 64 位上计算）。
    pub fn validate(&self) -> Result<(), MemDevError> {
        if self.size == 0 || i64::try_from(self.size).is_err() {
            return Err(MemDevError::InvalidConfig);
        }
        Ok(())
    }
}

/// 检查一组设备配置，空列表非法
pub fn validate_specs(specs: &[DeviceSpec]) -> Result<(), MemDevError> {
    if specs.is_empty() {
        return Err(MemDevError::InvalidConfig);
    }
    specs.iter().try_for_each(DeviceSpec::validate)
}

/// 一个逻辑设备
///
/// 元数据在构造后不可变；缓冲区只在单次 read/write 调用期间持锁访问。
pub struct DeviceRecord {
    buffer: SpinLock<Box<[u8]>>,
    size: usize,
    serial: &'static str,
    mode: AccessMode,
}

impl DeviceRecord {
    /// 按配置创建设备，缓冲区初始为全零
    pub fn new(spec: &DeviceSpec) -> Result<Self, MemDevError> {
        spec.validate()?;
        Ok(Self {
            buffer: SpinLock::new(vec![0u8; spec.size].into_boxed_slice()),
            size: spec.size,
            serial: spec.serial,
            mode: spec.mode,
        })
    }

    /// 缓冲区容量
    pub fn size(&self) -> usize {
        self.size
    }

    /// 序列号
    pub fn serial(&self) -> &'static str {
        self.serial
    }

    /// 设备声明的访问模式
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// 从 `offset` 处读出至多 `dst.len()` 字节
    pub(crate) fn read_at(
        &self,
        offset: usize,
        dst: &mut [u8],
        user_copy: &dyn UserCopyOps,
    ) -> Result<usize, MemDevError> {
        let buffer = self.buffer.lock();
        io::read(&buffer, offset, dst, user_copy)
    }

    /// 向 `offset` 处写入至多 `src.len()` 字节
    pub(crate) fn write_at(
        &self,
        offset: usize,
        src: &[u8],
        user_copy: &dyn UserCopyOps,
    ) -> Result<usize, MemDevError> {
        let mut buffer = self.buffer.lock();
        io::write(&mut buffer, offset, src, user_copy)
    }

    /// 获取缓冲区内容副本（用于调试）
    pub fn raw_data(&self) -> Vec<u8> {
        self.buffer.lock().to_vec()
    }
}

impl fmt::Debug for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRecord")
            .field("size", &self.size)
            .field("serial", &self.serial)
            .field("mode", &self.mode)
            .finish()
    }
}

/// 设备表
///
/// 长度与每个槽位的设备在构造后固定，下标即设备标识。
#[derive(Debug)]
pub struct DeviceTable {
    records: Vec<Arc<DeviceRecord>>,
}

impl DeviceTable {
    /// 按配置顺序构造设备表
    pub fn new(specs: &[DeviceSpec]) -> Result<Self, MemDevError> {
        validate_specs(specs)?;
        let records = specs
            .iter()
            .map(|spec| DeviceRecord::new(spec).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// 按标识查找设备
    pub fn get(&self, index: usize) -> Option<&Arc<DeviceRecord>> {
        self.records.get(index)
    }

    /// 设备数量
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 设备表是否为空（构造成功的设备表总是非空）
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按标识顺序遍历设备
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DeviceRecord>> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AccessMode::*;

    #[test]
    fn test_table_preserves_order_and_metadata() {
        test_support::init_arch_ops();
        let specs = [
            DeviceSpec::new(1024, "A", ReadOnly),
            DeviceSpec::new(512, "B", WriteOnly),
        ];
        let table = DeviceTable::new(&specs).unwrap();
        assert_eq!(table.len(), 2);

        let b = table.get(1).unwrap();
        assert_eq!(b.size(), 512);
        assert_eq!(b.serial(), "B");
        assert_eq!(b.mode(), WriteOnly);
        assert_eq!(b.raw_data(), vec![0u8; 512]);
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_invalid_specs_rejected() {
        test_support::init_arch_ops();
        assert_eq!(
            DeviceTable::new(&[]).unwrap_err(),
            MemDevError::InvalidConfig
        );
        let specs = [
            DeviceSpec::new(16, "ok", ReadWrite),
            DeviceSpec::new(0, "empty", ReadWrite),
        ];
        assert_eq!(
            DeviceTable::new(&specs).unwrap_err(),
            MemDevError::InvalidConfig
        );
    }
}
