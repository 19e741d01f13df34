//! 会话绑定
//!
//! open 成功后得到 [`Session`]：持有目标设备的共享引用、请求的访问模式和独立的偏移量。
//! 同一设备可以同时存在多个会话，各自的偏移互不影响。

use alloc::sync::Arc;

use crate::{AccessMode, DeviceRecord, DeviceTable, MemDevError, access};

/// 已打开的会话
///
/// 不可克隆；release 时按值交还给驱动核心，之后无法再使用。
#[derive(Debug)]
pub struct Session {
    record: Arc<DeviceRecord>,
    /// 打开此会话的驱动核心
    core_id: usize,
    index: usize,
    mode: AccessMode,
    offset: usize,
}

impl Session {
    /// 绑定的设备标识
    pub fn index(&self) -> usize {
        self.index
    }

    /// open 时请求的访问模式
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// 当前偏移
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 绑定的设备
    pub fn record(&self) -> &Arc<DeviceRecord> {
        &self.record
    }

    pub(crate) fn core_id(&self) -> usize {
        self.core_id
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        debug_assert!(offset <= self.record.size());
        self.offset = offset;
    }
}

/// 解析设备标识、检查权限并创建会话
pub(crate) fn bind(
    table: &DeviceTable,
    core_id: usize,
    index: usize,
    requested: AccessMode,
) -> Result<Session, MemDevError> {
    let record = table.get(index).ok_or(MemDevError::NoSuchDevice)?;

    if let Err(err) = access::check(record.mode(), requested) {
        log::warn!(
            "memdev: {} open of device {} ({}, {}) denied",
            requested,
            index,
            record.serial(),
            record.mode()
        );
        return Err(err);
    }

    Ok(Session {
        record: record.clone(),
        core_id,
        index,
        mode: requested,
        offset: 0,
    })
}
