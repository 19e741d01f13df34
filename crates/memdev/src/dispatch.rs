//! 驱动核心
//!
//! [`DriverCore`] 持有设备表和用户空间拷贝实现，向外提供
//! open/read/write/llseek/release 五个操作。所有设备共享同一套逻辑，
//! 区别只在于会话所绑定设备的大小、模式和缓冲区。

use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uapi::fcntl::SeekWhence;

use crate::{
    AccessMode, DeviceSpec, DeviceTable, MemDevError, Session, UserCopyOps, seek, session,
    user_copy_ops,
};

/// 一次读写的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// 实际传输的字节数
    pub count: usize,
    /// 传输后的会话偏移
    pub offset: usize,
}

static NEXT_CORE_ID: AtomicUsize = AtomicUsize::new(1);

/// 驱动核心
///
/// 会话只能交还给打开它的驱动核心；其他核心对它的 read/write/llseek 返回 `NoSuchDevice`。
/// read 要求会话以可读模式打开，write 要求以可写模式打开，否则返回 `PermissionDenied`。
pub struct DriverCore {
    id: usize,
    table: DeviceTable,
    user_copy: &'static dyn UserCopyOps,
    live: AtomicBool,
}

impl DriverCore {
    /// 按配置构造设备表，使用已注册的用户空间拷贝实现
    pub fn initialize(specs: &[DeviceSpec]) -> Result<Self, MemDevError> {
        Self::with_user_copy(specs, user_copy_ops())
    }

    /// 按配置构造设备表，使用指定的用户空间拷贝实现
    pub fn with_user_copy(
        specs: &[DeviceSpec],
        user_copy: &'static dyn UserCopyOps,
    ) -> Result<Self, MemDevError> {
        let table = DeviceTable::new(specs)?;

        log::info!("memdev: {} devices initialized", table.len());
        for (index, record) in table.iter().enumerate() {
            log::info!(
                "memdev: device {}: serial {}, size {}, mode {}",
                index,
                record.serial(),
                record.size(),
                record.mode()
            );
        }

        Ok(Self {
            id: NEXT_CORE_ID.fetch_add(1, Ordering::Relaxed),
            table,
            user_copy,
            live: AtomicBool::new(true),
        })
    }

    /// 设备表
    pub fn table(&self) -> &DeviceTable {
        &self.table
    }

    /// 设备数量
    pub fn device_count(&self) -> usize {
        self.table.len()
    }

    /// 驱动是否仍可接受 open
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// 打开设备 `index`
    ///
    /// 标识不存在或驱动已关闭时返回 `NoSuchDevice`，权限不符时返回 `PermissionDenied`。
    pub fn open(&self, index: usize, requested: AccessMode) -> Result<Session, MemDevError> {
        if !self.is_live() {
            return Err(MemDevError::NoSuchDevice);
        }
        let session = session::bind(&self.table, self.id, index, requested)?;
        log::debug!("memdev: device {} opened {}", index, requested);
        Ok(session)
    }

    /// 从会话当前位置读取至多 `dst.len()` 字节
    ///
    /// 到达设备末尾时返回 0 字节。拷贝失败时偏移不变。
    pub fn read(&self, session: &mut Session, dst: &mut [u8]) -> Result<Transfer, MemDevError> {
        self.check_session(session, session.mode().can_read(), "read")?;
        let offset = session.offset();
        log::debug!(
            "memdev: read requested for {} bytes at position {}",
            dst.len(),
            offset
        );

        let count = session
            .record()
            .read_at(offset, dst, self.user_copy)
            .inspect_err(|err| log::error!("memdev: read failed: {}", err))?;

        session.set_offset(offset + count);
        log::debug!(
            "memdev: {} bytes read, updated position {}",
            count,
            session.offset()
        );
        Ok(Transfer {
            count,
            offset: session.offset(),
        })
    }

    /// 读取至多 `count` 字节，返回读到的数据与新的偏移
    pub fn read_to_vec(
        &self,
        session: &mut Session,
        count: usize,
    ) -> Result<(Vec<u8>, usize), MemDevError> {
        let remaining = session.record().size() - session.offset();
        let mut data = vec![0u8; count.min(remaining)];
        let transfer = self.read(session, &mut data)?;
        data.truncate(transfer.count);
        Ok((data, transfer.offset))
    }

    /// 从会话当前位置写入 `src`，超出设备末尾的部分被截断
    ///
    /// 当前位置已在设备末尾时返回 `NoSpace`。失败时缓冲区和偏移都不变。
    pub fn write(&self, session: &mut Session, src: &[u8]) -> Result<Transfer, MemDevError> {
        self.check_session(session, session.mode().can_write(), "write")?;
        let offset = session.offset();
        log::debug!(
            "memdev: write requested for {} bytes at position {}",
            src.len(),
            offset
        );

        let count = session
            .record()
            .write_at(offset, src, self.user_copy)
            .inspect_err(|err| {
                if *err == MemDevError::TransferFault {
                    log::error!("memdev: write failed: {}", err);
                }
            })?;

        session.set_offset(offset + count);
        log::debug!(
            "memdev: {} bytes written, updated position {}",
            count,
            session.offset()
        );
        Ok(Transfer {
            count,
            offset: session.offset(),
        })
    }

    /// 移动会话偏移，返回新的偏移
    pub fn seek(
        &self,
        session: &mut Session,
        offset: i64,
        whence: SeekWhence,
    ) -> Result<usize, MemDevError> {
        self.check_session(session, true, "llseek")?;
        let current = session.offset();
        let target = seek::resolve(current, offset, whence, session.record().size())?;
        session.set_offset(target);
        log::debug!("memdev: llseek {} -> {}", current, target);
        Ok(target)
    }

    /// 以原始 whence 移动会话偏移
    pub fn seek_raw(
        &self,
        session: &mut Session,
        offset: i64,
        whence: u32,
    ) -> Result<usize, MemDevError> {
        let whence = SeekWhence::from_raw(whence).ok_or(MemDevError::OutOfRange)?;
        self.seek(session, offset, whence)
    }

    /// 释放会话；设备本身不受影响
    pub fn release(&self, session: Session) {
        if session.core_id() != self.id {
            log::warn!(
                "memdev: device {} released through a foreign driver",
                session.index()
            );
        }
        log::debug!("memdev: device {} released", session.index());
        drop(session);
    }

    fn check_session(
        &self,
        session: &Session,
        direction_ok: bool,
        op: &str,
    ) -> Result<(), MemDevError> {
        if session.core_id() != self.id {
            log::warn!(
                "memdev: {} on device {} through a foreign driver",
                op,
                session.index()
            );
            return Err(MemDevError::NoSuchDevice);
        }
        if !direction_ok {
            log::warn!(
                "memdev: {} on device {} not allowed for a {} session",
                op,
                session.index(),
                session.mode()
            );
            return Err(MemDevError::PermissionDenied);
        }
        Ok(())
    }

    /// 关闭驱动，之后的 open 返回 `NoSuchDevice`
    ///
    /// 可重复调用，只有第一次调用返回 `true`。已打开的会话仍可读写直到释放。
    pub fn shutdown(&self) -> bool {
        let was_live = self.live.swap(false, Ordering::AcqRel);
        if was_live {
            log::info!("memdev: driver shut down");
        }
        was_live
    }
}
