//! 内存字符设备文件的 File trait 实现

use alloc::sync::Arc;
use memdev::{AccessMode, AtomModule, DriverCore, Session};
use sync::SpinLock;

use crate::{File, FsError, OpenFlags, SeekWhence};

/// 内存字符设备文件
///
/// 每个打开的文件持有一个会话；会话在 [`MemDevFile::release`] 或析构时释放，且只释放一次。
pub struct MemDevFile {
    core: Arc<DriverCore>,

    /// 会话，释放后为 `None`
    session: SpinLock<Option<Session>>,

    /// 打开标志位
    pub flags: OpenFlags,
}

impl MemDevFile {
    /// 按设备标识打开
    pub fn open(core: Arc<DriverCore>, index: usize, flags: OpenFlags) -> Result<Self, FsError> {
        let mode = AccessMode::from_open_flags(flags).ok_or(FsError::InvalidArgument)?;
        let session = core.open(index, mode)?;

        Ok(Self {
            core,
            session: SpinLock::new(Some(session)),
            flags,
        })
    }

    /// 按设备号打开
    pub fn open_devno(module: &AtomModule, devno: u64, flags: OpenFlags) -> Result<Self, FsError> {
        let index = module.index_of(devno)?;
        Self::open(module.core().clone(), index, flags)
    }

    /// 会话绑定的设备标识，释放后为 `None`
    pub fn index(&self) -> Option<usize> {
        self.session.lock().as_ref().map(Session::index)
    }

    /// 以原始 whence 值调整偏移，未知的 whence 返回 [`FsError::InvalidArgument`]
    pub fn lseek_raw(&self, offset: isize, whence: u32) -> Result<usize, FsError> {
        let whence = SeekWhence::from_raw(whence).ok_or(FsError::InvalidArgument)?;
        self.lseek(offset, whence)
    }

    /// 释放会话，只有第一次调用返回 `true`
    pub fn release(&self) -> bool {
        match self.session.lock().take() {
            Some(session) => {
                self.core.release(session);
                true
            }
            None => false,
        }
    }
}

impl File for MemDevFile {
    fn readable(&self) -> bool {
        self.flags.readable()
    }

    fn writable(&self) -> bool {
        self.flags.writable()
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        if !self.readable() {
            return Err(FsError::PermissionDenied);
        }

        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(FsError::BadFileDescriptor)?;
        let transfer = self.core.read(session, buf)?;
        Ok(transfer.count)
    }

    fn write(&self, buf: &[u8]) -> Result<usize, FsError> {
        if !self.writable() {
            return Err(FsError::PermissionDenied);
        }

        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(FsError::BadFileDescriptor)?;
        let transfer = self.core.write(session, buf)?;
        Ok(transfer.count)
    }

    fn lseek(&self, offset: isize, whence: SeekWhence) -> Result<usize, FsError> {
        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(FsError::BadFileDescriptor)?;
        Ok(self.core.seek(session, offset as i64, whence)?)
    }

    fn offset(&self) -> usize {
        self.session.lock().as_ref().map_or(0, Session::offset)
    }

    fn flags(&self) -> OpenFlags {
        self.flags
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
}

impl Drop for MemDevFile {
    fn drop(&mut self) {
        if self.release() {
            log::debug!("vfs: memdev file dropped with a live session");
        }
    }
}
