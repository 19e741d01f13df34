//! 文件描述符表
//!
//! 该模块实现了进程级的文件描述符管理，提供 POSIX 兼容的文件描述符操作。
//!
//! 约定与语义（与用户态常见预期保持一致）：
//!
//! - `alloc()` 分配“最小可用 fd”
//! - 关闭后的 fd 上的任何操作都返回 [`FsError::BadFileDescriptor`]

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use sync::SpinLock;

use crate::{File, FsError};

/// 默认的最大文件描述符数量
pub const DEFAULT_MAX_FDS: usize = 1024;

/// 文件描述符表
pub struct FDTable {
    /// 文件描述符数组
    files: SpinLock<Vec<Option<Arc<dyn File>>>>,
    /// 最大文件描述符数量
    max_fds: usize,
}

impl fmt::Debug for FDTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self.files.lock();
        let used = files.iter().filter(|slot| slot.is_some()).count();
        f.debug_struct("FDTable")
            .field("max_fds", &self.max_fds)
            .field("slots", &files.len())
            .field("used", &used)
            .finish()
    }
}

impl FDTable {
    /// 创建新的文件描述符表
    pub fn new(max_fds: usize) -> Self {
        Self {
            files: SpinLock::new(Vec::new()),
            max_fds,
        }
    }

    /// 最大文件描述符数量
    pub fn max_fds(&self) -> usize {
        self.max_fds
    }

    /// 取走并清空所有已打开的文件描述符
    pub fn take_all(&self) -> Vec<(usize, Arc<dyn File>)> {
        let mut files = self.files.lock();
        files
            .iter_mut()
            .enumerate()
            .filter_map(|(fd, slot)| slot.take().map(|file| (fd, file)))
            .collect()
    }

    /// 分配最小可用的文件描述符
    pub fn alloc(&self, file: Arc<dyn File>) -> Result<usize, FsError> {
        let mut files = self.files.lock();

        if let Some(fd) = files.iter().position(Option::is_none) {
            files[fd] = Some(file);
            return Ok(fd);
        }

        // 如果没有空闲槽位，扩展数组
        let fd = files.len();
        if fd >= self.max_fds {
            return Err(FsError::TooManyOpenFiles);
        }

        files.push(Some(file));
        Ok(fd)
    }

    /// 获取文件对象
    pub fn get(&self, fd: usize) -> Result<Arc<dyn File>, FsError> {
        let files = self.files.lock();
        files
            .get(fd)
            .and_then(|f| f.clone())
            .ok_or(FsError::BadFileDescriptor)
    }

    /// 关闭文件描述符，返回被关闭的文件
    ///
    /// 最后一个引用释放时文件随之释放会话。
    pub fn close(&self, fd: usize) -> Result<Arc<dyn File>, FsError> {
        self.files
            .lock()
            .get_mut(fd)
            .and_then(Option::take)
            .ok_or(FsError::BadFileDescriptor)
    }
}

impl Default for FDTable {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FDS)
    }
}
