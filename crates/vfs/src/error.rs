//! 文件层错误类型
//!
//! 定义了与 POSIX 兼容的错误码，可通过 [`FsError::to_errno()`] 转换为系统调用错误码。

use memdev::MemDevError;
use uapi::errno::{
    EACCES, EBADF, EBUSY, EFAULT, EINVAL, EMFILE, ENODEV, ENOMEM, EOPNOTSUPP, EPERM,
};

/// 文件层错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    // 权限相关
    /// 操作不被允许 (-EPERM)
    NotPermitted,
    /// 权限被拒绝 (-EACCES)
    PermissionDenied,

    // 文件描述符相关
    /// 无效的文件描述符 (-EBADF)
    BadFileDescriptor,
    /// 打开的文件过多 (-EMFILE)
    TooManyOpenFiles,

    // 参数相关
    /// 无效参数 (-EINVAL)
    InvalidArgument,
    /// 用户地址无效 (-EFAULT)
    BadAddress,

    // 设备相关
    /// 内存不足 (-ENOMEM)
    NoMemory,
    /// 设备不存在 (-ENODEV)
    NoDevice,
    /// 设备或资源忙 (-EBUSY)
    Busy,

    // 其他
    /// 操作不支持 (-ENOTSUP)
    NotSupported,
}

impl FsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        let errno = match self {
            FsError::NotPermitted => EPERM,
            FsError::BadFileDescriptor => EBADF,
            FsError::NoMemory => ENOMEM,
            FsError::PermissionDenied => EACCES,
            FsError::BadAddress => EFAULT,
            FsError::Busy => EBUSY,
            FsError::NoDevice => ENODEV,
            FsError::InvalidArgument => EINVAL,
            FsError::TooManyOpenFiles => EMFILE,
            FsError::NotSupported => EOPNOTSUPP,
        };
        -(errno as isize)
    }
}

impl From<MemDevError> for FsError {
    fn from(err: MemDevError) -> Self {
        match err {
            MemDevError::NoSuchDevice => FsError::NoDevice,
            MemDevError::PermissionDenied => FsError::NotPermitted,
            MemDevError::OutOfRange | MemDevError::InvalidConfig => FsError::InvalidArgument,
            MemDevError::NoSpace => FsError::NoMemory,
            MemDevError::TransferFault => FsError::BadAddress,
            MemDevError::RegionBusy => FsError::Busy,
        }
    }
}
