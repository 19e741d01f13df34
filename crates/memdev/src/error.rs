//! 驱动错误类型
//!
//! 每种错误都只影响当前这一次调用，可通过 [`MemDevError::to_errno()`] 转换为系统调用错误码。

use core::fmt;
use uapi::errno::{EBUSY, EFAULT, EINVAL, ENODEV, ENOMEM, EPERM};

/// 驱动错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemDevError {
    /// 设备标识不存在，或驱动已卸载 (-ENODEV)
    NoSuchDevice,
    /// 请求的访问模式与设备声明的模式不兼容 (-EPERM)
    PermissionDenied,
    /// seek 目标超出 `[0, size]`，或基准未知 (-EINVAL)
    OutOfRange,
    /// 写入位置已在设备末尾，无法写入任何字节 (-ENOMEM)
    NoSpace,
    /// 用户空间拷贝失败 (-EFAULT)
    TransferFault,
    /// 设备配置非法 (-EINVAL)
    InvalidConfig,
    /// 没有可用的设备号 (-EBUSY)
    RegionBusy,
}

impl MemDevError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        let errno = match self {
            MemDevError::NoSuchDevice => ENODEV,
            MemDevError::PermissionDenied => EPERM,
            MemDevError::OutOfRange | MemDevError::InvalidConfig => EINVAL,
            MemDevError::NoSpace => ENOMEM,
            MemDevError::TransferFault => EFAULT,
            MemDevError::RegionBusy => EBUSY,
        };
        -(errno as isize)
    }
}

impl fmt::Display for MemDevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MemDevError::NoSuchDevice => "no such device",
            MemDevError::PermissionDenied => "operation not permitted",
            MemDevError::OutOfRange => "offset out of range",
            MemDevError::NoSpace => "no space left on the device",
            MemDevError::TransferFault => "bad address",
            MemDevError::InvalidConfig => "invalid device configuration",
            MemDevError::RegionBusy => "no free device number",
        };
        f.write_str(msg)
    }
}
