//! 访问模式与权限判定

use core::fmt;
use uapi::fcntl::OpenFlags;

use crate::MemDevError;

/// 设备声明的或 open 请求的访问模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// 只读
    ReadOnly,
    /// 只写
    WriteOnly,
    /// 读写
    ReadWrite,
}

impl AccessMode {
    /// 是否包含读能力
    pub const fn can_read(self) -> bool {
        matches!(self, AccessMode::ReadOnly | AccessMode::ReadWrite)
    }

    /// 是否包含写能力
    pub const fn can_write(self) -> bool {
        matches!(self, AccessMode::WriteOnly | AccessMode::ReadWrite)
    }

    /// 从 open 标志的 `O_ACCMODE` 位解码
    ///
    /// `O_ACCMODE == 3` 不对应任何模式，返回 `None`。
    pub fn from_open_flags(flags: OpenFlags) -> Option<Self> {
        match flags.access_mode() {
            0o0 => Some(AccessMode::ReadOnly),
            0o1 => Some(AccessMode::WriteOnly),
            0o2 => Some(AccessMode::ReadWrite),
            _ => None,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessMode::ReadOnly => "RDONLY",
            AccessMode::WriteOnly => "WRONLY",
            AccessMode::ReadWrite => "RDWR",
        })
    }
}

/// 判断请求的访问模式能否打开声明为 `device` 的设备
///
/// 只读设备只接受只读请求，只写设备只接受只写请求，读写设备接受任何请求。
/// 读写请求打开只写设备会被拒绝（请求中的读能力不被满足）。
pub fn check(device: AccessMode, requested: AccessMode) -> Result<(), MemDevError> {
    let allowed = match device {
        AccessMode::ReadWrite => true,
        AccessMode::ReadOnly => requested.can_read() && !requested.can_write(),
        AccessMode::WriteOnly => requested.can_write() && !requested.can_read(),
    };

    if allowed {
        Ok(())
    } else {
        Err(MemDevError::PermissionDenied)
    }
}
