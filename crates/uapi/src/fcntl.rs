//! open(2) 标志与 lseek(2) 基准

use bitflags::bitflags;

bitflags! {
    /// open(2) 的标志位
    ///
    /// 低两位是访问模式（`O_RDONLY` 为 0，因此不能用 `contains` 判断，
    /// 应使用 [`OpenFlags::access_mode`]）。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const O_RDONLY    = 0o0;
        const O_WRONLY    = 0o1;
        const O_RDWR      = 0o2;
        const O_ACCMODE   = 0o3;
        const O_CREAT     = 0o100;
        const O_EXCL      = 0o200;
        const O_NOCTTY    = 0o400;
        const O_TRUNC     = 0o1000;
        const O_APPEND    = 0o2000;
        const O_NONBLOCK  = 0o4000;
        const O_SYNC      = 0o4010000;
        const O_CLOEXEC   = 0o2000000;
    }
}

impl OpenFlags {
    /// 取出访问模式位（`O_ACCMODE` 掩码下的值）
    pub fn access_mode(&self) -> u32 {
        self.bits() & Self::O_ACCMODE.bits()
    }

    /// 是否以可读方式打开
    pub fn readable(&self) -> bool {
        matches!(self.access_mode(), 0o0 | 0o2)
    }

    /// 是否以可写方式打开
    pub fn writable(&self) -> bool {
        matches!(self.access_mode(), 0o1 | 0o2)
    }
}

/// lseek(2) 的基准位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SeekWhence {
    /// SEEK_SET
    Set = 0,
    /// SEEK_CUR
    Cur = 1,
    /// SEEK_END
    End = 2,
}

impl SeekWhence {
    /// 从系统调用的原始 whence 解码，未知值返回 `None`
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Set),
            1 => Some(Self::Cur),
            2 => Some(Self::End),
            _ => None,
        }
    }
}
