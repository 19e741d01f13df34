//! 用户空间拷贝操作 trait 定义和注册
//!
//! 读写路径通过 [`UserCopyOps`] 在设备缓冲区和调用者缓冲区之间搬运数据，
//! 每次 read/write 恰好调用一次。宿主需要实现此 trait 并在启动时注册。

use core::sync::atomic::{AtomicUsize, Ordering};

/// 用户空间拷贝操作
///
/// 两个方法的 `dst` 与 `src` 长度总是相同。返回 `false` 表示调用者
/// 缓冲区不可访问，驱动据此报告 `TransferFault`。
pub trait UserCopyOps: Send + Sync {
    /// 设备数据拷贝到调用者缓冲区（copy_to_user）
    fn copy_to_user(&self, dst: &mut [u8], src: &[u8]) -> bool;

    /// 调用者数据拷贝到驱动缓冲区（copy_from_user）
    fn copy_from_user(&self, dst: &mut [u8], src: &[u8]) -> bool;
}

/// 直接内存拷贝
///
/// 调用者缓冲区已经是可直接访问的内存时使用，从不失败。
pub struct DirectCopy;

impl UserCopyOps for DirectCopy {
    fn copy_to_user(&self, dst: &mut [u8], src: &[u8]) -> bool {
        dst.copy_from_slice(src);
        true
    }

    fn copy_from_user(&self, dst: &mut [u8], src: &[u8]) -> bool {
        dst.copy_from_slice(src);
        true
    }
}

static DIRECT_COPY: DirectCopy = DirectCopy;

static USER_COPY_OPS_DATA: AtomicUsize = AtomicUsize::new(0);
static USER_COPY_OPS_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册用户空间拷贝实现
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_user_copy_ops(ops: &'static dyn UserCopyOps) {
    let ptr = ops as *const dyn UserCopyOps;
    // SAFETY: 将 fat pointer 拆分为 data 和 vtable 两部分存储
    let (data, vtable) =
        unsafe { core::mem::transmute::<*const dyn UserCopyOps, (usize, usize)>(ptr) };
    USER_COPY_OPS_VTABLE.store(vtable, Ordering::Release);
    USER_COPY_OPS_DATA.store(data, Ordering::Release);
}

/// 获取已注册的用户空间拷贝实现，未注册时返回 [`DirectCopy`]
#[inline]
pub fn user_copy_ops() -> &'static dyn UserCopyOps {
    let data = USER_COPY_OPS_DATA.load(Ordering::Acquire);
    if data == 0 {
        return &DIRECT_COPY;
    }
    let vtable = USER_COPY_OPS_VTABLE.load(Ordering::Acquire);
    // SAFETY: 重组 fat pointer；vtable 先于 data 发布
    unsafe { &*core::mem::transmute::<(usize, usize), *const dyn UserCopyOps>((data, vtable)) }
}
