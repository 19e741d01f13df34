//! 架构相关操作的 Mock 实现

use core::hint;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sync::ArchOps;

/// Mock 架构操作
///
/// 用一个原子标志模拟本地中断使能位。
pub struct MockArchOps {
    pub interrupt_state: AtomicBool,
}

impl MockArchOps {
    pub const fn new() -> Self {
        Self {
            interrupt_state: AtomicBool::new(true),
        }
    }
}

impl ArchOps for MockArchOps {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        self.interrupt_state.swap(false, Ordering::SeqCst) as usize
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        self.interrupt_state.store(flags != 0, Ordering::SeqCst);
    }
}

/// 全局 Mock 实例
pub static MOCK_ARCH_OPS: MockArchOps = MockArchOps::new();

// 0 = uninit, 1 = initializing, 2 = ready
static ARCH_INIT: AtomicUsize = AtomicUsize::new(0);

/// 注册 [`MOCK_ARCH_OPS`]，可在多个测试线程中重复调用
pub fn init_arch_ops() {
    match ARCH_INIT.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            // SAFETY: 只注册这一个静态实例，且由状态机保证只调用一次
            unsafe { sync::register_arch_ops(&MOCK_ARCH_OPS) };
            ARCH_INIT.store(2, Ordering::Release);
        }
        Err(_) => {
            while ARCH_INIT.load(Ordering::Acquire) != 2 {
                hint::spin_loop();
            }
        }
    }
}
