//! llseek 偏移计算
//!
//! 目标偏移允许等于设备大小（设备末尾），但不能为负或超过设备大小。
//! 计算在 `i64` 上进行，溢出视为越界。

use uapi::fcntl::SeekWhence;

use crate::MemDevError;

/// 计算 llseek 的新偏移
///
/// 失败时调用方的偏移保持不变。
pub fn resolve(
    current: usize,
    offset: i64,
    whence: SeekWhence,
    size: usize,
) -> Result<usize, MemDevError> {
    let size = i64::try_from(size).map_err(|_| MemDevError::OutOfRange)?;
    let current = i64::try_from(current).map_err(|_| MemDevError::OutOfRange)?;

    let target = match whence {
        SeekWhence::Set => Some(offset),
        SeekWhence::Cur => current.checked_add(offset),
        SeekWhence::End => size.checked_add(offset),
    }
    .ok_or(MemDevError::OutOfRange)?;

    if !(0..=size).contains(&target) {
        return Err(MemDevError::OutOfRange);
    }

    Ok(target as usize)
}
