//! 带边界裁剪的读写
//!
//! 请求长度被裁剪到 `size - offset`。读到设备末尾返回 0 字节，属于正常结束；
//! 写入时裁剪后长度为 0 则报告 `NoSpace`。拷贝失败时不提交任何字节。

use alloc::vec;

use crate::{MemDevError, UserCopyOps};

/// 裁剪后的实际传输长度，`offset >= size` 时为 0
#[inline]
pub fn clamp(size: usize, offset: usize, requested: usize) -> usize {
    size.saturating_sub(offset).min(requested)
}

/// 从 `buffer[offset..]` 读出数据到 `dst`
///
/// 返回实际读出的字节数；偏移的推进由调用方负责。
pub fn read(
    buffer: &[u8],
    offset: usize,
    dst: &mut [u8],
    user_copy: &dyn UserCopyOps,
) -> Result<usize, MemDevError> {
    let count = clamp(buffer.len(), offset, dst.len());
    let start = offset.min(buffer.len());

    if !user_copy.copy_to_user(&mut dst[..count], &buffer[start..start + count]) {
        return Err(MemDevError::TransferFault);
    }

    Ok(count)
}

/// 将 `src` 写入 `buffer[offset..]`
///
/// 数据先拷贝到暂存区，拷贝成功后才写入设备缓冲区。
pub fn write(
    buffer: &mut [u8],
    offset: usize,
    src: &[u8],
    user_copy: &dyn UserCopyOps,
) -> Result<usize, MemDevError> {
    let count = clamp(buffer.len(), offset, src.len());
    if count == 0 {
        log::error!("memdev: no space left on the device (offset {})", offset);
        return Err(MemDevError::NoSpace);
    }

    let mut staged = vec![0u8; count];
    if !user_copy.copy_from_user(&mut staged, &src[..count]) {
        return Err(MemDevError::TransferFault);
    }

    buffer[offset..offset + count].copy_from_slice(&staged);
    Ok(count)
}
