use uapi::fcntl::{OpenFlags, SeekWhence};

#[test]
fn test_access_mode_bits() {
    assert!(OpenFlags::O_RDONLY.readable());
    assert!(!OpenFlags::O_RDONLY.writable());

    assert!(!OpenFlags::O_WRONLY.readable());
    assert!(OpenFlags::O_WRONLY.writable());

    assert!(OpenFlags::O_RDWR.readable());
    assert!(OpenFlags::O_RDWR.writable());
}

#[test]
fn test_access_mode_ignores_other_flags() {
    let flags = OpenFlags::O_WRONLY | OpenFlags::O_CLOEXEC | OpenFlags::O_NONBLOCK;
    assert_eq!(flags.access_mode(), 1);
    assert!(flags.writable());
    assert!(!flags.readable());
}

#[test]
fn test_accmode_three_is_neither() {
    let flags = OpenFlags::O_ACCMODE;
    assert!(!flags.readable());
    assert!(!flags.writable());
}

#[test]
fn test_seek_whence_from_raw() {
    assert_eq!(SeekWhence::from_raw(0), Some(SeekWhence::Set));
    assert_eq!(SeekWhence::from_raw(1), Some(SeekWhence::Cur));
    assert_eq!(SeekWhence::from_raw(2), Some(SeekWhence::End));
    assert_eq!(SeekWhence::from_raw(3), None);
}
