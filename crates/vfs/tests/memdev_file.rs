use std::sync::Arc;

use memdev::{AccessMode, AtomConfig, AtomModule, DeviceSpec, DriverCore};
use uapi::dev::makedev;
use vfs::{File, FsError, MemDevFile, OpenFlags, SeekWhence};

fn core() -> Arc<DriverCore> {
    test_support::init_arch_ops();
    Arc::new(
        DriverCore::initialize(&[
            DeviceSpec::new(64, "RW", AccessMode::ReadWrite),
            DeviceSpec::new(64, "RO", AccessMode::ReadOnly),
            DeviceSpec::new(64, "WO", AccessMode::WriteOnly),
        ])
        .unwrap(),
    )
}

#[test]
fn test_open_decodes_access_mode() {
    let core = core();

    let file = MemDevFile::open(core.clone(), 0, OpenFlags::O_RDWR).unwrap();
    assert!(file.readable() && file.writable());
    assert_eq!(file.index(), Some(0));

    let file = MemDevFile::open(core.clone(), 1, OpenFlags::O_RDONLY).unwrap();
    assert!(file.readable() && !file.writable());

    assert_eq!(
        MemDevFile::open(core.clone(), 0, OpenFlags::O_ACCMODE).err(),
        Some(FsError::InvalidArgument)
    );
    assert_eq!(
        MemDevFile::open(core.clone(), 2, OpenFlags::O_RDWR).err(),
        Some(FsError::NotPermitted)
    );
    assert_eq!(
        MemDevFile::open(core, 9, OpenFlags::O_RDONLY).err(),
        Some(FsError::NoDevice)
    );
}

#[test]
fn test_handle_direction_is_enforced() {
    let core = core();
    let mut buf = [0u8; 4];

    let reader = MemDevFile::open(core.clone(), 1, OpenFlags::O_RDONLY).unwrap();
    assert_eq!(reader.write(b"abcd"), Err(FsError::PermissionDenied));

    let writer = MemDevFile::open(core, 2, OpenFlags::O_WRONLY).unwrap();
    assert_eq!(writer.read(&mut buf), Err(FsError::PermissionDenied));
    assert_eq!(writer.write(b"abcd"), Ok(4));
    assert_eq!(writer.offset(), 4);
}

#[test]
fn test_read_write_lseek() {
    let core = core();
    let file = MemDevFile::open(core, 0, OpenFlags::O_RDWR | OpenFlags::O_CLOEXEC).unwrap();

    assert_eq!(file.write(b"hello world"), Ok(11));
    assert_eq!(file.lseek(6, SeekWhence::Set), Ok(6));

    let mut buf = [0u8; 5];
    assert_eq!(file.read(&mut buf), Ok(5));
    assert_eq!(&buf, b"world");
    assert_eq!(file.offset(), 11);

    assert_eq!(file.lseek(-11, SeekWhence::Cur), Ok(0));
    assert_eq!(file.lseek(0, SeekWhence::End), Ok(64));
    assert_eq!(file.write(b"!"), Err(FsError::NoMemory));
    assert_eq!(file.lseek(1, SeekWhence::End), Err(FsError::InvalidArgument));
    assert_eq!(file.offset(), 64);
}

#[test]
fn test_lseek_raw_rejects_unknown_whence() {
    let core = core();
    let file = MemDevFile::open(core, 0, OpenFlags::O_RDWR).unwrap();

    assert_eq!(file.lseek_raw(8, 0), Ok(8));
    assert_eq!(file.lseek_raw(8, 1), Ok(16));
    assert_eq!(file.lseek_raw(0, 2), Ok(64));
    assert_eq!(file.lseek_raw(0, 3), Err(FsError::InvalidArgument));
    assert_eq!(file.offset(), 64);
}

#[test]
fn test_release_once() {
    let core = core();
    let file = MemDevFile::open(core, 0, OpenFlags::O_RDWR).unwrap();

    assert!(file.release());
    assert!(!file.release());
    assert_eq!(file.index(), None);

    let mut buf = [0u8; 1];
    assert_eq!(file.read(&mut buf), Err(FsError::BadFileDescriptor));
    assert_eq!(file.write(b"x"), Err(FsError::BadFileDescriptor));
    assert_eq!(file.lseek(0, SeekWhence::Set), Err(FsError::BadFileDescriptor));
}

#[test]
fn test_separate_handles_have_separate_offsets() {
    let core = core();
    let a = MemDevFile::open(core.clone(), 0, OpenFlags::O_RDWR).unwrap();
    let b = MemDevFile::open(core, 0, OpenFlags::O_RDONLY).unwrap();

    assert_eq!(a.write(b"shared"), Ok(6));
    assert_eq!(b.offset(), 0);

    let mut buf = [0u8; 6];
    assert_eq!(b.read(&mut buf), Ok(6));
    assert_eq!(&buf, b"shared");
    assert_eq!(a.offset(), 6);
}

#[test]
fn test_open_devno_through_module() {
    test_support::init_arch_ops();
    let config = AtomConfig {
        node_prefix: "vfs-devno",
        ..AtomConfig::default()
    };
    let module = AtomModule::init(&config).unwrap();
    let major = module.region().unwrap().major();

    // 3 号设备可读写
    let file = MemDevFile::open_devno(&module, makedev(major, 2), OpenFlags::O_RDWR).unwrap();
    assert_eq!(file.index(), Some(2));
    assert_eq!(file.write(&[7u8; 2000]), Ok(1024));

    assert_eq!(
        MemDevFile::open_devno(&module, makedev(major, 0), OpenFlags::O_WRONLY).err(),
        Some(FsError::NotPermitted)
    );
    assert_eq!(
        MemDevFile::open_devno(&module, makedev(major, 7), OpenFlags::O_RDONLY).err(),
        Some(FsError::NoDevice)
    );

    assert!(module.exit());
    assert_eq!(
        MemDevFile::open_devno(&module, makedev(major, 2), OpenFlags::O_RDWR).err(),
        Some(FsError::NoDevice)
    );
}
