//! Memory mapped register access.
//!
//! Peripherals are reached through a [RegisterBlock]. On the target the block is a
//! [Mapping] of a physical address window obtained through [DevMem]. Off target, a
//! [Recorder] keeps the registers in memory and remembers every write.
//!
//! Example usage:
//!
//! ```no_run
//! use dm37xx::mmio::{DevMem, RegisterBlock, Window};
//!
//! let mem = DevMem::open()?;
//! let mut cm = mem.map(Window { base: 0x4800_4000, len: 0x1000 })?;
//! let clksel = cm.read_register(0xa40);
//! cm.write_register(0xa40, clksel | 0x40);
//! # Ok::<(), dm37xx::Error>(())
//! ```

use std::{
    fs::{File, OpenOptions},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
    ptr,
};

use memmap2::{MmapMut, MmapOptions};

use crate::Error;

/// Physical memory device.
pub const DEV_MEM: &str = "/dev/mem";

/// Block of 32-bit registers addressed by byte offset.
pub trait RegisterBlock {
    fn read_register(&self, offset: usize) -> u32;

    fn write_register(&mut self, offset: usize, value: u32);

    /// Read-modify-write of a single register.
    #[inline]
    fn modify_register<F>(&mut self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read_register(offset);
        self.write_register(offset, f(value));
    }
}

impl<R: RegisterBlock + ?Sized> RegisterBlock for &mut R {
    #[inline]
    fn read_register(&self, offset: usize) -> u32 {
        (**self).read_register(offset)
    }

    #[inline]
    fn write_register(&mut self, offset: usize, value: u32) {
        (**self).write_register(offset, value)
    }
}

/// Physical address window.
///
/// `base` must be page aligned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub base: u64,
    pub len: usize,
}

/// Open handle to the physical memory device.
///
/// The handle is closed when dropped. Mappings stay valid after that.
#[derive(Debug)]
pub struct DevMem {
    file: File,
    path: PathBuf,
}

impl DevMem {
    /// Open [DEV_MEM] for synchronous read and write access.
    ///
    /// Requires root privileges.
    pub fn open() -> Result<Self, Error> {
        Self::open_path(DEV_MEM)
    }

    /// Open a memory device other than [DEV_MEM].
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(|source| Error::OpenDevice {
                path: path.to_owned(),
                source,
            })?;
        log::debug!("opened {}", path.display());
        Ok(Self {
            file,
            path: path.to_owned(),
        })
    }

    /// Map a physical address window as a shared, writable register block.
    pub fn map(&self, window: Window) -> Result<Mapping, Error> {
        // Safety: the mapping aliases device memory which is only ever accessed
        // through volatile reads and writes.
        let map = unsafe {
            MmapOptions::new()
                .offset(window.base)
                .len(window.len)
                .map_mut(&self.file)
        }
        .map_err(|source| Error::Map {
            base: window.base,
            len: window.len,
            source,
        })?;
        log::debug!("mapped {:#x} bytes at {:#010x}", window.len, window.base);
        Ok(Mapping { map, window })
    }
}

impl Drop for DevMem {
    fn drop(&mut self) {
        log::debug!("closing {}", self.path.display());
    }
}

/// Mapped physical address window.
///
/// Unmapped when dropped.
#[derive(Debug)]
pub struct Mapping {
    map: MmapMut,
    window: Window,
}

impl Mapping {
    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    #[inline]
    fn check(&self, offset: usize) {
        assert!(
            offset % 4 == 0 && offset + 4 <= self.map.len(),
            "register offset {offset:#x} outside of window {:#010x}+{:#x}",
            self.window.base,
            self.window.len,
        );
    }
}

impl RegisterBlock for Mapping {
    #[inline]
    fn read_register(&self, offset: usize) -> u32 {
        self.check(offset);
        unsafe { ptr::read_volatile(self.map.as_ptr().add(offset) as *const u32) }
    }

    #[inline]
    fn write_register(&mut self, offset: usize, value: u32) {
        self.check(offset);
        log::trace!("{:#010x} <- {value:#010x}", self.window.base + offset as u64);
        unsafe { ptr::write_volatile(self.map.as_mut_ptr().add(offset) as *mut u32, value) }
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        log::debug!("unmapping {:#010x}", self.window.base);
    }
}

/// In-memory register block.
///
/// All registers start at zero unless preset with [Recorder::with_value]. Every write
/// is appended to a log, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recorder {
    words: Vec<u32>,
    writes: Vec<(usize, u32)>,
}

impl Recorder {
    /// Registers for a window of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len / 4],
            writes: Vec::new(),
        }
    }

    /// Preset a register, e.g. with its reset value. Not recorded as a write.
    pub fn with_value(mut self, offset: usize, value: u32) -> Self {
        self.words[Self::index(offset)] = value;
        self
    }

    /// Writes in the order they were issued, as `(offset, value)`.
    pub fn writes(&self) -> &[(usize, u32)] {
        &self.writes
    }

    #[inline]
    fn index(offset: usize) -> usize {
        assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        offset / 4
    }
}

impl RegisterBlock for Recorder {
    #[inline]
    fn read_register(&self, offset: usize) -> u32 {
        self.words[Self::index(offset)]
    }

    #[inline]
    fn write_register(&mut self, offset: usize, value: u32) {
        self.words[Self::index(offset)] = value;
        self.writes.push((offset, value));
    }
}
