use std::{io, path::PathBuf};

/// Errors raised while acquiring access to the peripheral registers.
///
/// Register reads and writes themselves cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The physical memory device could not be opened.
    #[error("can not open {}: {source}", path.display())]
    OpenDevice {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A physical address window could not be mapped.
    #[error("can not map {len:#x} bytes at {base:#010x}: {source}")]
    Map {
        base: u64,
        len: usize,
        #[source]
        source: io::Error,
    },
}
