//! Image loading.
//!
//! This module turns files on disk into boot and RAM images. It performs:
//! 1. **Binary loading:** Reads a raw image file into a byte buffer.
//! 2. **Word packing:** Groups little-endian bytes into 32-bit words.
//! 3. **ELF loading:** Flattens the loadable segments of an RV32 ELF into a
//!    boot-region image and a RAM image.

use std::fs;
use std::path::Path;

use object::{Architecture, Endianness, Object, ObjectSegment};
use object::read::elf::ElfFile32;
use tracing::{info, warn};

use crate::common::SimError;
use crate::common::constants::{
    BOOT_BASE, BOOT_SIZE, MAX_IMAGE_BYTES, RAM_BASE, RAM_REGION_SIZE, RESET_PC,
};

/// Reads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns `SimError::Io` carrying the path if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "loader: read image");
    Ok(bytes)
}

/// Packs little-endian bytes into words, zero-padding a partial tail word.
///
/// ```
/// use rvmini_core::sim::loader::words_from_le_bytes;
///
/// assert_eq!(words_from_le_bytes(&[0x13, 0x05, 0xA0, 0x00, 0xFF]), vec![0x00A0_0513, 0xFF]);
/// ```
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Loadable contents of an ELF file split by region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElfImage {
    /// Bytes from boot-region address 0 up to the end of the highest segment there.
    pub boot: Vec<u8>,
    /// Bytes from RAM offset 0 up to the end of the highest segment there.
    pub ram: Vec<u8>,
    /// Entry point recorded in the header.
    pub entry: u32,
}

/// Extracts the loadable segments of a 32-bit little-endian RISC-V ELF.
///
/// Segments are placed by physical load address. The part of each segment
/// beyond its file data is zero-filled.
///
/// # Errors
///
/// Returns `SimError::Elf` for malformed files and `SimError::UnsupportedElf`
/// for files of another architecture or with segments outside the boot and
/// RAM regions. Returns `SimError::ImageTooLarge` if a region's flattened
/// image would exceed `MAX_IMAGE_BYTES`.
pub fn load_elf(bytes: &[u8]) -> Result<ElfImage, SimError> {
    let elf = ElfFile32::<Endianness>::parse(bytes)?;
    if elf.architecture() != Architecture::Riscv32 {
        return Err(SimError::UnsupportedElf("not a 32-bit RISC-V file"));
    }
    if !elf.is_little_endian() {
        return Err(SimError::UnsupportedElf("big-endian file"));
    }

    let mut image = ElfImage {
        entry: elf.entry() as u32,
        ..ElfImage::default()
    };
    for segment in elf.segments() {
        let addr = segment.address();
        let size = segment.size();
        if size == 0 {
            continue;
        }
        let data = segment.data()?;
        let end = addr + size;
        let (buf, base, what) = if end <= u64::from(BOOT_BASE) + u64::from(BOOT_SIZE) {
            (&mut image.boot, BOOT_BASE, "ELF boot")
        } else if addr >= u64::from(RAM_BASE)
            && end <= u64::from(RAM_BASE) + u64::from(RAM_REGION_SIZE)
        {
            (&mut image.ram, RAM_BASE, "ELF RAM")
        } else {
            return Err(SimError::UnsupportedElf(
                "segment outside the boot and RAM regions",
            ));
        };
        let flat_end = (end - u64::from(base)) as usize;
        if flat_end > MAX_IMAGE_BYTES {
            return Err(SimError::ImageTooLarge {
                what,
                bytes: flat_end,
                capacity: MAX_IMAGE_BYTES,
            });
        }
        place(buf, (addr - u64::from(base)) as usize, size as usize, data);
    }

    if image.boot.is_empty() {
        return Err(SimError::UnsupportedElf("no loadable segment in the boot region"));
    }
    if image.entry != RESET_PC {
        warn!(
            entry = format_args!("{:#010x}", image.entry),
            "loader: entry point ignored, execution starts at reset PC"
        );
    }
    info!(
        boot_bytes = image.boot.len(),
        ram_bytes = image.ram.len(),
        "loader: ELF flattened"
    );
    Ok(image)
}

fn place(buf: &mut Vec<u8>, offset: usize, size: usize, data: &[u8]) {
    let end = offset + size;
    if buf.len() < end {
        buf.resize(end, 0);
    }
    let len = data.len().min(size);
    buf[offset..offset + len].copy_from_slice(&data[..len]);
}
