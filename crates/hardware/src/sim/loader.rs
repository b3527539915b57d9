//! Firmware Image Loader.
//!
//! This module turns firmware files into an [`Image`] of memory segments. It performs:
//! 1. **Format detection:** ELF by magic number, `$readmemh` text by extension, raw binary otherwise.
//! 2. **Raw binaries:** One segment at a caller-supplied base, padded to a whole word.
//! 3. **Hex files:** One 32-bit hex word per token, `@` word-address directives relative
//!    to the base, and `//` comments.
//! 4. **ELF32:** Little-endian RISC-V executables; `PT_LOAD` segments at their physical
//!    addresses, the entry point, and the address of a `tohost` symbol if present.

use std::fs;
use std::path::Path;

use object::read::elf::{ElfFile32, ProgramHeader};
use object::{Architecture, Endianness, Object, ObjectSymbol};

use crate::common::SimError;
use crate::common::constants::WORD_BYTES;

/// ELF file magic.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Name of the completion symbol looked up in ELF images.
const TOHOST_SYMBOL: &str = "tohost";

/// Largest ELF segment memory size accepted, in bytes.
pub const MAX_SEGMENT_BYTES: u32 = 0x1000_0000;

/// Firmware file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raw little-endian bytes.
    Binary,
    /// `$readmemh`-style word hex text.
    Hex,
    /// ELF32 executable.
    Elf,
}

impl ImageFormat {
    /// Guesses the format of `bytes` read from `path`.
    pub fn detect(path: &Path, bytes: &[u8]) -> Self {
        if bytes.starts_with(ELF_MAGIC) {
            return Self::Elf;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("hex" | "mem" | "vmem") => Self::Hex,
            _ => Self::Binary,
        }
    }
}

/// A contiguous run of bytes to place in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// Byte address of the first byte.
    pub addr: u32,
    /// Contents.
    pub data: Vec<u8>,
}

/// A loadable firmware image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    /// Segments in file order.
    pub segments: Vec<Segment>,
    /// Entry point, if the format records one.
    pub entry: Option<u32>,
    /// Address of the `tohost` word, if the format records one.
    pub tohost: Option<u32>,
}

/// Reads a firmware file and parses it.
///
/// # Arguments
///
/// * `path` - File to read.
/// * `format` - Format to parse as; `None` detects it.
/// * `base` - Load address of raw binaries and origin of hex word addresses.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read, or the parse error of the format.
pub fn load_file(path: &Path, format: Option<ImageFormat>, base: u32) -> Result<Image, SimError> {
    let bytes =
        fs::read(path).map_err(|source| SimError::Io { path: path.to_path_buf(), source })?;
    match format.unwrap_or_else(|| ImageFormat::detect(path, &bytes)) {
        ImageFormat::Binary => Ok(parse_binary(&bytes, base)),
        ImageFormat::Hex => parse_hex(&String::from_utf8_lossy(&bytes), base),
        ImageFormat::Elf => parse_elf(&bytes),
    }
}

/// Wraps raw bytes as a single segment at `base`, zero-padded to a whole word.
pub fn parse_binary(bytes: &[u8], base: u32) -> Image {
    let mut data = bytes.to_vec();
    data.resize(data.len().next_multiple_of(WORD_BYTES as usize), 0);
    let segments = if data.is_empty() { Vec::new() } else { vec![Segment { addr: base, data }] };
    Image { segments, entry: None, tohost: None }
}

/// Parses `$readmemh`-style word hex text.
///
/// `@` directives give a word address relative to `base`; consecutive words
/// form one segment.
///
/// ```
/// use rv32sim_core::sim::loader::parse_hex;
///
/// let img = parse_hex("00a00513 // li a0, 10\n@4\n00100073\n", 0x1000).unwrap();
/// assert_eq!(img.segments.len(), 2);
/// assert_eq!(img.segments[1].addr, 0x1010);
/// ```
///
/// # Errors
///
/// [`SimError::Hex`] for a token that is not a 32-bit hex number.
pub fn parse_hex(text: &str, base: u32) -> Result<Image, SimError> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut addr = base;
    let mut current = Segment { addr, data: Vec::new() };

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.split("//").next().unwrap_or_default();
        for token in line.split_whitespace() {
            let bad = |reason: &str| SimError::Hex {
                line: idx + 1,
                reason: format!("{reason} `{token}`"),
            };
            if let Some(word_addr) = token.strip_prefix('@') {
                let word_addr =
                    u32::from_str_radix(word_addr, 16).map_err(|_| bad("bad address"))?;
                if !current.data.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                addr = base.wrapping_add(word_addr.wrapping_mul(WORD_BYTES));
                current.addr = addr;
                continue;
            }
            let word =
                u32::from_str_radix(&token.replace('_', ""), 16).map_err(|_| bad("bad word"))?;
            current.data.extend_from_slice(&word.to_le_bytes());
            addr = addr.wrapping_add(WORD_BYTES);
        }
    }
    if !current.data.is_empty() {
        segments.push(current);
    }

    Ok(Image { segments, entry: None, tohost: None })
}

/// Parses an ELF32 little-endian RISC-V executable.
///
/// Each `PT_LOAD` segment is placed at its physical address, zero-filled up
/// to its memory size.
///
/// # Errors
///
/// [`SimError::Elf`] if the file is not a little-endian RV32 ELF, a
/// segment's file data is out of bounds, or a segment's memory size is
/// smaller than its file size, above [`MAX_SEGMENT_BYTES`], or runs past the
/// end of the address space.
pub fn parse_elf(bytes: &[u8]) -> Result<Image, SimError> {
    let elf = ElfFile32::<Endianness>::parse(bytes)?;
    if elf.architecture() != Architecture::Riscv32 || !elf.is_little_endian() {
        return Err(SimError::Elf(format!(
            "expected little-endian RV32, found {:?}",
            elf.architecture()
        )));
    }

    let endian = elf.endian();
    let mut segments = Vec::new();
    for phdr in elf.elf_program_headers() {
        if phdr.p_type(endian) != object::elf::PT_LOAD || phdr.p_memsz(endian) == 0 {
            continue;
        }
        let addr = phdr.p_paddr(endian);
        let memsz = phdr.p_memsz(endian);
        if memsz < phdr.p_filesz(endian)
            || memsz > MAX_SEGMENT_BYTES
            || addr.checked_add(memsz - 1).is_none()
        {
            return Err(SimError::Elf(format!(
                "segment at {addr:#010x} has invalid memory size {memsz:#x}"
            )));
        }
        let mut data = phdr
            .data(endian, bytes)
            .map_err(|()| SimError::Elf(format!("segment at {addr:#010x} is truncated")))?
            .to_vec();
        data.resize(memsz as usize, 0);
        segments.push(Segment { addr, data });
    }

    let tohost = elf
        .symbols()
        .find(|sym| sym.name().is_ok_and(|name| name == TOHOST_SYMBOL))
        .map(|sym| sym.address() as u32);

    Ok(Image { segments, entry: Some(elf.entry() as u32), tohost })
}
