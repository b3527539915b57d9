/// `EM_RISCV`.
pub const EM_RISCV: u16 = 243;

const EHDR_SIZE: u32 = 52;
const PHDR_SIZE: u32 = 32;

/// Writes a little-endian ELF32 executable with a single `PT_LOAD` segment
/// and no section headers.
pub fn elf32(machine: u16, entry: u32, paddr: u32, code: &[u32], memsz: u32) -> Vec<u8> {
    let data: Vec<u8> = code.iter().flat_map(|w| w.to_le_bytes()).collect();
    let mut out = Vec::new();

    out.extend_from_slice(b"\x7fELF");
    out.extend_from_slice(&[1, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    out.extend_from_slice(&machine.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&entry.to_le_bytes());
    out.extend_from_slice(&EHDR_SIZE.to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    out.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
    out.extend_from_slice(&40u16.to_le_bytes()); // e_shentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx
    assert_eq!(out.len() as u32, EHDR_SIZE);

    let offset = EHDR_SIZE + PHDR_SIZE;
    for field in [1, offset, paddr, paddr, data.len() as u32, memsz.max(data.len() as u32), 5, 4] {
        out.extend_from_slice(&field.to_le_bytes());
    }
    out.extend_from_slice(&data);
    out
}
