/// Minimal ELF32 image writer.
pub mod elf;
