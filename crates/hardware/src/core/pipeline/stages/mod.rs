//! Controller state implementations.
//!
//! Each controller state has one entry point that reads the instruction latch
//! and the registered inputs of the cycle, updates the latch, and selects the
//! next state:
//! 1. **Fetch:** Drives the instruction channel and takes pending interrupts.
//! 2. **Decode:** Generates control signals and reads source registers.
//! 3. **Execute:** Checks exceptions, runs the ALU, resolves branches, performs CSR ops.
//! 4. **MulDiv:** Hands off to the MDU and collects its result.
//! 5. **Memory:** Drives the data channel for loads and stores.
//! 6. **Writeback:** Commits the result and retires the instruction.
//! 7. **Trap:** Records trap state and redirects to the handler.

/// Instruction decode state and control-signal generation.
pub mod decode;

/// Execute state.
pub mod execute;

/// Instruction fetch state.
pub mod fetch;

/// Data memory access state.
pub mod memory;

/// Multiply/divide hand-off state.
pub mod muldiv;

/// Trap entry state.
pub mod trap;

/// Writeback state.
pub mod writeback;

/// Decode state entry point.
pub use decode::decode_stage;
/// Execute state entry point.
pub use execute::execute_stage;
/// Fetch state entry point.
pub use fetch::fetch_stage;
/// Memory state entry point.
pub use memory::mem_stage;
/// Multiply/divide state entry point.
pub use muldiv::muldiv_stage;
/// Trap state entry point.
pub use trap::trap_stage;
/// Writeback state entry point.
pub use writeback::wb_stage;
