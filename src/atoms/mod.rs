// ── Atoms Layer ────────────────────────────────────────────────────────────
// Pure constants, error types, and plain data structs — zero side effects,
// no I/O. Nothing here may import from engine/ or commands/.

pub mod constants;
pub mod error;
pub mod types;
