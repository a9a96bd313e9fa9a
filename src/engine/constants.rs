// Limits and tuning constants for the algorithm engines

/// Smallest maze side length (rows or columns) a generator accepts
pub const MIN_MAZE_SIDE: usize = 3;

/// Maze generators move between lattice cells two grid cells at a time,
/// carving the wall cell in between
pub const MAZE_STRIDE: isize = 2;

/// Largest `n` the sieve accepts; keeps the marked-number table bounded
pub const SIEVE_LIMIT: u64 = 1_000_000;

/// Numbers below this have no prime factorisation
pub const MIN_FACTORABLE: u64 = 2;
