/// The number of addressable memory cells. Addresses are single bytes, so this is also the
/// exclusive upper bound of the address space.
pub const MEMORY_SIZE: usize = 256;

/// The number of general purpose registers (R0-R7).
pub const REGISTER_COUNT: usize = 8;

/// The bit treated as the sign bit by `JUMP_IF_NEG`.
pub const SIGN_BIT: u8 = 0x80;
