pub mod arg;
pub mod op;

pub use arg::ArgType;
pub use op::{ArgSpec, Opcode};
