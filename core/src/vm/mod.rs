mod opcode;
mod program;
mod runtime;
mod stack;

pub use opcode::Opcode;
pub use program::Program;
pub use runtime::VM;
pub use stack::Stack;
