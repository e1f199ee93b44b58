//! Interpreter for the Chicken esoteric language.
//!
//! A Chicken program's only word is `chicken`: each source line compiles to
//! an instruction *weight* equal to its `chicken` count, and the weights
//! double as opcodes. The simplified syntax spells the weights as plain
//! integers instead. Execution runs over a single array that is both the
//! instruction stream and the operand stack, so programs can (and do)
//! rewrite their own instructions while running.

pub mod error;
pub mod escape;
pub mod machine;
mod opcode;
pub mod parser;
pub mod value;

pub use error::{ChickenError, ErrorCode};
pub use machine::Machine;
pub use parser::Syntax;
pub use value::Value;

/// Front door used by the CLI and the integration tests: parse, build a
/// machine, run, resolve escapes.
pub struct Interpreter {
    syntax: Syntax,
    trace: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            syntax: Syntax::Standard,
            trace: false,
        }
    }

    pub fn set_syntax(&mut self, syntax: Syntax) {
        self.syntax = syntax;
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Run `program` against one block of user input and return the single
    /// output line.
    pub fn run(&self, program: &str, input: &str) -> Result<String, ChickenError> {
        let instructions = parser::parse(program, self.syntax)?;
        let input = input.replace("\r\n", "\n");
        let mut machine = Machine::new(input, instructions);
        machine.set_trace(self.trace);
        let raw = machine.run()?;
        Ok(escape::resolve(&raw))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
