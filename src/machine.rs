//! The Chicken machine: a single growable store that is simultaneously the
//! instruction stream and the operand stack.
//!
//! Slot 0 holds the stack sentinel, slot 1 the user input, slots 2..N the
//! parsed weights followed by one appended halt weight. Pushes and pops act
//! on the tail of the same array, and the peck opcode can overwrite any
//! slot, so a running program can rewrite instructions it has not executed
//! yet (and pops can consume them).

use std::io;

use crate::error::ChickenError;
use crate::opcode::OpCode;
use crate::value::Value;

pub struct Machine {
    store: Vec<Value>,
    /// Signed so relative jumps can leave the store at either end; the run
    /// loop turns that into a fault.
    ip: i64,
    running: bool,
    trace: bool,
}

impl Machine {
    /// Build the store: sentinel, the user input as one string, the parsed
    /// weights, and the terminating halt weight.
    pub fn new(input: String, instructions: Vec<Value>) -> Self {
        let mut store = Vec::with_capacity(instructions.len() + 3);
        store.push(Value::Sentinel);
        store.push(Value::Str(input));
        store.extend(instructions);
        store.push(Value::Number("0".to_string()));
        Machine {
            store,
            ip: 2,
            running: true,
            trace: false,
        }
    }

    /// Enable the step trace: machine state to stderr before every step,
    /// then wait for a line on stdin. Diagnostic only, no semantic effect.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Run to halt. Returns the textual payload of the store's final
    /// element, with escape placeholders still unresolved.
    pub fn run(mut self) -> Result<String, ChickenError> {
        while self.running && self.in_bounds() {
            if self.trace {
                self.trace_step();
            }
            self.step()?;
        }
        if self.running {
            return Err(ChickenError::fault(format!(
                "instruction pointer {} left the store without reaching halt",
                self.ip
            )));
        }
        match self.store.last() {
            Some(tail) => Ok(tail.payload().to_string()),
            None => Err(ChickenError::fault("store is empty at halt")),
        }
    }

    fn in_bounds(&self) -> bool {
        self.ip >= 0 && (self.ip as usize) < self.store.len()
    }

    /// Execute the instruction at `ip` and advance.
    fn step(&mut self) -> Result<(), ChickenError> {
        let weight = self.store[self.ip as usize].payload().to_string();
        let op = OpCode::decode(&weight).ok_or_else(|| {
            ChickenError::fault(format!(
                "cell {} holds '{}', which is not an instruction",
                self.ip, weight
            ))
        })?;
        match op {
            OpCode::Axe => {
                self.running = false;
                return Ok(());
            }
            OpCode::Chicken => self.push(Value::Str("chicken".to_string())),
            OpCode::Add => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.push(b.add(&a));
            }
            OpCode::Fox => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.push(b.sub(&a));
            }
            OpCode::Rooster => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.push(b.mul(&a));
            }
            OpCode::Compare => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.push(Value::Bool(b.loose_eq(&a)));
            }
            OpCode::Pick => {
                self.pick()?;
                // Consumed the operand cell as well.
                self.ip += 1;
            }
            OpCode::Peck => {
                let a = self.pop_index("store index")?;
                let b = self.pop()?;
                let slot = self.checked_slot(a)?;
                self.store[slot] = b;
            }
            OpCode::Fr => {
                let a = self.pop_index("jump offset")?;
                let b = self.pop()?;
                if b.truthy() {
                    // Out-of-range targets surface as the off-end fault.
                    self.ip = self.ip.saturating_add(a);
                }
            }
            OpCode::Bbq => {
                let a = self.pop_index("character code")?;
                self.push(Value::Str(format!("&#{};", a)));
            }
            OpCode::Push(n) => self.push(Value::Number(n.to_string())),
        }
        self.ip = self.ip.saturating_add(1);
        Ok(())
    }

    /// The pick opcode. Pops the index first, then reads the operand cell,
    /// so the operand lookup and the range checks see the shrunken store;
    /// order matters when the operand cell is the tail.
    fn pick(&mut self) -> Result<(), ChickenError> {
        let a = self.pop_index("load index")?;
        let operand = self.cell(self.ip + 1)?;
        let b = operand.to_i64().ok_or_else(|| {
            ChickenError::fault(format!(
                "expected an integer store index, found '{}'",
                operand.payload()
            ))
        })?;
        let picked = match self.cell(b)? {
            Value::Sentinel => match usize::try_from(a).ok().and_then(|i| self.store.get(i)) {
                Some(v) => v.clone(),
                None => Value::Undefined,
            },
            Value::Str(s) => match usize::try_from(a).ok().and_then(|i| s.chars().nth(i)) {
                Some(c) => Value::Str(c.to_string()),
                None => Value::Undefined,
            },
            _ => Value::Undefined,
        };
        self.push(picked);
        Ok(())
    }

    fn cell(&self, idx: i64) -> Result<&Value, ChickenError> {
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.store.get(i))
            .ok_or_else(|| ChickenError::fault(format!("store index {} out of range", idx)))
    }

    fn checked_slot(&self, idx: i64) -> Result<usize, ChickenError> {
        match usize::try_from(idx) {
            Ok(i) if i < self.store.len() => Ok(i),
            _ => Err(ChickenError::fault(format!(
                "store write index {} out of range",
                idx
            ))),
        }
    }

    fn push(&mut self, value: Value) {
        self.store.push(value);
    }

    fn pop(&mut self) -> Result<Value, ChickenError> {
        self.store
            .pop()
            .ok_or_else(|| ChickenError::fault("pop from an empty store"))
    }

    fn pop_index(&mut self, what: &str) -> Result<i64, ChickenError> {
        let value = self.pop()?;
        value.to_i64().ok_or_else(|| {
            ChickenError::fault(format!(
                "expected an integer {}, found '{}'",
                what,
                value.payload()
            ))
        })
    }

    fn trace_step(&self) {
        eprintln!("Stack size: {}", self.store.len());
        for value in &self.store {
            match value {
                Value::Sentinel => eprintln!("<STACK>"),
                _ => eprintln!("{}:{}", value.payload(), value.type_name()),
            }
        }
        eprintln!("---");
        eprintln!("IP: {}", self.ip);
        eprintln!("Current command: {}", self.store[self.ip as usize].payload());
        // Continue signal: one line on stdin. The user input was consumed
        // in full before the machine started, so this does not race it.
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
    }
}
