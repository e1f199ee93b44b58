use num_bigint::BigInt;

/// One decoded instruction weight.
///
/// Weights `0`..`9` are the named operations of the language (the names are
/// the traditional ones from the Chicken community); any larger weight is a
/// literal push of `weight - 10`. Dispatch is over the weight's *textual*
/// payload, so a cell holding `"007"` is a literal, not opcode 7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OpCode {
    /// Weight 0 (axe): halt.
    Axe,
    /// Weight 1 (chicken): push the string `"chicken"`.
    Chicken,
    /// Weight 2 (add).
    Add,
    /// Weight 3 (fox): subtract.
    Fox,
    /// Weight 4 (rooster): multiply.
    Rooster,
    /// Weight 5 (compare): loose equality, pushes a boolean.
    Compare,
    /// Weight 6 (pick): double-wide load from the store or from a string.
    Pick,
    /// Weight 7 (peck): store into an arbitrary slot, the self-modification
    /// hazard.
    Peck,
    /// Weight 8 (fr): conditional relative jump.
    Fr,
    /// Weight 9 (BBQ): push the `&#N;` character-escape placeholder.
    Bbq,
    /// Weight >= 10: push the literal `weight - 10`.
    Push(BigInt),
}

impl OpCode {
    /// Decode a weight payload. `None` means the cell does not hold a valid
    /// instruction, which can happen once a program has pecked arbitrary
    /// data over its own instruction cells.
    pub(crate) fn decode(weight: &str) -> Option<OpCode> {
        match weight {
            "0" => Some(OpCode::Axe),
            "1" => Some(OpCode::Chicken),
            "2" => Some(OpCode::Add),
            "3" => Some(OpCode::Fox),
            "4" => Some(OpCode::Rooster),
            "5" => Some(OpCode::Compare),
            "6" => Some(OpCode::Pick),
            "7" => Some(OpCode::Peck),
            "8" => Some(OpCode::Fr),
            "9" => Some(OpCode::Bbq),
            other => other
                .trim()
                .parse::<BigInt>()
                .ok()
                .map(|n| OpCode::Push(n - 10)),
        }
    }
}
