use crate::vm::Opcode;

/// Post-pass over finished, flat code.
///
/// The only pass today drops `NoOp` placeholders. Further passes (constant
/// folding, stack-depth precomputation) would run over the same flat
/// representation.
#[derive(Debug, Default)]
pub struct Optimizer {
    removed: usize,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimizes `code` in place, preserving the order of kept opcodes.
    pub fn optimize(&mut self, code: &mut Vec<Opcode>) {
        self.remove_noops(code);
    }

    /// Number of opcodes removed so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    fn remove_noops(&mut self, code: &mut Vec<Opcode>) {
        let before = code.len();
        code.retain(|opcode| *opcode != Opcode::NoOp);
        self.removed += before - code.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removes_noops_in_order() {
        let mut code = vec![
            Opcode::LoadConstant(1.0),
            Opcode::NoOp,
            Opcode::LoadConstant(2.0),
            Opcode::NoOp,
            Opcode::NoOp,
            Opcode::Add,
            Opcode::NoOp,
        ];
        let mut optimizer = Optimizer::new();
        optimizer.optimize(&mut code);

        assert_eq!(
            code,
            vec![
                Opcode::LoadConstant(1.0),
                Opcode::LoadConstant(2.0),
                Opcode::Add,
            ]
        );
        assert_eq!(optimizer.removed(), 4);
    }

    #[test]
    fn test_empty_code() {
        let mut code = Vec::new();
        Optimizer::new().optimize(&mut code);
        assert!(code.is_empty());
    }
}
