use crate::predicate::{CompareOp, Operand, Predicate, PredicateError};

impl Predicate {
    /// Build a predicate from exactly `[operand, operator, operand]`.
    pub fn parse(tokens: &[&str]) -> Result<Self, PredicateError> {
        let [left, op, right] = tokens else {
            return Err(PredicateError::MalformedPredicate {
                tokens: tokens.len(),
            });
        };

        let op = op.parse::<CompareOp>()?;
        let left = Operand::classify(left)?;
        let right = Operand::classify(right)?;

        Ok(Self::new(left, op, right))
    }

    /// Split a whitespace-delimited clause and parse its tokens.
    pub fn parse_clause(clause: &str) -> Result<Self, PredicateError> {
        let tokens = clause.split_whitespace().collect::<Vec<_>>();

        Self::parse(&tokens)
    }
}
