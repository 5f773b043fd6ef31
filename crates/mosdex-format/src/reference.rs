//! `entity.field` references and `CONDITION` expressions.

use std::fmt;

use crate::error::InterchangeError;

/// Domain part of an index field name (`i` in `i#x`).
pub fn field_domain(field: &str) -> &str {
    field.split_once('#').map_or(field, |(domain, _)| domain)
}

/// A field of a record type, written `entity.field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub entity: String,
    pub field: String,
}

impl FieldRef {
    /// Split at the first `.`; both sides must be non-empty.
    pub fn parse(text: &str) -> Result<Self, InterchangeError> {
        let malformed = || InterchangeError::MalformedReference {
            reference: text.to_string(),
        };
        let (entity, field) = text.trim().split_once('.').ok_or_else(malformed)?;
        if entity.is_empty() || field.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            entity: entity.to_string(),
            field: field.to_string(),
        })
    }

    /// Domain part of the field, see [`field_domain`].
    pub fn domain(&self) -> &str {
        field_domain(&self.field)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.field)
    }
}

/// One `variable.field == equation.field` term of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equality {
    pub variable: FieldRef,
    pub equation: FieldRef,
}

/// Conjunction of equalities between variable and equation index fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    pub terms: Vec<Equality>,
}

impl Condition {
    /// Parse `a.f == b.g and c.h == d.k`. The empty string is the empty conjunction.
    pub fn parse(text: &str) -> Result<Self, InterchangeError> {
        let malformed = || InterchangeError::MalformedCondition {
            condition: text.to_string(),
        };
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut terms = Vec::new();
        for part in text.split(" and ") {
            let (lhs, rhs) = part.split_once("==").ok_or_else(malformed)?;
            if rhs.contains("==") {
                return Err(malformed());
            }
            let variable = FieldRef::parse(lhs).map_err(|_| malformed())?;
            let equation = FieldRef::parse(rhs).map_err(|_| malformed())?;
            terms.push(Equality { variable, equation });
        }
        Ok(Self { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Equation field equated to the given variable field, if any.
    pub fn equation_for(&self, variable_field: &str) -> Option<&FieldRef> {
        self.terms
            .iter()
            .find(|term| term.variable.field == variable_field)
            .map(|term| &term.equation)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, term) in self.terms.iter().enumerate() {
            if idx > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{} == {}", term.variable, term.equation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ref_splits_at_first_dot() {
        let reference = FieldRef::parse("coef_e_x.val").expect("ref");
        assert_eq!(reference.entity, "coef_e_x");
        assert_eq!(reference.field, "val");

        let reference = FieldRef::parse("x.i#x").expect("ref");
        assert_eq!(reference.domain(), "i");
        assert_eq!(reference.to_string(), "x.i#x");
    }

    #[test]
    fn field_ref_rejects_missing_parts() {
        for text in ["xlb", ".lb", "x.", ""] {
            let err = FieldRef::parse(text).unwrap_err();
            assert_eq!(err.code(), "REFERENCE_MALFORMED", "{text}");
        }
    }

    #[test]
    fn condition_parses_conjunctions() {
        let condition = Condition::parse("x.i#x == e.i#e and x.k#x == e.j#e").expect("condition");
        assert_eq!(condition.terms.len(), 2);
        assert_eq!(condition.equation_for("k#x").map(|r| r.field.as_str()), Some("j#e"));
        assert!(condition.equation_for("j#x").is_none());
        assert_eq!(condition.to_string(), "x.i#x == e.i#e and x.k#x == e.j#e");
    }

    #[test]
    fn empty_condition_has_no_terms() {
        assert!(Condition::parse("").expect("condition").is_empty());
    }

    #[test]
    fn malformed_conditions_are_rejected() {
        for text in ["x.i#x = e.i#e", "x.i#x == e", "x.i == e.i == f.i"] {
            let err = Condition::parse(text).unwrap_err();
            assert_eq!(err.code(), "CONDITION_MALFORMED", "{text}");
        }
    }
}
