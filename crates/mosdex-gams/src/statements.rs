//! Algebraic statements and bound assignments.

use std::collections::HashMap;

use indexmap::IndexSet;
use mosdex_core::{ConstraintSense, VarKind};
use mosdex_format::{
    Cell, CoefficientDescriptor, Condition, ConstraintDescriptor, FieldRef, InterchangeError,
    Value, VariableDescriptor, field_domain,
};

use crate::catalog::{Catalog, record_labels};
use crate::error::EmitError;
use crate::format::{format_number, index_list, quote_element};

/// Hands out index identifiers within one statement.
///
/// The first use of a domain is the domain itself; later uses get an alias
/// `<domain>_<n>`, recorded so it can be declared.
#[derive(Debug, Clone, Default)]
pub struct IndexNamer {
    used: HashMap<String, usize>,
}

impl IndexNamer {
    pub fn fresh(&mut self, domain: &str, aliases: &mut IndexSet<(String, String)>) -> String {
        let count = self.used.entry(domain.to_string()).or_insert(0);
        let name = if *count == 0 {
            domain.to_string()
        } else {
            let alias = format!("{domain}_{count}");
            aliases.insert((domain.to_string(), alias.clone()));
            alias
        };
        *count += 1;
        name
    }
}

/// Relational operator of an equation with its right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Equal(Value),
    LessEqual(Value),
    GreaterEqual(Value),
    Free,
}

impl Relation {
    pub fn operator(&self) -> &'static str {
        match self {
            Relation::Equal(_) => "=E=",
            Relation::LessEqual(_) => "=L=",
            Relation::GreaterEqual(_) => "=G=",
            Relation::Free => "=N=",
        }
    }

    fn rhs(&self) -> Option<&Value> {
        match self {
            Relation::Equal(value) | Relation::LessEqual(value) | Relation::GreaterEqual(value) => {
                Some(value)
            }
            Relation::Free => None,
        }
    }
}

/// Classify a constraint from its explicit bounds, or from `SENSE` and `RHS`.
pub fn relation(constraint: &ConstraintDescriptor) -> Result<Relation, EmitError> {
    let (lower, upper) = match &constraint.bounds {
        Some(bounds) => (bounds.lower.clone(), bounds.upper.clone()),
        None => {
            let rhs = constraint.rhs.clone().unwrap_or(Value::Number(0.0));
            match constraint.sense {
                Some(ConstraintSense::Equal) => (Some(rhs.clone()), Some(rhs)),
                Some(ConstraintSense::GreaterEqual) => (Some(rhs), None),
                Some(ConstraintSense::LessEqual) => (None, Some(rhs)),
                Some(ConstraintSense::Unsupported) => {
                    return Err(EmitError::UnsupportedSense {
                        constraint: constraint.name.clone(),
                    });
                }
                None => (None, None),
            }
        }
    };

    match (lower, upper) {
        (Some(lower), Some(upper)) if lower == upper => Ok(Relation::Equal(lower)),
        (Some(_), Some(_)) => Err(EmitError::RangedConstraint {
            constraint: constraint.name.clone(),
        }),
        (None, Some(upper)) => Ok(Relation::LessEqual(upper)),
        (Some(lower), None) => Ok(Relation::GreaterEqual(lower)),
        (None, None) => Ok(Relation::Free),
    }
}

/// `parameter.field`, with the entity replaced by its parameter identifier.
fn reference_text(catalog: &Catalog<'_>, reference: &FieldRef) -> String {
    format!(
        "{}.{}",
        catalog.parameter_name(&reference.entity),
        reference.field
    )
}

/// Render a literal or a checked `entity.field` reference.
pub fn render_value(catalog: &Catalog<'_>, value: &Value) -> Result<String, InterchangeError> {
    match value {
        Value::Number(number) => Ok(format_number(*number)),
        Value::Reference(text) => {
            let (reference, _) = catalog.document().resolve(text)?;
            Ok(reference_text(catalog, &reference))
        }
    }
}

/// An equation's index identifiers, keyed by its index fields.
#[derive(Debug, Clone, Default)]
pub struct EquationIndex {
    pub fields: Vec<String>,
    pub idents: Vec<String>,
    pub namer: IndexNamer,
}

impl EquationIndex {
    pub fn new(fields: Vec<String>, aliases: &mut IndexSet<(String, String)>) -> Self {
        let mut namer = IndexNamer::default();
        let idents = fields
            .iter()
            .map(|field| namer.fresh(field_domain(field), aliases))
            .collect();
        Self {
            fields,
            idents,
            namer,
        }
    }

    fn ident_of(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .position(|candidate| candidate == field)
            .map(|pos| self.idents[pos].as_str())
    }
}

/// One `ENTRIES * var(idx)` term, summed over the positions the equation does not fix.
pub fn render_term(
    catalog: &Catalog<'_>,
    equation_name: &str,
    equation: &EquationIndex,
    coefficient: &CoefficientDescriptor,
    variable: &VariableDescriptor,
    aliases: &mut IndexSet<(String, String)>,
) -> Result<String, InterchangeError> {
    let (entries, _) = catalog.document().resolve(&coefficient.entries)?;
    let entries = reference_text(catalog, &entries);
    let condition = Condition::parse(&coefficient.condition)?;
    let malformed = || InterchangeError::MalformedCondition {
        condition: coefficient.condition.clone(),
    };

    let mut namer = equation.namer.clone();
    let mut idents = Vec::new();
    let mut summed = Vec::new();
    let mut guards = Vec::new();

    for field in catalog.symbol_fields(&variable.index)? {
        let domain = field_domain(&field);
        match condition.equation_for(&field) {
            Some(target) => {
                if target.entity != equation_name {
                    return Err(malformed());
                }
                let ident = equation.ident_of(&target.field).ok_or_else(malformed)?;
                if target.domain() == domain {
                    idents.push(ident.to_string());
                } else {
                    let own = namer.fresh(domain, aliases);
                    guards.push(format!("sameas({own},{ident})"));
                    summed.push(own.clone());
                    idents.push(own);
                }
            }
            None => {
                let own = namer.fresh(domain, aliases);
                summed.push(own.clone());
                idents.push(own);
            }
        }
    }

    let body = format!("{entries} * {}{}", variable.name, index_list(&idents));
    if summed.is_empty() {
        return Ok(body);
    }
    let controlled = if summed.len() == 1 {
        summed.remove(0)
    } else {
        format!("({})", summed.join(","))
    };
    let guard = if guards.is_empty() {
        String::new()
    } else {
        format!("$({})", guards.join(" and "))
    };
    Ok(format!("sum({controlled}{guard}, {body})"))
}

/// Assignments for one side of a variable's bounds.
fn side_assignments(
    catalog: &Catalog<'_>,
    variable: &VariableDescriptor,
    suffix: &str,
    bound: Option<&Value>,
    free_default: bool,
    domain_idents: &[String],
    out: &mut Vec<String>,
) -> Result<(), InterchangeError> {
    let name = &variable.name;
    match bound {
        Some(Value::Number(number)) => out.push(format!(
            "{name}.{suffix}{} = {};",
            index_list(domain_idents),
            format_number(*number)
        )),
        Some(Value::Reference(text)) => {
            let (reference, records) = catalog.document().resolve(text)?;
            let fields = catalog.document().index_fields(&reference.entity)?;
            for record in records {
                let labels: Vec<String> = record_labels(&reference.entity, &fields, record)?
                    .iter()
                    .map(|label| quote_element(label))
                    .collect();
                match record.get(&reference.field) {
                    Some(Cell::Number(number)) => out.push(format!(
                        "{name}.{suffix}{} = {};",
                        index_list(&labels),
                        format_number(*number)
                    )),
                    _ if free_default => {
                        out.push(format!("{name}.{suffix}{} = -inf;", index_list(&labels)))
                    }
                    _ => {}
                }
            }
        }
        None if free_default => {
            out.push(format!("{name}.{suffix}{} = -inf;", index_list(domain_idents)))
        }
        None => {}
    }
    Ok(())
}

/// `.lo`/`.up` assignments for a variable.
///
/// Integer variables default to a zero lower bound in the modeling language,
/// so a missing lower bound is written out as `-inf`.
pub fn bound_assignments(
    catalog: &Catalog<'_>,
    variable: &VariableDescriptor,
    aliases: &mut IndexSet<(String, String)>,
) -> Result<Vec<String>, InterchangeError> {
    let mut namer = IndexNamer::default();
    let domain_idents: Vec<String> = catalog
        .symbol_fields(&variable.index)?
        .iter()
        .map(|field| namer.fresh(field_domain(field), aliases))
        .collect();
    let integer = variable.kind == VarKind::Integer;

    let mut out = Vec::new();
    side_assignments(
        catalog,
        variable,
        "lo",
        variable.bounds.lower.as_ref(),
        integer,
        &domain_idents,
        &mut out,
    )?;
    side_assignments(
        catalog,
        variable,
        "up",
        variable.bounds.upper.as_ref(),
        false,
        &domain_idents,
        &mut out,
    )?;
    Ok(out)
}

/// Terms of every coefficient naming `equation_name`, joined with `+`.
pub fn render_lhs(
    catalog: &Catalog<'_>,
    equation_name: &str,
    equation: &EquationIndex,
    variables: &[VariableDescriptor],
    aliases: &mut IndexSet<(String, String)>,
) -> Result<String, InterchangeError> {
    let mut terms = Vec::new();
    for coefficient in catalog
        .document()
        .coefficients
        .iter()
        .filter(|coefficient| coefficient.constraint == equation_name)
    {
        let variable = variables
            .iter()
            .find(|variable| variable.name == coefficient.variable)
            .ok_or_else(|| InterchangeError::UnknownEntity {
                name: coefficient.variable.clone(),
            })?;
        terms.push(render_term(
            catalog,
            equation_name,
            equation,
            coefficient,
            variable,
            aliases,
        )?);
    }
    if terms.is_empty() {
        Ok("0".to_string())
    } else {
        Ok(terms.join(" + "))
    }
}

/// `name(idx).. lhs =X= rhs;`
pub fn constraint_statement(
    catalog: &Catalog<'_>,
    constraint: &ConstraintDescriptor,
    variables: &[VariableDescriptor],
    aliases: &mut IndexSet<(String, String)>,
) -> Result<String, EmitError> {
    let relation = relation(constraint)?;
    let equation = EquationIndex::new(catalog.symbol_fields(&constraint.index)?, aliases);
    let lhs = render_lhs(catalog, &constraint.name, &equation, variables, aliases)?;
    let rhs = match relation.rhs() {
        Some(value) => render_value(catalog, value)?,
        None => "0".to_string(),
    };
    Ok(format!(
        "{}{}.. {lhs} {} {rhs};",
        constraint.name,
        index_list(&equation.idents),
        relation.operator()
    ))
}
