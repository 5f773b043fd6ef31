//! Regenerate GAMS model source from a MOSDEX document.
//!
//! Correlated index positions recorded in each coefficient's `CONDITION`
//! reuse the equation's index; every other variable position is summed.
//! Symbol records become `<symbol>_data` parameters so no name is declared twice.
//!
//! ```text
//! e(i).. sum(j, coef_e_x.val * x(i,j)) =L= e_data.rhs;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod statements;

use std::fmt::Write as _;
use std::time::Instant;

use indexmap::IndexSet;
use mosdex_core::{ObjectiveSense, VarKind};
use mosdex_format::document::SELF_INDEX;
use mosdex_format::{Cell, Document, InterchangeError, field_domain};

pub use catalog::Catalog;
pub use config::GamsConfig;
pub use error::EmitError;

use crate::catalog::record_labels;
use crate::format::{format_number, index_list, quote_label};
use crate::statements::{EquationIndex, bound_assignments, constraint_statement, render_lhs};

fn declaration_keyword(kind: VarKind) -> &'static str {
    match kind {
        VarKind::Binary => "Binary Variable",
        VarKind::Integer => "Integer Variable",
        VarKind::Continuous | VarKind::Unsupported => "Variable",
    }
}

fn model_name(problem: &str) -> String {
    let name: String = problem
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    match name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => name,
        Some(_) => format!("m_{name}"),
        None => "m".to_string(),
    }
}

fn push_section(out: &mut String, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}

/// Render the whole model as modeling-language source.
pub fn emit(document: &Document, config: &GamsConfig) -> Result<String, EmitError> {
    let started = Instant::now();
    let catalog = Catalog::build(document)?;
    let mut aliases: IndexSet<(String, String)> = IndexSet::new();

    let objective = document.decision_expressions.first().ok_or_else(|| {
        InterchangeError::InvalidShape {
            reason: "DECISION_EXPRESSIONS is empty".to_string(),
        }
    })?;

    let variables = &document.variables;
    for variable in variables {
        if variable.kind == VarKind::Unsupported {
            tracing::warn!(
                component = "gams",
                operation = "emit",
                status = "unsupported",
                variable = variable.name.as_str(),
                "Unsupported variable type declared as free variable"
            );
        }
    }

    // Statements first, so every alias they need is known before declarations.
    let mut bounds = Vec::new();
    for variable in variables {
        bounds.extend(bound_assignments(&catalog, variable, &mut aliases)?);
    }
    let mut equations = Vec::new();
    for constraint in &document.constraints {
        equations.push(constraint_statement(
            &catalog,
            constraint,
            variables,
            &mut aliases,
        )?);
    }
    let objective_lhs = render_lhs(
        &catalog,
        &objective.name,
        &EquationIndex::default(),
        variables,
        &mut aliases,
    )?;
    equations.push(format!(
        "{}_def.. {} =E= {objective_lhs};",
        objective.name, objective.name
    ));

    let mut out = String::new();
    if config.emits_header() {
        push_section(
            &mut out,
            &[format!("* MOSDEX problem {}", document.problem.name)],
        );
    }

    let sets: Vec<String> = catalog
        .sets()
        .map(|(domain, labels)| {
            if labels.is_empty() {
                format!("Set {domain};")
            } else {
                let labels: Vec<String> = labels.iter().map(|label| quote_label(label)).collect();
                format!("Set {domain} / {} /;", labels.join(", "))
            }
        })
        .collect();
    push_section(&mut out, &sets);

    let alias_lines: Vec<String> = aliases
        .iter()
        .map(|(domain, alias)| format!("Alias ({domain}, {alias});"))
        .collect();
    push_section(&mut out, &alias_lines);

    let mut parameters = Vec::new();
    for (entity, records) in &document.data {
        let numeric = catalog.numeric_fields(entity);
        if numeric.is_empty() {
            continue;
        }
        let fields = document.index_fields(entity)?;
        let mut domains: Vec<&str> = fields.iter().map(|field| field_domain(field)).collect();
        domains.push("*");

        let mut lines = String::new();
        for record in records {
            let labels: Vec<String> = record_labels(entity, &fields, record)?
                .iter()
                .map(|label| quote_label(label))
                .collect();
            for field in &numeric {
                let Some(Cell::Number(value)) = record.get(*field) else {
                    continue;
                };
                let mut key = labels.clone();
                key.push((*field).to_string());
                let _ = writeln!(lines, "    {} {}", key.join("."), format_number(*value));
            }
        }
        if lines.is_empty() {
            continue;
        }
        parameters.push(format!(
            "Parameter {}{} /\n{lines}/;",
            catalog.parameter_name(entity),
            index_list(&domains)
        ));
    }
    push_section(&mut out, &parameters);

    let mut declarations = Vec::new();
    if !variables.iter().any(|variable| variable.name == objective.name) {
        declarations.push(format!("Variable {};", objective.name));
    }
    for variable in variables {
        let domains: Vec<String> = catalog
            .symbol_fields(&variable.index)?
            .iter()
            .map(|field| field_domain(field).to_string())
            .collect();
        declarations.push(format!(
            "{} {}{};",
            declaration_keyword(variable.kind),
            variable.name,
            index_list(&domains)
        ));
    }
    push_section(&mut out, &declarations);

    let mut equation_decls = Vec::new();
    for constraint in &document.constraints {
        let domains: Vec<String> = catalog
            .symbol_fields(&constraint.index)?
            .iter()
            .map(|field| field_domain(field).to_string())
            .collect();
        equation_decls.push(format!("Equation {}{};", constraint.name, index_list(&domains)));
    }
    equation_decls.push(format!("Equation {}_def;", objective.name));
    push_section(&mut out, &equation_decls);

    push_section(&mut out, &bounds);
    push_section(&mut out, &equations);

    if config.emits_solve_statement() {
        let model = model_name(&document.problem.name);
        let class = if variables.iter().any(|variable| variable.kind.is_discrete()) {
            "mip"
        } else {
            "lp"
        };
        let direction = match objective.sense {
            ObjectiveSense::Minimize => "minimizing",
            ObjectiveSense::Maximize => "maximizing",
        };
        push_section(
            &mut out,
            &[
                format!("Model {model} / all /;"),
                format!("Solve {model} using {class} {direction} {};", objective.name),
            ],
        );
    }

    if objective.index != SELF_INDEX {
        tracing::debug!(
            component = "gams",
            operation = "emit",
            status = "indexed_objective",
            objective = objective.name.as_str(),
            "Objective index ignored"
        );
    }
    tracing::info!(
        component = "gams",
        operation = "emit",
        status = "success",
        problem = document.problem.name.as_str(),
        equations = equations.len(),
        bytes = out.len(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Emitted model source"
    );

    Ok(out)
}
