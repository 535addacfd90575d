use crate::{
    MAX_SPEC_LINES, MIN_SPEC_LINES,
    aggregate::{AggregateFunction, AggregateSpec},
    error::CompileError,
    obs::sink::{self, CompileEvent},
    predicate::Predicate,
    query::{ProjectedValue, QuerySpec},
};

// Zero-based positions of the meaningful lines; lines 2-4 are reserved.
const PROJECTION_LINE: usize = 0;
const PREDICATE_LINE: usize = 4;
const HAVING_LINE: usize = 5;

const PROJECTION_SEPARATOR: char = ',';
const AGGREGATE_SEPARATOR: char = '_';
const CLAUSE_SEPARATOR: char = ';';

impl QuerySpec {
    ///
    /// Parse newline-delimited specification text.
    ///
    /// Layout (one item per line):
    /// 1. comma-separated projected values (`attr` or `fn_gv_attr`)
    /// 2-4. reserved
    /// 5. semicolon-separated grouping-variable predicates
    /// 6. optional semicolon-separated having predicates
    ///
    /// Parsing is all-or-nothing.
    ///
    pub fn parse(text: &str) -> Result<Self, CompileError> {
        match parse_spec(text) {
            Ok(phi) => {
                tracing::debug!(
                    projected = phi.projected.len(),
                    aggregates = phi.aggregates.len(),
                    predicates = phi.predicates.len(),
                    having = phi.having.len(),
                    "query specification parsed"
                );
                sink::record(CompileEvent::SpecParsed {
                    aggregates: phi.aggregates.len(),
                    predicates: phi.predicates.len() + phi.having.len(),
                });

                Ok(phi)
            }
            Err(err) => {
                tracing::debug!(error = %err, "query specification rejected");
                sink::record(CompileEvent::Rejected {
                    origin: err.origin(),
                });

                Err(err)
            }
        }
    }
}

fn parse_spec(text: &str) -> Result<QuerySpec, CompileError> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect::<Vec<_>>();

    // A trailing newline after the last section is not an extra section.
    while lines.len() > MAX_SPEC_LINES && lines.last().is_some_and(|line| line.trim().is_empty())
    {
        lines.pop();
    }

    if !(MIN_SPEC_LINES..=MAX_SPEC_LINES).contains(&lines.len()) {
        return Err(CompileError::InvalidSpecificationLength { lines: lines.len() });
    }

    let projected = parse_projection(lines[PROJECTION_LINE])?;
    let predicates = parse_clauses(lines[PREDICATE_LINE])?;
    let having = match lines.get(HAVING_LINE) {
        Some(line) => parse_clauses(line)?,
        None => Vec::new(),
    };

    QuerySpec::from_parts(projected, predicates, having)
}

fn parse_projection(line: &str) -> Result<Vec<ProjectedValue>, CompileError> {
    line.split(PROJECTION_SEPARATOR)
        .map(str::trim)
        .map(parse_projected_value)
        .collect()
}

fn parse_projected_value(token: &str) -> Result<ProjectedValue, CompileError> {
    let invalid = || CompileError::InvalidProjection {
        token: token.to_string(),
    };

    if token.is_empty() {
        return Err(invalid());
    }

    if !token.contains(AGGREGATE_SEPARATOR) {
        return Ok(ProjectedValue::Attribute(token.to_string()));
    }

    let parts = token.split(AGGREGATE_SEPARATOR).collect::<Vec<_>>();
    let [function, grouping_var, attribute] = parts.as_slice() else {
        return Err(invalid());
    };
    if [function, grouping_var, attribute]
        .iter()
        .any(|part| part.is_empty())
    {
        return Err(invalid());
    }

    let function = function.parse::<AggregateFunction>()?;

    Ok(ProjectedValue::Aggregate(AggregateSpec::grouped(
        function,
        *grouping_var,
        *attribute,
    )))
}

// Blank clauses (an empty line, or a stray `;`) contribute nothing.
fn parse_clauses(line: &str) -> Result<Vec<Predicate>, CompileError> {
    line.split(CLAUSE_SEPARATOR)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| {
            Predicate::parse_clause(clause).map_err(|err| CompileError::from_predicate(clause, err))
        })
        .collect()
}
