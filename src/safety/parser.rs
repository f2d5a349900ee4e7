//! SQL parsing and classification logic.
//!
//! Uses sqlparser-rs with the PostgreSQL dialect and walks the statement
//! tree looking for anything that is not a plain query.

use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use super::SafetyLevel;

/// Classifies a SQL string.
///
/// Every statement in the string must be read-only for the whole string to
/// be read-only. An empty string is unparseable.
pub fn classify_sql(sql: &str) -> SafetyLevel {
    let statements = match Parser::parse_sql(&PostgreSqlDialect {}, sql) {
        Ok(statements) => statements,
        Err(e) => {
            debug!("SQL parse error: {e}");
            return SafetyLevel::Unparseable;
        }
    };

    if statements.is_empty() {
        return SafetyLevel::Unparseable;
    }

    if statements.iter().all(is_read_only_statement) {
        SafetyLevel::ReadOnly
    } else {
        SafetyLevel::Write
    }
}

fn is_read_only_statement(statement: &Statement) -> bool {
    match statement {
        Statement::Query(query) => is_read_only_query(query),
        _ => false,
    }
}

/// CTEs may hold data-modifying statements, and `FOR UPDATE` takes locks.
fn is_read_only_query(query: &Query) -> bool {
    if !query.locks.is_empty() {
        return false;
    }

    let ctes_read_only = query
        .with
        .as_ref()
        .map_or(true, |with| with.cte_tables.iter().all(|cte| is_read_only_query(&cte.query)));

    ctes_read_only && is_read_only_set_expr(&query.body)
}

fn is_read_only_set_expr(set_expr: &SetExpr) -> bool {
    match set_expr {
        SetExpr::Select(select) => is_read_only_select(select),
        SetExpr::Query(query) => is_read_only_query(query),
        SetExpr::SetOperation { left, right, .. } => {
            is_read_only_set_expr(left) && is_read_only_set_expr(right)
        }
        SetExpr::Values(_) | SetExpr::Table(_) => true,
        // INSERT/UPDATE/DELETE bodies and anything newer
        _ => false,
    }
}

/// `SELECT ... INTO` creates a table.
fn is_read_only_select(select: &Select) -> bool {
    select.into.is_none() && select.from.iter().all(is_read_only_table_with_joins)
}

fn is_read_only_table_with_joins(twj: &TableWithJoins) -> bool {
    is_read_only_table_factor(&twj.relation)
        && twj
            .joins
            .iter()
            .all(|join| is_read_only_table_factor(&join.relation))
}

fn is_read_only_table_factor(factor: &TableFactor) -> bool {
    match factor {
        TableFactor::Derived { subquery, .. } => is_read_only_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => is_read_only_table_with_joins(table_with_joins),
        _ => true,
    }
}
