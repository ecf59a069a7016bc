//! Listing predicate builder.
//!
//! A [`ProductFilter`] becomes an ordered list of typed [`Clause`]s, which are rendered in a
//! single pass into a SQL predicate with positional placeholders and a matching argument list.

use crate::models::ProductFilter;

/// Predicate every listing starts from; it matches all rows.
pub const BASE_PREDICATE: &str = "TRUE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    UserId,
    Price,
    Name,
}

impl Column {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Column::UserId => "user_id",
            Column::Price => "product_price",
            Column::Name => "product_name",
        }
    }

    /// Type the text parameter is cast to inside the database
    const fn cast(&self) -> Option<&'static str> {
        match self {
            Column::UserId => Some("integer"),
            Column::Price => Some("numeric"),
            Column::Name => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
    ILike,
}

impl Operator {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::ILike => "ILIKE",
        }
    }
}

/// One `column operator value` condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub column: Column,
    pub operator: Operator,
    pub value: String,
}

impl Clause {
    pub fn new(column: Column, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            column,
            operator,
            value: value.into(),
        }
    }

    fn render(&self, placeholder: usize) -> String {
        let param = match self.column.cast() {
            Some(ty) => format!("${placeholder}::{ty}"),
            None => format!("${placeholder}"),
        };
        format!("{} {} {}", self.column.as_str(), self.operator.as_sql(), param)
    }
}

/// Rendered predicate plus the arguments bound to `$1..$n`, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub predicate: String,
    pub args: Vec<String>,
}

impl FilterQuery {
    pub fn from_filter(filter: &ProductFilter) -> Self {
        Self::render(clauses(filter))
    }

    /// Conjoin `clauses` onto [`BASE_PREDICATE`], numbering placeholders from 1.
    pub fn render(clauses: Vec<Clause>) -> Self {
        let mut predicate = String::from(BASE_PREDICATE);
        let mut args = Vec::with_capacity(clauses.len());

        for clause in clauses {
            predicate.push_str(" AND ");
            predicate.push_str(&clause.render(args.len() + 1));
            args.push(clause.value);
        }

        Self { predicate, args }
    }
}

/// Clauses for the present criteria, always in the order
/// user id, min price, max price, name.
pub fn clauses(filter: &ProductFilter) -> Vec<Clause> {
    let mut clauses = Vec::new();

    if let Some(user_id) = present(&filter.user_id) {
        clauses.push(Clause::new(Column::UserId, Operator::Eq, user_id));
    }
    if let Some(min) = present(&filter.min_price) {
        clauses.push(Clause::new(Column::Price, Operator::Gte, min));
    }
    if let Some(max) = present(&filter.max_price) {
        clauses.push(Clause::new(Column::Price, Operator::Lte, max));
    }
    if let Some(fragment) = present(&filter.name_contains) {
        clauses.push(Clause::new(
            Column::Name,
            Operator::ILike,
            format!("%{}%", escape_like(fragment)),
        ));
    }

    clauses
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Escape `\`, `%` and `_` so the fragment matches literally under LIKE/ILIKE.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
