//! Query validation core for a GraphQL server.
//!
//! Given a parsed request [`Document`](ast::Document) and a [`SchemaType`],
//! [`validate`] determines whether the document conforms to the GraphQL
//! specification's validation rules and returns the list of violations
//! found. A document that validates cleanly may be safely executed; one
//! that doesn't must not be.
//!
//! Out of scope, by design: lexing/parsing (callers hand in an already
//! parsed document), the schema/type-system runtime (consumed read-only
//! through [`schema::model::SchemaType`]), the AST printer, and the
//! executor.

pub mod ast;
pub mod schema;
pub mod span;
#[cfg(test)]
pub mod test_support;
pub mod traversal;
pub mod type_utils;
pub mod validation;

pub use validation::{RuleError, ValidationContext};

use ast::Document;
use schema::model::SchemaType;
use validation::rules::{default_rules, RuleFactory};

/// Validates `document` against `schema`, returning the accumulated list of
/// rule violations in deterministic order.
///
/// `rules` defaults to the full set of twenty-four standard rules, in the
/// order `validation::rules::default_rules` presents them; pass `Some(&[...])`
/// to run a subset or a custom ordering. Rules that don't apply to a given
/// document simply contribute no errors.
pub fn validate<'a>(schema: &'a SchemaType<'a>, document: &'a Document<'a>, rules: Option<&[RuleFactory<'a>]>) -> Vec<RuleError> {
    match rules {
        Some(rules) => validation::validate(schema, document, rules),
        None => validation::validate(schema, document, &default_rules()),
    }
}
