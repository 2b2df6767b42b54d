//! The twenty-four standard validation rules, and `default_rules`, which
//! assembles the full set in the canonical order.
//!
//! Each rule is a plain struct implementing [`Visitor`](crate::traversal::Visitor)
//! that owns whatever per-document bookkeeping it needs, rather than a
//! closure capturing that state. Rules with no state of their own (or only
//! `'static` state like a counter) are ordinary structs; rules that must
//! remember AST-borrowed names across hooks (duplicate-name maps, fragment
//! adjacency) are generic over the document's lifetime, e.g. `Foo<'a>`.

pub mod arguments_of_correct_type;
pub mod default_values_of_correct_type;
pub mod fields_on_correct_type;
pub mod fragments_on_composite_types;
pub mod known_argument_names;
pub mod known_directives;
pub mod known_fragment_names;
pub mod known_type_names;
pub mod lone_anonymous_operation;
pub mod no_fragment_cycles;
pub mod no_undefined_variables;
pub mod no_unused_fragments;
pub mod no_unused_variables;
pub mod overlapping_fields_can_be_merged;
pub mod possible_fragment_spreads;
pub mod provided_non_null_arguments;
pub mod scalar_leafs;
pub mod unique_argument_names;
pub mod unique_fragment_names;
pub mod unique_input_field_names;
pub mod unique_operation_names;
pub mod unique_variable_names;
pub mod variables_are_input_types;
pub mod variables_in_allowed_position;

use crate::traversal::Visitor;

/// A rule factory: builds a fresh visitor instance for one traversal pass.
/// A plain function pointer (not a closure) is enough, since a rule's state
/// lives in the struct it returns rather than in captured variables; generic
/// rule structs monomorphize to whatever `'a` the orchestrator is running
/// under.
pub type RuleFactory<'a> = fn() -> Box<dyn Visitor<'a> + 'a>;

/// The full set of twenty-four rules, in the order presented by the
/// specification: document-global structural rules, schema-reference rules,
/// type-consistency rules, fragment-graph rules, fragment-spread
/// satisfiability, then field-merge consistency.
pub fn default_rules<'a>() -> Vec<RuleFactory<'a>> {
    vec![
        lone_anonymous_operation::boxed,
        unique_operation_names::boxed,
        unique_fragment_names::boxed,
        unique_variable_names::boxed,
        unique_argument_names::boxed,
        unique_input_field_names::boxed,
        known_type_names::boxed,
        known_directives::boxed,
        known_argument_names::boxed,
        known_fragment_names::boxed,
        fields_on_correct_type::boxed,
        fragments_on_composite_types::boxed,
        variables_are_input_types::boxed,
        scalar_leafs::boxed,
        arguments_of_correct_type::boxed,
        default_values_of_correct_type::boxed,
        provided_non_null_arguments::boxed,
        variables_in_allowed_position::boxed,
        no_fragment_cycles::boxed,
        no_unused_fragments::boxed,
        no_undefined_variables::boxed,
        no_unused_variables::boxed,
        possible_fragment_spreads::boxed,
        overlapping_fields_can_be_merged::boxed,
    ]
}
