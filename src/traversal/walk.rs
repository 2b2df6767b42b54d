//! The depth-first walk functions: resolve the type-info stack at each
//! node, dispatch to the visitor, recurse.

use std::collections::HashSet;

use crate::ast::{
    Definition, Directive, Document, Field, Fragment, FragmentSpread, InlineFragment, Operation, OperationType, Selection,
};
use crate::schema::model::TypeType;
use crate::span::Spanning;
use crate::validation::context::ValidationContext;

use super::{Action, Visitor};

/// Runs one depth-first, pre-order traversal of `doc`, without following
/// fragment spreads.
pub fn walk_document<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, doc: &'a Document<'a>) {
    if v.enter_document(ctx, doc) == Action::Stop {
        v.leave_document(ctx, doc);
        return;
    }

    for def in doc {
        if walk_definition(v, ctx, def) == Action::Stop {
            break;
        }
    }

    v.leave_document(ctx, doc);
}

/// Runs one traversal of `doc` in fragment-spread expansion mode: visiting
/// a `FragmentSpread` additionally visits the referenced fragment's body in
/// place. A visited-spread set, keyed by fragment name within the current
/// spread chain, prevents infinite recursion through cyclic fragments (the
/// cycle itself is `NoFragmentCycles`'s concern, not this walker's).
pub fn walk_document_expanding_fragments<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, doc: &'a Document<'a>) {
    if v.enter_document(ctx, doc) == Action::Stop {
        v.leave_document(ctx, doc);
        return;
    }

    for def in doc {
        // Fragment *definitions* are only visited as the root of their own
        // traversal (`NoFragmentCycles` et al. still see them); expansion
        // only changes how a spread's *use site* is walked.
        if let Definition::Operation(_) = *def {
            if walk_definition_expanding(v, ctx, def, &mut HashSet::new()) == Action::Stop {
                break;
            }
        } else if walk_definition(v, ctx, def) == Action::Stop {
            break;
        }
    }

    v.leave_document(ctx, doc);
}

fn walk_definition<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, def: &'a Definition<'a>) -> Action {
    match *def {
        Definition::Operation(ref op) => walk_operation(v, ctx, op, false, &mut HashSet::new()),
        Definition::Fragment(ref frag) => walk_fragment_definition(v, ctx, frag, false),
    }
}

fn walk_definition_expanding<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    def: &'a Definition<'a>,
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    match *def {
        Definition::Operation(ref op) => walk_operation(v, ctx, op, true, visited_spreads),
        Definition::Fragment(ref frag) => walk_fragment_definition(v, ctx, frag, false),
    }
}

fn root_type_for<'a>(ctx: &ValidationContext<'a>, op_type: OperationType) -> Option<TypeType<'a>> {
    match op_type {
        OperationType::Query => Some(TypeType::Concrete(ctx.schema.concrete_query_type())),
        OperationType::Mutation => ctx.schema.concrete_mutation_type().map(TypeType::Concrete),
        OperationType::Subscription => ctx.schema.concrete_subscription_type().map(TypeType::Concrete),
    }
}

// Note: this deliberately does not rebind `$v`/`$ctx`/`$op` to local names —
// doing so would move the caller's `&mut V` / `&mut ValidationContext`
// before `$walk_selection_set` (whose tokens resolve to the caller's own
// `v`/`ctx`/`op` bindings under macro hygiene) gets to use them.
macro_rules! walk_operation_body {
    ($v:expr, $ctx:expr, $op:expr, $walk_selection_set:expr) => {{
        let root_type = root_type_for($ctx, $op.item.operation_type);
        $ctx.push_type(root_type);

        let action = $v.enter_operation_definition($ctx, $op);
        let mut result = action.clone();

        if action != Action::Stop {
            if let Some(ref defs) = $op.item.variable_definitions {
                for def in &defs.item {
                    if walk_variable_definition($v, $ctx, def) == Action::Stop {
                        result = Action::Stop;
                        break;
                    }
                }
            }

            if result != Action::Stop {
                if let Some(ref directives) = $op.item.directives {
                    for directive in directives {
                        if walk_directive($v, $ctx, directive) == Action::Stop {
                            result = Action::Stop;
                            break;
                        }
                    }
                }
            }

            if result != Action::Stop && action != Action::Skip {
                result = $walk_selection_set;
            }
        }

        $v.leave_operation_definition($ctx, $op);
        $ctx.pop_type();
        result
    }};
}

fn walk_operation<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    op: &'a Spanning<Operation<'a>>,
    expand_fragments: bool,
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    if expand_fragments {
        walk_operation_body!(v, ctx, op, walk_selection_set_expanding(v, ctx, &op.item.selection_set, visited_spreads))
    } else {
        walk_operation_body!(v, ctx, op, walk_selection_set(v, ctx, &op.item.selection_set))
    }
}

fn walk_fragment_definition<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    frag: &'a Spanning<Fragment<'a>>,
    expand_fragments: bool,
) -> Action {
    let condition_type = ctx.schema.concrete_type_by_name(frag.item.type_condition.item).map(TypeType::Concrete);
    ctx.push_type(condition_type);

    walk_named_type(v, ctx, frag.item.type_condition.clone());

    let action = v.enter_fragment_definition(ctx, frag);
    let mut result = action.clone();

    if action != Action::Stop {
        if let Some(ref directives) = frag.item.directives {
            for directive in directives {
                if walk_directive(v, ctx, directive) == Action::Stop {
                    result = Action::Stop;
                    break;
                }
            }
        }

        if result != Action::Stop && action != Action::Skip {
            result = if expand_fragments {
                walk_selection_set_expanding(v, ctx, &frag.item.selection_set, &mut HashSet::new())
            } else {
                walk_selection_set(v, ctx, &frag.item.selection_set)
            };
        }
    }

    v.leave_fragment_definition(ctx, frag);
    ctx.pop_type();
    result
}

fn walk_variable_definition<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    def: &'a (Spanning<&'a str>, crate::ast::VariableDefinition<'a>),
) -> Action {
    let ty = ctx.schema.make_type(&def.1.var_type.item);
    ctx.push_input_type(ty);
    walk_named_type(v, ctx, Spanning::new(def.1.var_type.item.innermost_name(), def.1.var_type.span.clone()));

    let action = v.enter_variable_definition(ctx, def);
    v.leave_variable_definition(ctx, def);
    ctx.pop_input_type();
    action
}

fn walk_named_type<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, name: Spanning<&'a str>) -> Action {
    v.enter_named_type(ctx, name)
}

fn walk_directive<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) -> Action {
    let directive_def = ctx.schema.directive_by_name(directive.item.name.item);
    ctx.push_directive(directive_def);

    let action = v.enter_directive(ctx, directive);
    let mut result = action.clone();

    if action != Action::Stop {
        if let Some(ref args) = directive.item.arguments {
            let arg_defs = directive_def.map(|d| &d.arguments[..]);
            for arg in &args.item {
                if walk_argument(v, ctx, arg, arg_defs) == Action::Stop {
                    result = Action::Stop;
                    break;
                }
            }
        }
    }

    v.leave_directive(ctx, directive);
    ctx.pop_directive();
    result
}

fn walk_argument<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    arg: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    arg_defs: Option<&'a [crate::schema::meta::Argument]>,
) -> Action {
    let arg_def = arg_defs.and_then(|defs| defs.iter().find(|d| d.name == arg.0.item));
    let arg_type = arg_def.and_then(|d| ctx.schema.make_type(&d.arg_type));
    ctx.push_argument(arg_def);
    ctx.push_input_type(arg_type);

    let action = v.enter_argument(ctx, arg);
    let mut result = action.clone();

    if action != Action::Stop && action != Action::Skip {
        result = walk_input_value(v, ctx, &arg.1);
    }

    v.leave_argument(ctx, arg);
    ctx.pop_input_type();
    ctx.pop_argument();
    result
}

/// Recurses into a literal value purely to find nested `ObjectValue` /
/// `ObjectField` nodes, however deep inside lists they are embedded; no
/// other rule needs a hook at this granularity (see [`super::Visitor`]).
fn walk_input_value<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, value: &'a Spanning<crate::ast::InputValue<'a>>) -> Action {
    match value.item {
        crate::ast::InputValue::List(ref items) => {
            for item in items {
                if walk_input_value(v, ctx, item) == Action::Stop {
                    return Action::Stop;
                }
            }
            Action::Continue
        }
        crate::ast::InputValue::Object(ref fields) => {
            let action = v.enter_object_value(ctx, Spanning::new(fields.as_slice(), value.span.clone()));
            let mut result = action.clone();

            if action != Action::Stop && action != Action::Skip {
                for field in fields {
                    if walk_object_field(v, ctx, field) == Action::Stop {
                        result = Action::Stop;
                        break;
                    }
                }
            }

            v.leave_object_value(ctx, Spanning::new(fields.as_slice(), value.span.clone()));
            result
        }
        _ => Action::Continue,
    }
}

fn walk_object_field<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    field: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
) -> Action {
    let action = v.enter_object_field(ctx, field);
    let mut result = action.clone();

    if action != Action::Stop && action != Action::Skip {
        result = walk_input_value(v, ctx, &field.1);
    }

    v.leave_object_field(ctx, field);
    result
}

fn walk_selection_set<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, set: &'a [Selection<'a>]) -> Action {
    ctx.push_parent_type();

    let action = v.enter_selection_set(ctx, set);
    let mut result = action.clone();

    if action != Action::Stop && action != Action::Skip {
        for selection in set {
            if walk_selection(v, ctx, selection) == Action::Stop {
                result = Action::Stop;
                break;
            }
        }
    }

    v.leave_selection_set(ctx, set);
    ctx.pop_parent_type();
    result
}

fn walk_selection_set_expanding<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    set: &'a [Selection<'a>],
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    ctx.push_parent_type();

    let action = v.enter_selection_set(ctx, set);
    let mut result = action.clone();

    if action != Action::Stop && action != Action::Skip {
        for selection in set {
            if walk_selection_expanding(v, ctx, selection, visited_spreads) == Action::Stop {
                result = Action::Stop;
                break;
            }
        }
    }

    v.leave_selection_set(ctx, set);
    ctx.pop_parent_type();
    result
}

fn walk_selection<'a, V: Visitor<'a>>(v: &mut V, ctx: &mut ValidationContext<'a>, selection: &'a Selection<'a>) -> Action {
    match *selection {
        Selection::Field(ref field) => walk_field(v, ctx, field, false, &mut HashSet::new()),
        Selection::FragmentSpread(ref spread) => walk_fragment_spread(v, ctx, spread, false, &mut HashSet::new()),
        Selection::InlineFragment(ref frag) => walk_inline_fragment(v, ctx, frag, false, &mut HashSet::new()),
    }
}

fn walk_selection_expanding<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    selection: &'a Selection<'a>,
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    match *selection {
        Selection::Field(ref field) => walk_field(v, ctx, field, true, visited_spreads),
        Selection::FragmentSpread(ref spread) => walk_fragment_spread(v, ctx, spread, true, visited_spreads),
        Selection::InlineFragment(ref frag) => walk_inline_fragment(v, ctx, frag, true, visited_spreads),
    }
}

fn walk_field<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    field: &'a Spanning<Field<'a>>,
    expand_fragments: bool,
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    let field_def = ctx.parent_type().and_then(|t| t.get_named().field_by_name(field.item.name.item));
    let field_type = field_def.and_then(|f| ctx.schema.make_type(&f.field_type));

    ctx.push_field_def(field_def);
    ctx.push_type(field_type);

    let action = v.enter_field(ctx, field);
    let mut result = action.clone();

    if action != Action::Stop {
        let arg_defs = field_def.map(|f| &f.arguments[..]);
        if result != Action::Stop {
            if let Some(ref args) = field.item.arguments {
                for arg in &args.item {
                    if walk_argument(v, ctx, arg, arg_defs) == Action::Stop {
                        result = Action::Stop;
                        break;
                    }
                }
            }
        }

        if result != Action::Stop {
            if let Some(ref directives) = field.item.directives {
                for directive in directives {
                    if walk_directive(v, ctx, directive) == Action::Stop {
                        result = Action::Stop;
                        break;
                    }
                }
            }
        }

        if result != Action::Stop && action != Action::Skip {
            if let Some(ref sub) = field.item.selection_set {
                result = if expand_fragments {
                    walk_selection_set_expanding(v, ctx, sub, visited_spreads)
                } else {
                    walk_selection_set(v, ctx, sub)
                };
            }
        }
    }

    v.leave_field(ctx, field);
    ctx.pop_type();
    ctx.pop_field_def();
    result
}

fn walk_fragment_spread<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    spread: &'a Spanning<FragmentSpread<'a>>,
    expand_fragments: bool,
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    let action = v.enter_fragment_spread(ctx, spread);
    let mut result = action.clone();

    if action != Action::Stop {
        if let Some(ref directives) = spread.item.directives {
            for directive in directives {
                if walk_directive(v, ctx, directive) == Action::Stop {
                    result = Action::Stop;
                    break;
                }
            }
        }

        if result != Action::Stop && expand_fragments && action != Action::Skip {
            let name = spread.item.name.item;
            if visited_spreads.insert(name) {
                if let Some(frag) = ctx.fragment(name) {
                    let condition_type = ctx.schema.concrete_type_by_name(frag.item.type_condition.item).map(TypeType::Concrete);
                    ctx.push_type(condition_type);
                    if walk_selection_set_expanding(v, ctx, &frag.item.selection_set, visited_spreads) == Action::Stop {
                        result = Action::Stop;
                    }
                    ctx.pop_type();
                }
                visited_spreads.remove(name);
            }
        }
    }

    v.leave_fragment_spread(ctx, spread);
    result
}

fn walk_inline_fragment<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut ValidationContext<'a>,
    frag: &'a Spanning<InlineFragment<'a>>,
    expand_fragments: bool,
    visited_spreads: &mut HashSet<&'a str>,
) -> Action {
    // A type condition may be absent (the fragment inherits the enclosing
    // type) or present but unknown to the schema; `KnownTypeNames` needs
    // `enter_named_type` to fire in the latter case even though there is no
    // concrete type to push.
    let has_condition = frag.item.type_condition.is_some();
    if let Some(ref name) = frag.item.type_condition {
        walk_named_type(v, ctx, name.clone());
    }
    if has_condition {
        let condition_type =
            frag.item.type_condition.as_ref().and_then(|t| ctx.schema.concrete_type_by_name(t.item)).map(TypeType::Concrete);
        ctx.push_type(condition_type);
    }

    let action = v.enter_inline_fragment(ctx, frag);
    let mut result = action.clone();

    if action != Action::Stop {
        if let Some(ref directives) = frag.item.directives {
            for directive in directives {
                if walk_directive(v, ctx, directive) == Action::Stop {
                    result = Action::Stop;
                    break;
                }
            }
        }

        if result != Action::Stop && action != Action::Skip {
            result = if expand_fragments {
                walk_selection_set_expanding(v, ctx, &frag.item.selection_set, visited_spreads)
            } else {
                walk_selection_set(v, ctx, &frag.item.selection_set)
            };
        }
    }

    v.leave_inline_fragment(ctx, frag);
    if has_condition {
        ctx.pop_type();
    }
    result
}
