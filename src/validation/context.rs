//! `ValidationContext`: the memoized facade over schema and document that
//! rules query for the semantic state of the node currently being visited.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use derive_more::Error;

use crate::ast::{Definition, Document, Fragment, InputValue, Operation, Selection, Type};
use crate::schema::meta::{Argument, Field};
use crate::schema::model::{DirectiveType, SchemaType, TypeType};
use crate::span::{SourcePosition, Spanning};

/// A document validation error: a rule violation, with the source
/// positions of the AST nodes that triggered it.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Error)]
pub struct RuleError {
    message: String,
    locations: Vec<SourcePosition>,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let locations = self.locations.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        write!(f, "{}. At {}", self.message, locations)
    }
}

impl RuleError {
    pub fn new(message: impl Into<String>, locations: &[SourcePosition]) -> RuleError {
        RuleError { message: message.into(), locations: locations.to_vec() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn locations(&self) -> &[SourcePosition] {
        &self.locations
    }
}

/// One recorded use of a variable inside an operation (or a fragment
/// transitively spread by it): its name, the location it appeared at, and
/// the input type expected at that position (`None` if the position's type
/// could not be resolved, e.g. an unknown argument).
#[derive(Clone)]
pub struct VariableUsage<'a> {
    pub name: &'a str,
    pub location: SourcePosition,
    pub expected_type: Option<TypeType<'a>>,
}

/// Key identifying an operation for the per-operation usage caches: the
/// operation's address is a stable proxy for identity for the lifetime of
/// one validation call.
type OpKey = usize;

fn op_key(op: &Operation) -> OpKey {
    op as *const Operation as OpKey
}

/// The live, per-document state threaded through one validation call: the
/// accumulated error list, the type-info stack the traversal engine updates
/// on every enter/leave, the fragment index, and the memoized variable
/// usage caches.
pub struct ValidationContext<'a> {
    pub schema: &'a SchemaType<'a>,
    pub document: &'a Document<'a>,
    errors: Vec<RuleError>,

    type_stack: Vec<Option<TypeType<'a>>>,
    parent_type_stack: Vec<Option<TypeType<'a>>>,
    input_type_stack: Vec<Option<TypeType<'a>>>,
    field_def_stack: Vec<Option<&'a Field>>,
    argument_stack: Vec<Option<&'a Argument>>,
    directive_stack: Vec<Option<&'a DirectiveType>>,

    fragments: HashMap<&'a str, &'a Spanning<Fragment<'a>>>,

    variable_usages: RefCell<HashMap<OpKey, std::rc::Rc<Vec<VariableUsage<'a>>>>>,
    recursive_variable_usages: RefCell<HashMap<OpKey, std::rc::Rc<Vec<VariableUsage<'a>>>>>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(schema: &'a SchemaType<'a>, document: &'a Document<'a>) -> ValidationContext<'a> {
        let fragments = document
            .iter()
            .filter_map(|def| match *def {
                Definition::Fragment(ref frag) => Some((frag.item.name.item, frag)),
                _ => None,
            })
            .collect();

        ValidationContext {
            schema,
            document,
            errors: Vec::new(),
            type_stack: Vec::new(),
            parent_type_stack: Vec::new(),
            input_type_stack: Vec::new(),
            field_def_stack: Vec::new(),
            argument_stack: Vec::new(),
            directive_stack: Vec::new(),
            fragments,
            variable_usages: RefCell::new(HashMap::new()),
            recursive_variable_usages: RefCell::new(HashMap::new()),
        }
    }

    pub fn report_error(&mut self, message: impl Into<String>, locations: &[SourcePosition]) {
        self.errors.push(RuleError::new(message, locations));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(mut self) -> Vec<RuleError> {
        self.errors.sort();
        self.errors
    }

    pub fn errors(&self) -> &[RuleError] {
        &self.errors
    }

    // --- type-info stack -------------------------------------------------

    pub fn push_type(&mut self, t: Option<TypeType<'a>>) {
        self.type_stack.push(t);
    }

    pub fn pop_type(&mut self) {
        self.type_stack.pop().expect("type_stack underflow: unbalanced push/pop");
    }

    pub fn push_parent_type(&mut self) {
        let t = self.type_stack.last().cloned().unwrap_or(None);
        self.parent_type_stack.push(t);
    }

    pub fn pop_parent_type(&mut self) {
        self.parent_type_stack.pop().expect("parent_type_stack underflow: unbalanced push/pop");
    }

    pub fn push_input_type(&mut self, t: Option<TypeType<'a>>) {
        self.input_type_stack.push(t);
    }

    pub fn pop_input_type(&mut self) {
        self.input_type_stack.pop().expect("input_type_stack underflow: unbalanced push/pop");
    }

    pub fn push_field_def(&mut self, f: Option<&'a Field>) {
        self.field_def_stack.push(f);
    }

    pub fn pop_field_def(&mut self) {
        self.field_def_stack.pop().expect("field_def_stack underflow: unbalanced push/pop");
    }

    pub fn push_argument(&mut self, a: Option<&'a Argument>) {
        self.argument_stack.push(a);
    }

    pub fn pop_argument(&mut self) {
        self.argument_stack.pop().expect("argument_stack underflow: unbalanced push/pop");
    }

    pub fn push_directive(&mut self, d: Option<&'a DirectiveType>) {
        self.directive_stack.push(d);
    }

    pub fn pop_directive(&mut self) {
        self.directive_stack.pop().expect("directive_stack underflow: unbalanced push/pop");
    }

    pub fn stacks_balanced(&self) -> bool {
        self.type_stack.is_empty()
            && self.parent_type_stack.is_empty()
            && self.input_type_stack.is_empty()
            && self.field_def_stack.is_empty()
            && self.argument_stack.is_empty()
            && self.directive_stack.is_empty()
    }

    // --- accessors ---------------------------------------------------

    pub fn current_type(&self) -> Option<&TypeType<'a>> {
        self.type_stack.last().and_then(|t| t.as_ref())
    }

    pub fn parent_type(&self) -> Option<&TypeType<'a>> {
        self.parent_type_stack.last().and_then(|t| t.as_ref())
    }

    pub fn input_type(&self) -> Option<&TypeType<'a>> {
        self.input_type_stack.last().and_then(|t| t.as_ref())
    }

    pub fn field_def(&self) -> Option<&'a Field> {
        self.field_def_stack.last().copied().flatten()
    }

    pub fn argument_def(&self) -> Option<&'a Argument> {
        self.argument_stack.last().copied().flatten()
    }

    pub fn directive(&self) -> Option<&'a DirectiveType> {
        self.directive_stack.last().copied().flatten()
    }

    pub fn fragment(&self, name: &str) -> Option<&'a Spanning<Fragment<'a>>> {
        self.fragments.get(name).copied()
    }

    pub fn is_known_fragment(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn fragments(&self) -> impl Iterator<Item = &'a Spanning<Fragment<'a>>> + '_ {
        self.fragments.values().copied()
    }

    // --- variable usage analysis --------------------------------------

    /// Variable usages directly inside `op` (not following fragment spreads).
    pub fn variable_usages(&self, op: &'a Operation<'a>) -> std::rc::Rc<Vec<VariableUsage<'a>>> {
        let key = op_key(op);
        if let Some(cached) = self.variable_usages.borrow().get(&key) {
            return cached.clone();
        }

        let parent_type = root_type_for(self.schema, op.operation_type);
        let mut out = Vec::new();
        collect_variable_usages_in_selection_set(self.schema, parent_type.as_ref(), &op.selection_set, &mut out);
        let rc = std::rc::Rc::new(out);
        self.variable_usages.borrow_mut().insert(key, rc.clone());
        rc
    }

    /// Variable usages inside `op` plus every fragment transitively spread
    /// from it.
    pub fn recursive_variable_usages(&self, op: &'a Operation<'a>) -> std::rc::Rc<Vec<VariableUsage<'a>>> {
        let key = op_key(op);
        if let Some(cached) = self.recursive_variable_usages.borrow().get(&key) {
            return cached.clone();
        }

        let mut out = (*self.variable_usages(op)).clone();
        for frag_name in self.reachable_fragments(&op.selection_set) {
            if let Some(frag) = self.fragment(frag_name) {
                let parent_type = self.schema.concrete_type_by_name(frag.item.type_condition.item).map(TypeType::Concrete);
                let mut frag_usages = Vec::new();
                collect_variable_usages_in_selection_set(self.schema, parent_type.as_ref(), &frag.item.selection_set, &mut frag_usages);
                out.extend(frag_usages);
            }
        }

        let rc = std::rc::Rc::new(out);
        self.recursive_variable_usages.borrow_mut().insert(key, rc.clone());
        rc
    }

    /// The set of fragment names transitively reachable from
    /// `selection_set` via fragment spreads, computed with an explicit
    /// work-stack rather than recursion.
    pub fn reachable_fragments(&self, selection_set: &'a [Selection<'a>]) -> Vec<&'a str> {
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        let mut stack: Vec<&'a [Selection<'a>]> = vec![selection_set];

        while let Some(selections) = stack.pop() {
            for selection in selections {
                match *selection {
                    Selection::FragmentSpread(ref spread) => {
                        let name = spread.item.name.item;
                        if seen.insert(name) {
                            result.push(name);
                            if let Some(frag) = self.fragment(name) {
                                stack.push(&frag.item.selection_set);
                            }
                        }
                    }
                    Selection::InlineFragment(ref inline) => {
                        stack.push(&inline.item.selection_set);
                    }
                    Selection::Field(ref field) => {
                        if let Some(ref sub) = field.item.selection_set {
                            stack.push(sub);
                        }
                    }
                }
            }
        }

        result
    }
}

fn root_type_for<'a>(schema: &'a SchemaType<'a>, op_type: crate::ast::OperationType) -> Option<TypeType<'a>> {
    use crate::ast::OperationType::*;
    match op_type {
        Query => Some(TypeType::Concrete(schema.concrete_query_type())),
        Mutation => schema.concrete_mutation_type().map(TypeType::Concrete),
        Subscription => schema.concrete_subscription_type().map(TypeType::Concrete),
    }
}

fn collect_variable_usages_in_selection_set<'a>(
    schema: &'a SchemaType<'a>,
    parent_type: Option<&TypeType<'a>>,
    selection_set: &'a [Selection<'a>],
    out: &mut Vec<VariableUsage<'a>>,
) {
    let parent_meta = parent_type.map(|t| t.get_named());

    for selection in selection_set {
        match *selection {
            Selection::Field(ref field) => {
                let field_def = parent_meta.and_then(|m| m.field_by_name(field.item.name.item));
                collect_variable_usages_in_directives(schema, field.item.directives.as_deref(), out);
                if let Some(args) = field.item.arguments.as_ref() {
                    collect_variable_usages_in_arguments(schema, field_def.map(|f| &f.arguments[..]), &args.item, out);
                }
                if let Some(ref sub) = field.item.selection_set {
                    let next_parent = field_def.and_then(|f| schema.make_type(&f.field_type));
                    collect_variable_usages_in_selection_set(schema, next_parent.as_ref(), sub, out);
                }
            }
            Selection::InlineFragment(ref inline) => {
                collect_variable_usages_in_directives(schema, inline.item.directives.as_deref(), out);
                let next_parent = inline
                    .item
                    .type_condition
                    .as_ref()
                    .and_then(|t| schema.concrete_type_by_name(t.item))
                    .map(TypeType::Concrete)
                    .or_else(|| parent_type.cloned());
                collect_variable_usages_in_selection_set(schema, next_parent.as_ref(), &inline.item.selection_set, out);
            }
            Selection::FragmentSpread(ref spread) => {
                collect_variable_usages_in_directives(schema, spread.item.directives.as_deref(), out);
            }
        }
    }
}

fn collect_variable_usages_in_directives<'a>(
    schema: &'a SchemaType<'a>,
    directives: Option<&'a [Spanning<crate::ast::Directive<'a>>]>,
    out: &mut Vec<VariableUsage<'a>>,
) {
    let Some(directives) = directives else { return };
    for directive in directives {
        let arg_defs = schema.directive_by_name(directive.item.name.item).map(|d| &d.arguments[..]);
        if let Some(args) = directive.item.arguments.as_ref() {
            collect_variable_usages_in_arguments(schema, arg_defs, &args.item, out);
        }
    }
}

fn collect_variable_usages_in_arguments<'a>(
    schema: &'a SchemaType<'a>,
    arg_defs: Option<&'a [Argument]>,
    arguments: &'a [(Spanning<&'a str>, Spanning<InputValue<'a>>)],
    out: &mut Vec<VariableUsage<'a>>,
) {
    for &(ref name, ref value) in arguments {
        let expected = arg_defs.and_then(|defs| defs.iter().find(|d| d.name == name.item)).and_then(|d| schema.make_type(&d.arg_type));
        collect_variable_usages_in_value(schema, value, expected, out);
    }
}

fn collect_variable_usages_in_value<'a>(
    schema: &'a SchemaType<'a>,
    value: &'a Spanning<InputValue<'a>>,
    expected: Option<TypeType<'a>>,
    out: &mut Vec<VariableUsage<'a>>,
) {
    match value.item {
        InputValue::Variable(name) => out.push(VariableUsage { name, location: value.start().clone(), expected_type: expected }),
        InputValue::List(ref items) => {
            let elem_type = expected.as_ref().and_then(|t| t.list_contents()).cloned();
            for item in items {
                collect_variable_usages_in_value(schema, item, elem_type.clone(), out);
            }
        }
        InputValue::Object(ref fields) => {
            let obj_meta = expected.as_ref().map(|t| t.get_named());
            for &(ref key, ref v) in fields {
                let field_type = obj_meta.and_then(|m| m.input_field_by_name(key.item)).and_then(|a| schema.make_type(&a.arg_type));
                collect_variable_usages_in_value(schema, v, field_type, out);
            }
        }
        _ => {}
    }
}

impl<'a> fmt::Debug for ValidationContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ValidationContext").field("errors", &self.errors).finish()
    }
}

pub(crate) fn type_name<'a>(t: Option<&'a Type<'a>>) -> &'a str {
    t.map(|t| t.innermost_name()).unwrap_or("")
}

pub(crate) fn named_or_empty<'a>(name: Option<&'a Spanning<&'a str>>) -> &'a str {
    name.map(|n| n.item).unwrap_or("")
}
