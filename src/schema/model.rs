//! The read-only schema facade the validator consumes.

use std::fmt;

use indexmap::IndexMap;

use crate::ast::Type;
use crate::schema::meta::{Argument, InterfaceMeta, MetaType, ObjectMeta, UnionMeta};

/// A fully resolved schema: named types, root operation types, and directives.
///
/// Construction (deriving this from live Rust types) is the executor's
/// concern; this type is a plain, directly constructible description.
///
/// Types and directives are kept in an [`IndexMap`] rather than a
/// `HashMap` so that [`concrete_type_list`](SchemaType::concrete_type_list)
/// and [`directive_list`](SchemaType::directive_list) enumerate in
/// definition order, not hash order.
pub struct SchemaType<'a> {
    types: IndexMap<&'a str, MetaType>,
    query_type_name: &'a str,
    mutation_type_name: Option<&'a str>,
    subscription_type_name: Option<&'a str>,
    directives: IndexMap<&'a str, DirectiveType>,
}

/// A resolved type reference: a named type, or that type wrapped in `List`
/// and/or `NonNull`. The AST-literal counterpart of this is [`crate::ast::Type`].
#[derive(Clone)]
pub enum TypeType<'a> {
    Concrete(&'a MetaType),
    NonNull(Box<TypeType<'a>>),
    List(Box<TypeType<'a>>),
}

/// Metadata for a directive definition (`@skip`, `@include`, or a schema extension).
pub struct DirectiveType {
    pub name: String,
    pub description: Option<String>,
    pub on_operation: bool,
    pub on_field: bool,
    pub on_fragment: bool,
    pub arguments: Vec<Argument>,
}

impl<'a> SchemaType<'a> {
    /// Builds a schema from its named types and root type names. Seeds the
    /// two built-in directives, `@skip` and `@include`, each taking a single
    /// required `Boolean` argument named `if` and usable on fields, fragment
    /// spreads, and inline fragments.
    pub fn new(
        types: IndexMap<&'a str, MetaType>,
        query_type_name: &'a str,
        mutation_type_name: Option<&'a str>,
        subscription_type_name: Option<&'a str>,
    ) -> SchemaType<'a> {
        let mut directives = IndexMap::new();
        directives.insert("skip", DirectiveType::new_skip());
        directives.insert("include", DirectiveType::new_include());

        SchemaType { types, query_type_name, mutation_type_name, subscription_type_name, directives }
    }

    pub fn add_directive(&mut self, directive: DirectiveType) {
        self.directives.insert(Box::leak(directive.name.clone().into_boxed_str()), directive);
    }

    pub fn concrete_type_by_name(&'a self, name: &str) -> Option<&'a MetaType> {
        self.types.get(name)
    }

    pub fn concrete_query_type(&'a self) -> &'a MetaType {
        self.types.get(self.query_type_name).expect("query type does not exist in schema")
    }

    pub fn concrete_mutation_type(&'a self) -> Option<&'a MetaType> {
        self.mutation_type_name.map(|name| {
            self.concrete_type_by_name(name).expect("mutation type does not exist in schema")
        })
    }

    pub fn concrete_subscription_type(&'a self) -> Option<&'a MetaType> {
        self.subscription_type_name.map(|name| {
            self.concrete_type_by_name(name).expect("subscription type does not exist in schema")
        })
    }

    pub fn concrete_type_list(&self) -> Vec<&MetaType> {
        self.types.values().collect()
    }

    /// Resolves an AST type literal (e.g. from a variable definition) into a
    /// [`TypeType`]. Returns `None` if the innermost named type is not in
    /// the schema — callers (the `KnownTypeNames` rule, in particular) are
    /// expected to have already reported that.
    pub fn make_type(&'a self, t: &Type) -> Option<TypeType<'a>> {
        match *t {
            Type::NonNullNamed(n) => self.concrete_type_by_name(n).map(|mt| TypeType::NonNull(Box::new(TypeType::Concrete(mt)))),
            Type::NonNullList(ref inner) => self.make_type(inner).map(|t| TypeType::NonNull(Box::new(TypeType::List(Box::new(t))))),
            Type::Named(n) => self.concrete_type_by_name(n).map(TypeType::Concrete),
            Type::List(ref inner) => self.make_type(inner).map(|t| TypeType::List(Box::new(t))),
        }
    }

    pub fn directive_list(&self) -> Vec<&DirectiveType> {
        self.directives.values().collect()
    }

    pub fn directive_by_name(&'a self, name: &str) -> Option<&'a DirectiveType> {
        self.directives.get(name)
    }

    /// Whether `t1` and `t2` can ever describe the same concrete object.
    /// Two concrete objects overlap iff identical by name; a concrete
    /// object overlaps an abstract type iff it is one of its possible
    /// types; two abstract types overlap iff their possible-type sets
    /// intersect.
    pub fn type_overlap(&self, t1: &MetaType, t2: &MetaType) -> bool {
        if t1.name() == t2.name() {
            return true;
        }

        match (t1.is_abstract(), t2.is_abstract()) {
            (true, true) => self.possible_types(t1).iter().any(|t| self.is_possible_type(t2, t)),
            (true, false) => self.is_possible_type(t1, t2),
            (false, true) => self.is_possible_type(t2, t1),
            (false, false) => false,
        }
    }

    /// The concrete object types a Union or Interface can resolve to.
    ///
    /// # Panics
    /// Panics if `t` is not abstract.
    pub fn possible_types(&self, t: &MetaType) -> Vec<&MetaType> {
        match *t {
            MetaType::Union(UnionMeta { ref of_type_names, .. }) => {
                of_type_names.iter().filter_map(|n| self.concrete_type_by_name(n)).collect()
            }
            MetaType::Interface(InterfaceMeta { ref name, .. }) => self
                .concrete_type_list()
                .into_iter()
                .filter(|t| match **t {
                    MetaType::Object(ObjectMeta { ref interface_names, .. }) => {
                        interface_names.iter().any(|iname| iname == name)
                    }
                    _ => false,
                })
                .collect(),
            _ => panic!("can't retrieve possible types from non-abstract meta type {}", t.name()),
        }
    }

    pub fn is_possible_type(&self, abstract_type: &MetaType, possible_type: &MetaType) -> bool {
        self.possible_types(abstract_type).into_iter().any(|t| t.name() == possible_type.name())
    }

    /// Structural sub-typing over AST type literals, used for variable
    /// position checks. `sub_type` is a sub-type of `super_type` if they are
    /// equal, a non-null wrapper is a sub-type of its nullable counterpart,
    /// and (for named types) `sub_type` is a possible type of an abstract
    /// `super_type`.
    pub fn is_subtype(&self, sub_type: &Type, super_type: &Type) -> bool {
        use crate::ast::Type::*;

        if super_type == sub_type {
            return true;
        }

        match (super_type, sub_type) {
            (&NonNullNamed(super_name), &NonNullNamed(sub_name))
            | (&Named(super_name), &Named(sub_name))
            | (&Named(super_name), &NonNullNamed(sub_name)) => self.is_named_subtype(sub_name, super_name),
            (&NonNullList(ref super_inner), &NonNullList(ref sub_inner))
            | (&List(ref super_inner), &List(ref sub_inner))
            | (&List(ref super_inner), &NonNullList(ref sub_inner)) => self.is_subtype(sub_inner, super_inner),
            _ => false,
        }
    }

    pub fn is_named_subtype(&self, sub_type_name: &str, super_type_name: &str) -> bool {
        if sub_type_name == super_type_name {
            true
        } else if let (Some(sub_type), Some(super_type)) =
            (self.concrete_type_by_name(sub_type_name), self.concrete_type_by_name(super_type_name))
        {
            super_type.is_abstract() && self.is_possible_type(super_type, sub_type)
        } else {
            false
        }
    }
}

impl<'a> TypeType<'a> {
    pub fn to_concrete(&self) -> Option<&'a MetaType> {
        match *self {
            TypeType::Concrete(t) => Some(t),
            _ => None,
        }
    }

    /// Strips `List`/`NonNull` wrappers to reach the underlying named type.
    pub fn get_named(&self) -> &'a MetaType {
        match *self {
            TypeType::Concrete(t) => t,
            TypeType::NonNull(ref inner) | TypeType::List(ref inner) => inner.get_named(),
        }
    }

    pub fn list_contents(&self) -> Option<&TypeType<'a>> {
        match *self {
            TypeType::List(ref inner) => Some(inner),
            TypeType::NonNull(ref inner) => inner.list_contents(),
            TypeType::Concrete(_) => None,
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(*self, TypeType::NonNull(_))
    }

    pub fn nullable(self) -> TypeType<'a> {
        match self {
            TypeType::NonNull(inner) => *inner,
            t => t,
        }
    }

    /// Reconstructs the AST type literal this resolved type was built from,
    /// for comparison against a variable's declared `Type` via `is_subtype`.
    pub fn to_ast(&self) -> Type<'a> {
        match *self {
            TypeType::Concrete(t) => Type::Named(t.name()),
            TypeType::List(ref inner) => Type::List(Box::new(inner.to_ast())),
            TypeType::NonNull(ref inner) => match inner.to_ast() {
                Type::Named(n) => Type::NonNullNamed(n),
                Type::List(b) => Type::NonNullList(b),
                already_non_null => already_non_null,
            },
        }
    }
}

impl DirectiveType {
    pub fn new(name: &str, on_operation: bool, on_field: bool, on_fragment: bool, arguments: &[Argument]) -> DirectiveType {
        DirectiveType {
            name: name.to_owned(),
            description: None,
            on_operation,
            on_field,
            on_fragment,
            arguments: arguments.to_vec(),
        }
    }

    fn new_skip() -> DirectiveType {
        DirectiveType::new("skip", false, true, true, &[Argument::new("if", Type::NonNullNamed("Boolean"))])
    }

    fn new_include() -> DirectiveType {
        DirectiveType::new("include", false, true, true, &[Argument::new("if", Type::NonNullNamed("Boolean"))])
    }

    pub fn description(mut self, description: &str) -> DirectiveType {
        self.description = Some(description.to_owned());
        self
    }
}

impl<'a> fmt::Display for TypeType<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TypeType::Concrete(t) => f.write_str(t.name()),
            TypeType::List(ref i) => write!(f, "[{}]", i),
            TypeType::NonNull(ref i) => write!(f, "{}!", i),
        }
    }
}
