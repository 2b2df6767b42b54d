//! The query document AST consumed by the validator.
//!
//! Construction of these types (i.e. parsing) is out of scope for this
//! crate; callers hand the validator an already-parsed [`Document`]. The
//! [`crate::test_support`] module builds documents by hand for the rule
//! test suites.

use std::fmt;

use crate::span::{SourcePosition, Spanning};

/// A named type, possibly wrapped in `List` and/or `NonNull`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type<'a> {
    Named(&'a str),
    List(Box<Type<'a>>),
    NonNullNamed(&'a str),
    NonNullList(Box<Type<'a>>),
}

impl<'a> Type<'a> {
    /// The name of the innermost named type, stripping all wrappers.
    pub fn innermost_name(&self) -> &'a str {
        match *self {
            Type::Named(n) | Type::NonNullNamed(n) => n,
            Type::List(ref inner) | Type::NonNullList(ref inner) => inner.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(*self, Type::NonNullNamed(_) | Type::NonNullList(_))
    }
}

impl<'a> fmt::Display for Type<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Type::Named(n) => write!(f, "{}", n),
            Type::NonNullNamed(n) => write!(f, "{}!", n),
            Type::List(ref i) => write!(f, "[{}]", i),
            Type::NonNullList(ref i) => write!(f, "[{}]!", i),
        }
    }
}

/// A literal value as written in a query document — distinct from a runtime
/// coerced value, which belongs to the executor.
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue<'a> {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    Variable(&'a str),
    List(Vec<Spanning<InputValue<'a>>>),
    Object(Vec<(Spanning<&'a str>, Spanning<InputValue<'a>>)>),
}

impl<'a> InputValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(*self, InputValue::Null)
    }

    pub fn is_variable(&self) -> bool {
        matches!(*self, InputValue::Variable(_))
    }

    pub fn as_list(&self) -> Option<&[Spanning<InputValue<'a>>]> {
        match *self {
            InputValue::List(ref l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(Spanning<&'a str>, Spanning<InputValue<'a>>)]> {
        match *self {
            InputValue::Object(ref o) => Some(o),
            _ => None,
        }
    }

    pub fn as_enum_or_string(&self) -> Option<&str> {
        match *self {
            InputValue::Enum(ref s) | InputValue::String(ref s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> fmt::Display for InputValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InputValue::Null => write!(f, "null"),
            InputValue::Int(i) => write!(f, "{}", i),
            InputValue::Float(n) => write!(f, "{}", n),
            InputValue::String(ref s) => write!(f, "{:?}", s),
            InputValue::Boolean(b) => write!(f, "{}", b),
            InputValue::Enum(ref s) => write!(f, "{}", s),
            InputValue::Variable(v) => write!(f, "${}", v),
            InputValue::List(ref l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v.item)?;
                }
                write!(f, "]")
            }
            InputValue::Object(ref o) => {
                write!(f, "{{")?;
                for (i, &(ref k, ref v)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k.item, v.item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition<'a> {
    pub var_type: Spanning<Type<'a>>,
    pub default_value: Option<Spanning<InputValue<'a>>>,
}

pub type VariableDefinitions<'a> = Vec<(Spanning<&'a str>, VariableDefinition<'a>)>;

pub type Arguments<'a> = Vec<(Spanning<&'a str>, Spanning<InputValue<'a>>)>;

#[derive(Clone, Debug, PartialEq)]
pub struct Directive<'a> {
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field<'a> {
    pub alias: Option<Spanning<&'a str>>,
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Option<Vec<Selection<'a>>>,
}

impl<'a> Field<'a> {
    /// The response key: the alias if present, else the field name.
    pub fn response_name(&self) -> &'a str {
        self.alias.as_ref().unwrap_or(&self.name).item
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread<'a> {
    pub name: Spanning<&'a str>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<Spanning<&'a str>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'a> {
    Field(Spanning<Field<'a>>),
    FragmentSpread(Spanning<FragmentSpread<'a>>),
    InlineFragment(Spanning<InlineFragment<'a>>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Operation<'a> {
    pub operation_type: OperationType,
    pub name: Option<Spanning<&'a str>>,
    pub variable_definitions: Option<Spanning<VariableDefinitions<'a>>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fragment<'a> {
    pub name: Spanning<&'a str>,
    pub type_condition: Spanning<&'a str>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition<'a> {
    Operation(Spanning<Operation<'a>>),
    Fragment(Spanning<Fragment<'a>>),
}

impl<'a> Definition<'a> {
    pub fn start(&self) -> &SourcePosition {
        match *self {
            Definition::Operation(ref s) => s.start(),
            Definition::Fragment(ref s) => s.start(),
        }
    }
}

pub type Document<'a> = Vec<Definition<'a>>;

/// Walks `doc`'s fragment definitions into a name-keyed index. Used once at
/// `ValidationContext` construction time; the index itself is never mutated
/// afterwards.
pub fn fragment_index<'a, 'd>(doc: &'d Document<'a>) -> Vec<(&'a str, &'d Spanning<Fragment<'a>>)> {
    doc.iter()
        .filter_map(|def| match *def {
            Definition::Fragment(ref f) => Some((f.item.name.item, f)),
            _ => None,
        })
        .collect()
}
