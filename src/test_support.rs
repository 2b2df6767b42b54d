//! The canonical reference schema and AST builder helpers shared by the
//! rule test suites. Not part of the public API surface.

use indexmap::IndexMap;

use crate::ast::{
    Definition, Directive, Field, Fragment, FragmentSpread, InlineFragment, InputValue, Operation, OperationType, Selection, Type,
    VariableDefinition,
};
use crate::schema::meta::{Argument, EnumMeta, EnumValue, Field as MetaField, InputObjectMeta, InterfaceMeta, MetaType, ObjectMeta, ScalarMeta, UnionMeta};
use crate::schema::model::SchemaType;
use crate::span::Spanning;
use crate::traversal::{walk_document, walk_document_expanding_fragments, MultiVisitor, Visitor};
use crate::validation::context::{RuleError, ValidationContext};

fn scalar(name: &'static str, check: fn(&InputValue) -> bool) -> MetaType {
    ScalarMeta::new(name, Box::new(check)).into_meta()
}

fn is_int(v: &InputValue) -> bool {
    matches!(*v, InputValue::Int(_))
}
fn is_float(v: &InputValue) -> bool {
    matches!(*v, InputValue::Int(_) | InputValue::Float(_))
}
fn is_string(v: &InputValue) -> bool {
    matches!(*v, InputValue::String(_))
}
fn is_boolean(v: &InputValue) -> bool {
    matches!(*v, InputValue::Boolean(_))
}
fn is_id(v: &InputValue) -> bool {
    matches!(*v, InputValue::String(_) | InputValue::Int(_))
}

/// Builds the Being/Pet/Dog/Cat/Human/... schema used throughout the rule
/// test suites, modeled on the "star wars"-adjacent fixture GraphQL's own
/// validation test suites use.
pub fn build_schema() -> SchemaType<'static> {
    let mut types: IndexMap<&'static str, MetaType> = IndexMap::new();

    types.insert("String", scalar("String", is_string));
    types.insert("Int", scalar("Int", is_int));
    types.insert("Float", scalar("Float", is_float));
    types.insert("Boolean", scalar("Boolean", is_boolean));
    types.insert("ID", scalar("ID", is_id));

    types.insert(
        "DogCommand",
        EnumMeta::new("DogCommand", &[EnumValue::new("SIT"), EnumValue::new("HEEL"), EnumValue::new("DOWN")]).into_meta(),
    );
    types.insert(
        "FurColor",
        EnumMeta::new("FurColor", &[EnumValue::new("BROWN"), EnumValue::new("BLACK"), EnumValue::new("TAN"), EnumValue::new("SPOTTED")])
            .into_meta(),
    );

    let name_field = || MetaField::new("name", Type::Named("String")).argument(Argument::new("surname", Type::Named("Boolean")));

    types.insert("Being", InterfaceMeta::new("Being", &[name_field()]).into_meta());
    types.insert("Pet", InterfaceMeta::new("Pet", &[name_field()]).into_meta());
    types.insert("Canine", InterfaceMeta::new("Canine", &[name_field()]).into_meta());
    types.insert("Intelligent", InterfaceMeta::new("Intelligent", &[MetaField::new("iq", Type::Named("Int"))]).into_meta());

    types.insert(
        "Dog",
        ObjectMeta::new(
            "Dog",
            &[
                name_field(),
                MetaField::new("nickname", Type::Named("String")),
                MetaField::new("barkVolume", Type::Named("Int")),
                MetaField::new("barks", Type::Named("Boolean")),
                MetaField::new("doesKnowCommand", Type::Named("Boolean")).argument(Argument::new("dogCommand", Type::Named("DogCommand"))),
                MetaField::new("isHousetrained", Type::Named("Boolean"))
                    .argument(Argument::new("atOtherHomes", Type::Named("Boolean")).default_value(InputValue::Boolean(true))),
                MetaField::new("isAtLocation", Type::Named("Boolean"))
                    .argument(Argument::new("x", Type::Named("Int")))
                    .argument(Argument::new("y", Type::Named("Int"))),
            ],
        )
        .interfaces(&["Being", "Pet", "Canine"])
        .into_meta(),
    );

    types.insert(
        "Cat",
        ObjectMeta::new(
            "Cat",
            &[
                name_field(),
                MetaField::new("nickname", Type::Named("String")),
                MetaField::new("meows", Type::Named("Boolean")),
                MetaField::new("meowVolume", Type::Named("Int")),
                MetaField::new("furColor", Type::Named("FurColor")),
            ],
        )
        .interfaces(&["Being", "Pet"])
        .into_meta(),
    );

    types.insert("CatOrDog", UnionMeta::new("CatOrDog", &["Cat", "Dog"]).into_meta());
    types.insert("DogOrHuman", UnionMeta::new("DogOrHuman", &["Dog", "Human"]).into_meta());
    types.insert("HumanOrAlien", UnionMeta::new("HumanOrAlien", &["Human", "Alien"]).into_meta());

    types.insert(
        "Human",
        ObjectMeta::new(
            "Human",
            &[
                name_field(),
                MetaField::new("pets", Type::List(Box::new(Type::Named("Pet")))),
                MetaField::new("relatives", Type::List(Box::new(Type::Named("Human")))),
                MetaField::new("iq", Type::Named("Int")),
            ],
        )
        .interfaces(&["Being", "Intelligent"])
        .into_meta(),
    );

    types.insert(
        "Alien",
        ObjectMeta::new(
            "Alien",
            &[name_field(), MetaField::new("iq", Type::Named("Int")), MetaField::new("numEyes", Type::Named("Int"))],
        )
        .interfaces(&["Being", "Intelligent"])
        .into_meta(),
    );

    types.insert(
        "ComplexInput",
        InputObjectMeta::new(
            "ComplexInput",
            &[
                Argument::new("requiredField", Type::NonNullNamed("Boolean")),
                Argument::new("intField", Type::Named("Int")),
                Argument::new("stringField", Type::Named("String")),
                Argument::new("booleanField", Type::Named("Boolean")),
                Argument::new("stringListField", Type::List(Box::new(Type::Named("String")))),
            ],
        )
        .into_meta(),
    );

    types.insert(
        "ComplicatedArgs",
        ObjectMeta::new(
            "ComplicatedArgs",
            &[
                MetaField::new("intArgField", Type::Named("String")).argument(Argument::new("intArg", Type::Named("Int"))),
                MetaField::new("nonNullIntArgField", Type::Named("String")).argument(Argument::new("nonNullIntArg", Type::NonNullNamed("Int"))),
                MetaField::new("stringArgField", Type::Named("String")).argument(Argument::new("stringArg", Type::Named("String"))),
                MetaField::new("booleanArgField", Type::Named("String")).argument(Argument::new("booleanArg", Type::Named("Boolean"))),
                MetaField::new("enumArgField", Type::Named("String")).argument(Argument::new("enumArg", Type::Named("FurColor"))),
                MetaField::new("floatArgField", Type::Named("String")).argument(Argument::new("floatArg", Type::Named("Float"))),
                MetaField::new("idArgField", Type::Named("String")).argument(Argument::new("idArg", Type::Named("ID"))),
                MetaField::new("stringListArgField", Type::Named("String"))
                    .argument(Argument::new("stringListArg", Type::List(Box::new(Type::Named("String"))))),
                MetaField::new("complexArgField", Type::Named("String")).argument(Argument::new("complexArg", Type::Named("ComplexInput"))),
                MetaField::new("multipleReqs", Type::Named("String"))
                    .argument(Argument::new("req1", Type::NonNullNamed("Int")))
                    .argument(Argument::new("req2", Type::NonNullNamed("Int"))),
            ],
        )
        .into_meta(),
    );

    types.insert(
        "QueryRoot",
        ObjectMeta::new(
            "QueryRoot",
            &[
                MetaField::new("human", Type::Named("Human")).argument(Argument::new("id", Type::Named("ID"))),
                MetaField::new("alien", Type::Named("Alien")),
                MetaField::new("dog", Type::Named("Dog")).argument(Argument::new("age", Type::Named("Int"))),
                MetaField::new("cat", Type::Named("Cat")),
                MetaField::new("pet", Type::Named("Pet")),
                MetaField::new("catOrDog", Type::Named("CatOrDog")),
                MetaField::new("dogOrHuman", Type::Named("DogOrHuman")),
                MetaField::new("humanOrAlien", Type::Named("HumanOrAlien")),
                MetaField::new("complicatedArgs", Type::Named("ComplicatedArgs")),
            ],
        )
        .into_meta(),
    );

    SchemaType::new(types, "QueryRoot", None, None)
}

// --- AST builders ------------------------------------------------------

fn spanning<T>(item: T) -> Spanning<T> {
    Spanning::unlocated(item)
}

pub fn doc(defs: Vec<Definition<'static>>) -> Vec<Definition<'static>> {
    defs
}

pub fn query(name: Option<&'static str>, selections: Vec<Selection<'static>>) -> Definition<'static> {
    operation(OperationType::Query, name, vec![], selections)
}

pub fn operation(
    operation_type: OperationType,
    name: Option<&'static str>,
    variable_definitions: Vec<(&'static str, VariableDefinition<'static>)>,
    selections: Vec<Selection<'static>>,
) -> Definition<'static> {
    operation_with_directives(operation_type, name, variable_definitions, vec![], selections)
}

pub fn operation_with_directives(
    operation_type: OperationType,
    name: Option<&'static str>,
    variable_definitions: Vec<(&'static str, VariableDefinition<'static>)>,
    directives: Vec<Spanning<Directive<'static>>>,
    selections: Vec<Selection<'static>>,
) -> Definition<'static> {
    let variable_definitions =
        if variable_definitions.is_empty() { None } else { Some(spanning(variable_definitions.into_iter().map(|(n, d)| (spanning(n), d)).collect())) };

    Definition::Operation(spanning(Operation {
        operation_type,
        name: name.map(spanning),
        variable_definitions,
        directives: if directives.is_empty() { None } else { Some(directives) },
        selection_set: selections,
    }))
}

pub fn var_def(var_type: Type<'static>, default_value: Option<InputValue<'static>>) -> VariableDefinition<'static> {
    VariableDefinition { var_type: spanning(var_type), default_value: default_value.map(spanning) }
}

pub fn fragment(name: &'static str, type_condition: &'static str, selections: Vec<Selection<'static>>) -> Definition<'static> {
    fragment_with_directives(name, type_condition, vec![], selections)
}

pub fn fragment_with_directives(
    name: &'static str,
    type_condition: &'static str,
    directives: Vec<Spanning<Directive<'static>>>,
    selections: Vec<Selection<'static>>,
) -> Definition<'static> {
    Definition::Fragment(spanning(Fragment {
        name: spanning(name),
        type_condition: spanning(type_condition),
        directives: if directives.is_empty() { None } else { Some(directives) },
        selection_set: selections,
    }))
}

pub fn field(name: &'static str, selections: Vec<Selection<'static>>) -> Selection<'static> {
    field_with_args(name, vec![], selections)
}

pub fn aliased_field(alias: &'static str, name: &'static str, selections: Vec<Selection<'static>>) -> Selection<'static> {
    Selection::Field(spanning(Field {
        alias: Some(spanning(alias)),
        name: spanning(name),
        arguments: None,
        directives: None,
        selection_set: if selections.is_empty() { None } else { Some(selections) },
    }))
}

pub fn field_with_args(name: &'static str, arguments: Vec<(&'static str, InputValue<'static>)>, selections: Vec<Selection<'static>>) -> Selection<'static> {
    field_full(name, None, arguments, vec![], selections)
}

pub fn field_with_directives(name: &'static str, directives: Vec<Spanning<Directive<'static>>>, selections: Vec<Selection<'static>>) -> Selection<'static> {
    field_full(name, None, vec![], directives, selections)
}

pub fn field_full(
    name: &'static str,
    alias: Option<&'static str>,
    arguments: Vec<(&'static str, InputValue<'static>)>,
    directives: Vec<Spanning<Directive<'static>>>,
    selections: Vec<Selection<'static>>,
) -> Selection<'static> {
    let arguments = if arguments.is_empty() { None } else { Some(spanning(arguments.into_iter().map(|(n, v)| (spanning(n), spanning(v))).collect())) };

    Selection::Field(spanning(Field {
        alias: alias.map(spanning),
        name: spanning(name),
        arguments,
        directives: if directives.is_empty() { None } else { Some(directives) },
        selection_set: if selections.is_empty() { None } else { Some(selections) },
    }))
}

pub fn spread(name: &'static str) -> Selection<'static> {
    spread_with_directives(name, vec![])
}

pub fn spread_with_directives(name: &'static str, directives: Vec<Spanning<Directive<'static>>>) -> Selection<'static> {
    Selection::FragmentSpread(spanning(FragmentSpread { name: spanning(name), directives: if directives.is_empty() { None } else { Some(directives) } }))
}

pub fn inline_fragment(type_condition: Option<&'static str>, selections: Vec<Selection<'static>>) -> Selection<'static> {
    inline_fragment_with_directives(type_condition, vec![], selections)
}

pub fn inline_fragment_with_directives(
    type_condition: Option<&'static str>,
    directives: Vec<Spanning<Directive<'static>>>,
    selections: Vec<Selection<'static>>,
) -> Selection<'static> {
    Selection::InlineFragment(spanning(InlineFragment {
        type_condition: type_condition.map(spanning),
        directives: if directives.is_empty() { None } else { Some(directives) },
        selection_set: selections,
    }))
}

pub fn object_value(fields: Vec<(&'static str, InputValue<'static>)>) -> InputValue<'static> {
    InputValue::Object(fields.into_iter().map(|(n, v)| (spanning(n), spanning(v))).collect())
}

pub fn directive(name: &'static str, arguments: Vec<(&'static str, InputValue<'static>)>) -> Spanning<Directive<'static>> {
    let arguments = if arguments.is_empty() { None } else { Some(spanning(arguments.into_iter().map(|(n, v)| (spanning(n), spanning(v))).collect())) };
    spanning(Directive { name: spanning(name), arguments })
}

// --- rule test harness --------------------------------------------------

/// Runs a single rule's visitor (plus the fragment-expansion pass, if it
/// wants one) over `document` against the canonical schema and returns the
/// errors it reported.
pub fn run_rule<'a, F, V>(document: &'a Vec<Definition<'a>>, schema: &'a SchemaType<'a>, factory: F) -> Vec<RuleError>
where
    F: Fn() -> V,
    V: Visitor<'a> + 'a,
{
    let mut ctx = ValidationContext::new(schema, document);
    let wants_expansion = factory().wants_fragment_expansion();

    let mut visitor = factory();
    walk_document(&mut visitor, &mut ctx, document);
    if wants_expansion {
        let mut visitor = factory();
        walk_document_expanding_fragments(&mut visitor, &mut ctx, document);
    }

    assert!(ctx.stacks_balanced(), "type-info stack left unbalanced after validation");
    ctx.into_errors()
}

pub fn expect_passes_rule<'a, F, V>(document: &'a Vec<Definition<'a>>, schema: &'a SchemaType<'a>, factory: F)
where
    F: Fn() -> V,
    V: Visitor<'a> + 'a,
{
    let errors = run_rule(document, schema, factory);
    assert!(errors.is_empty(), "expected no errors, got: {:?}", errors);
}

pub fn expect_fails_rule<'a, F, V>(document: &'a Vec<Definition<'a>>, schema: &'a SchemaType<'a>, factory: F, expected_messages: &[&str])
where
    F: Fn() -> V,
    V: Visitor<'a> + 'a,
{
    let errors = run_rule(document, schema, factory);
    let messages: Vec<&str> = errors.iter().map(RuleError::message).collect();
    assert_eq!(messages, expected_messages);
}

/// Runs the full default rule set (mirrors [`crate::validate`]) and asserts
/// on the resulting messages; used by orchestrator-level tests.
pub fn run_all_rules<'a>(document: &'a Vec<Definition<'a>>, schema: &'a SchemaType<'a>) -> Vec<RuleError> {
    crate::validate(schema, document, None)
}

#[allow(dead_code)]
fn _multi_visitor_reexport_check(visitors: Vec<Box<dyn Visitor<'static> + 'static>>) -> MultiVisitor<'static, 'static> {
    MultiVisitor::new(visitors)
}
