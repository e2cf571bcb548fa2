#![allow(non_snake_case)]

use super::*;

fn schema() -> Schema {
    Schema::from_yaml_str(
        r#"
name: Resolver fixtures
version: "1"
objects:
  Point:
    fields:
      x:
        type: int
  Tree:
    fields:
      children:
        type: "[Tree]"
  m.room.message:
    fields:
      body:
        type: string
"#,
    )
    .unwrap()
}

// Resolution

#[test]
fn resolve___nested_list___builds_two_list_levels() {
    let ty = resolve("[[string]]", &schema()).unwrap();

    assert_eq!(
        ty,
        TypeDescriptor::List(Box::new(TypeDescriptor::List(Box::new(
            TypeDescriptor::String
        ))))
    );
}

#[test]
fn resolve___braces___builds_map() {
    let ty = resolve("{int}", &schema()).unwrap();

    assert_eq!(ty, TypeDescriptor::Map(Box::new(TypeDescriptor::Int)));
}

#[test]
fn resolve___record_name___builds_record_ref() {
    let ty = resolve("m.room.message", &schema()).unwrap();

    assert_eq!(ty, TypeDescriptor::RecordRef("m.room.message".to_string()));
}

#[test]
fn resolve___enum_token___builds_enum() {
    let ty = resolve("Enums.Membership", &schema()).unwrap();

    assert_eq!(ty, TypeDescriptor::Enum("Membership".to_string()));
}

#[test]
fn resolve___lowercase_enum_name___returns_unresolved_reference() {
    let err = resolve("Enums.membership", &schema()).unwrap_err();

    assert_eq!(
        err,
        GenError::UnresolvedReference("Enums.membership".to_string())
    );
}

#[test]
fn resolve___unknown_token___returns_unknown_type() {
    let err = resolve("Foo", &schema()).unwrap_err();

    assert_eq!(err, GenError::UnknownType("Foo".to_string()));
}

#[test]
fn resolve___unknown_inside_list___reports_inner_token() {
    let err = resolve("[[bogus]]", &schema()).unwrap_err();

    assert_eq!(err, GenError::UnknownType("bogus".to_string()));
}

#[test]
fn resolve___surrounding_whitespace___is_trimmed() {
    let ty = resolve("  [ int ] ", &schema()).unwrap();

    assert_eq!(ty, TypeDescriptor::List(Box::new(TypeDescriptor::Int)));
}

#[test]
fn Schema___record_named_like_primitive___is_rejected() {
    let schema = Schema::from_yaml_str(
        "name: n\nversion: '1'\nobjects:\n  string:\n    fields: {}\n",
    );

    assert!(matches!(schema, Err(GenError::SchemaStructure(_))));
}

// Renderings

#[test]
fn TypeDescriptor___list_of_map___wraps_inner_renderings() {
    let ty = resolve("[{float}]", &schema()).unwrap();

    assert_eq!(ty.type_name(), "List (Dict String Float)");
    assert_eq!(ty.encoder(), "E.list (E.dict identity E.float)");
    assert_eq!(ty.decoder(&schema()).unwrap(), "D.list (D.dict D.float)");
}

#[test]
fn TypeDescriptor___enum___renders_namespaced_helpers() {
    let ty = TypeDescriptor::Enum("RoomVisibility".to_string());

    assert_eq!(ty.type_name(), "Enums.RoomVisibility");
    assert_eq!(ty.encoder(), "Enums.encodeRoomVisibility");
    assert_eq!(ty.decoder(&schema()).unwrap(), "Enums.roomVisibilityDecoder");
}

#[test]
fn TypeDescriptor___record_ref___uses_display_name() {
    let ty = TypeDescriptor::RecordRef("m.room.message".to_string());

    assert_eq!(ty.type_name(), "MRoomMessage");
    assert_eq!(ty.encoder(), "encodeMRoomMessage");
    assert_eq!(ty.decoder(&schema()).unwrap(), "mRoomMessageDecoder");
}

#[test]
fn TypeDescriptor___self_referencing_record___decodes_lazily() {
    let ty = TypeDescriptor::List(Box::new(TypeDescriptor::RecordRef("Tree".to_string())));

    assert_eq!(
        ty.decoder(&schema()).unwrap(),
        "D.list (D.lazy (\\_ -> treeDecoder))"
    );
}

#[test]
fn TypeDescriptor___plain_record___never_decodes_lazily() {
    let ty = TypeDescriptor::RecordRef("Point".to_string());

    let decoder = ty.decoder(&schema()).unwrap();

    assert_eq!(decoder, "pointDecoder");
    assert!(!decoder.contains("D.lazy"));
}

#[test]
fn TypeDescriptor___missing_record___returns_unresolved_reference() {
    let ty = TypeDescriptor::RecordRef("Gone".to_string());

    let err = ty.decoder(&schema()).unwrap_err();

    assert_eq!(err, GenError::UnresolvedReference("Gone".to_string()));
}

#[test]
fn TypeDescriptor___record_usage___walks_children() {
    let ty = resolve("[{Enums.Membership}]", &schema()).unwrap();
    let mut usage = Usage::new();

    ty.record_usage(&mut usage);

    assert!(usage.dict);
    assert!(usage.enums);
    assert!(!usage.timestamp);
}

#[test]
fn TypeDescriptor___references_record___sees_through_containers() {
    let ty = resolve("{[Tree]}", &schema()).unwrap();

    assert!(ty.references_record("Tree"));
    assert!(!ty.references_record("Point"));
}

#[test]
fn wrap___only_parenthesizes_expressions_with_spaces() {
    assert_eq!(wrap("D.int"), "D.int");
    assert_eq!(wrap("D.list D.int"), "(D.list D.int)");
}
