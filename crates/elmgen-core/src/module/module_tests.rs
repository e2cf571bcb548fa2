#![allow(non_snake_case)]

use super::*;

const GENERATED_AT: i64 = 1_700_000_000;

fn emit(yaml: &str) -> String {
    let schema = Schema::from_yaml_str(yaml).unwrap();
    ModuleEmitter::default()
        .emit(&schema, "Internal.Api.Sync.V1.Objects", GENERATED_AT)
        .unwrap()
}

fn import_lines(code: &str) -> Vec<&str> {
    code.lines().filter(|l| l.starts_with("import ")).collect()
}

const PRIMITIVES_ONLY: &str = r#"
name: Primitives
version: 1.0.0
objects:
  Point:
    fields:
      x:
        type: int
        required: true
      y:
        type: float
        required: true
"#;

// Layout

#[test]
fn ModuleEmitter___emit___renders_full_module() {
    let code = emit(PRIMITIVES_ONLY);

    let expected = "\
module Internal.Api.Sync.V1.Objects exposing
    ( Point
    , encodePoint
    , pointDecoder
    )

{-| Automatically generated 'Primitives'

Schema version 1.0.0

Last generated at Unix time 1700000000

-}

import Internal.Tools.EncodeExtra exposing (maybeObject)
import Json.Decode as D
import Json.Encode as E


type alias Point =
    { x : Int
    , y : Float
    }


encodePoint : Point -> E.Value
encodePoint data =
    maybeObject
        [ ( \"x\", Just <| E.int data.x )
        , ( \"y\", Just <| E.float data.y )
        ]


pointDecoder : D.Decoder Point
pointDecoder =
    D.map2
        (\\a b ->
            { x = a, y = b }
        )
        (D.field \"x\" D.int)
        (D.field \"y\" D.float)
";
    assert_eq!(code, expected);
}

#[test]
fn ModuleEmitter___emit___sorts_records_case_insensitively() {
    let yaml = r#"
name: Sorting
version: "1"
objects:
  beta.Record:
    fields: {}
  Alpha:
    fields: {}
  Carrot:
    fields: {}
"#;

    let code = emit(yaml);

    let alpha = code.find("type alias Alpha").unwrap();
    let beta = code.find("type alias BetaRecord").unwrap();
    let carrot = code.find("type alias Carrot").unwrap();
    assert!(alpha < beta && beta < carrot);
}

#[test]
fn ModuleEmitter___emit___exposes_constructors_of_self_referencing_records() {
    let yaml = r#"
name: Recursive
version: "1"
objects:
  Tree:
    fields:
      children:
        type: "[Tree]"
"#;

    let code = emit(yaml);

    assert!(code.contains("    ( Tree(..)\n    , encodeTree\n    , treeDecoder\n    )\n"));
}

#[test]
fn ModuleEmitter___emit___rejects_invalid_module_name() {
    let schema = Schema::from_yaml_str(PRIMITIVES_ONLY).unwrap();

    let err = ModuleEmitter::default()
        .emit(&schema, "src/objects", GENERATED_AT)
        .unwrap_err();

    assert!(matches!(err, GenError::SchemaStructure(_)));
}

#[test]
fn Schema___unknown_field_type___fails_before_emission() {
    let yaml = "name: n\nversion: '1'\nobjects:\n  A:\n    fields:\n      x:\n        type: Missing\n";

    let err = Schema::from_yaml_str(yaml).unwrap_err();

    assert_eq!(err, GenError::UnknownType("Missing".to_string()));
}

// Import synthesis

#[test]
fn ModuleEmitter___primitive_only_module___imports_no_conditional_helper() {
    let code = emit(PRIMITIVES_ONLY);

    assert_eq!(
        import_lines(&code),
        vec![
            "import Internal.Tools.EncodeExtra exposing (maybeObject)",
            "import Json.Decode as D",
            "import Json.Encode as E",
        ]
    );
}

#[test]
fn ModuleEmitter___single_map_field___adds_exactly_dict_import() {
    let yaml = r#"
name: Maps
version: 1.0.0
objects:
  Point:
    fields:
      x:
        type: int
        required: true
      tags:
        type: "{string}"
        required: true
"#;

    let with_map = import_lines(&emit(yaml)).len();
    let without_map = import_lines(&emit(PRIMITIVES_ONLY)).len();
    let code = emit(yaml);

    assert_eq!(with_map, without_map + 1);
    assert_eq!(import_lines(&code)[0], "import Dict exposing (Dict)");
}

#[test]
fn ModuleEmitter___mixed_usage___imports_in_fixed_order() {
    let yaml = r#"
name: Mixed
version: "2"
objects:
  Event:
    fields:
      content:
        type: "{value}"
        required: true
      membership:
        type: Enums.Membership
      origin_server_ts:
        type: timestamp
        required: true
      unsigned:
        type: int
        default: 0
"#;

    let code = emit(yaml);

    assert_eq!(
        import_lines(&code),
        vec![
            "import Dict exposing (Dict)",
            "import Internal.Tools.DecodeExtra exposing (opField, opFieldWithDefault)",
            "import Internal.Tools.EncodeExtra exposing (maybeObject)",
            "import Internal.Tools.Timestamp exposing (Timestamp, encodeTimestamp, timestampDecoder)",
            "import Internal.Tools.SpecEnums as Enums",
            "import Json.Decode as D",
            "import Json.Encode as E",
        ]
    );
}

#[test]
fn ModuleEmitter___configured_modules___replace_defaults() {
    let imports = ImportModules {
        encode_extra: "Matrix.Json.Encode".to_string(),
        ..ImportModules::default()
    };
    let schema = Schema::from_yaml_str(PRIMITIVES_ONLY).unwrap();

    let code = generate_module(&schema, "Objects", &imports, GENERATED_AT).unwrap();

    assert!(code.contains("import Matrix.Json.Encode exposing (maybeObject)\n"));
}

// Arity

fn wide(field_count: usize) -> String {
    let mut yaml = String::from("name: Wide\nversion: '1'\nobjects:\n  Wide:\n    fields:\n");
    for i in 0..field_count {
        yaml.push_str(&format!("      f{i:02}:\n        type: int\n        required: true\n"));
    }
    emit(&yaml)
}

#[test]
fn ModuleEmitter___nine_fields___qualifies_decode_extra_import() {
    let code = wide(9);

    assert!(code.contains("import Internal.Tools.DecodeExtra as D\n"));
    assert!(code.contains("D.map9"));
}

#[test]
fn ModuleEmitter___eight_fields___uses_neither_qualified_import_nor_map9() {
    let code = wide(8);

    assert!(!code.contains("Internal.Tools.DecodeExtra"));
    assert!(!code.contains("D.map9"));
    assert!(code.contains("D.map8"));
}

#[test]
fn ModuleEmitter___import_block___combines_alias_and_exposing() {
    let usage = Usage {
        op_field: true,
        max_arity: 12,
        ..Usage::new()
    };

    let block = ModuleEmitter::default().import_block(&usage);

    assert!(block.contains("import Internal.Tools.DecodeExtra as D exposing (opField)\n"));
}

#[test]
fn ModuleEmitter___helpers_spread_over_records___are_all_imported() {
    let mut yaml = String::from("name: Spread\nversion: '1'\nobjects:\n  Alpha:\n    fields:\n");
    for i in 0..9 {
        yaml.push_str(&format!("      f{i}:\n        type: int\n        required: true\n"));
    }
    yaml.push_str("  Beta:\n    fields:\n      seen:\n        type: timestamp\n");
    yaml.push_str("  Gamma:\n    fields:\n      tags:\n        type: \"{string}\"\n        required: true\n");

    let code = emit(&yaml);
    let imports = import_lines(&code);

    assert!(imports.contains(&"import Dict exposing (Dict)"));
    assert!(imports.contains(&"import Internal.Tools.DecodeExtra as D exposing (opField)"));
    assert!(imports.contains(
        &"import Internal.Tools.Timestamp exposing (Timestamp, encodeTimestamp, timestampDecoder)"
    ));
}
