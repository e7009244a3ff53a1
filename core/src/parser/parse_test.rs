use crate::parser::{SchemaErrorKind, parse_field, parse_schema, parse_type};
use crate::types::manager::TypeManager;
use crate::types::{Type, Width};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

fn kind_of(source: &str) -> SchemaErrorKind {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);
    match parse_schema(mgr, source) {
        Ok(schema) => panic!("expected '{}' to fail, got {}", source, schema),
        Err(err) => err.kind,
    }
}

#[test]
fn test_primitives() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    let cases: &[(&str, &Type)] = &[
        ("bool", mgr.bool()),
        ("string", mgr.string()),
        ("u8", mgr.uint(Width::W8)),
        ("u16", mgr.uint(Width::W16)),
        ("u32", mgr.uint(Width::W32)),
        ("u64", mgr.uint(Width::W64)),
        ("i8", mgr.int(Width::W8)),
        ("i64", mgr.int(Width::W64)),
        ("f16", mgr.float16()),
        ("f32", mgr.float32()),
        ("f64", mgr.float64()),
    ];
    for (source, expected) in cases {
        let parsed = parse_type(mgr, source).unwrap();
        assert!(
            core::ptr::eq(parsed.value, *expected),
            "'{}' parsed as {:?}",
            source,
            parsed.value
        );
        assert_eq!(parsed.len, source.len());
    }
}

#[test]
fn test_sequences() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    let parsed = parse_type(mgr, "[u8]").unwrap();
    assert_eq!(parsed.value, mgr.vector(mgr.uint(Width::W8), false));
    assert_eq!(parsed.len, 4);

    let parsed = parse_type(mgr, "[string; 3]").unwrap();
    assert_eq!(parsed.value, mgr.array(mgr.string(), 3, false));
    assert_eq!(parsed.len, 11);

    let parsed = parse_type(mgr, "[[i16; 2]]").unwrap();
    assert_eq!(
        parsed.value,
        mgr.vector(mgr.array(mgr.int(Width::W16), 2, false), false)
    );
}

#[test]
fn test_buffered_marker_positions() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);
    let expected = mgr.array(mgr.float32(), 4, true);

    for source in ["[x:f32; 4]", "[x: f32; 4]", "[f32; x:4]", "[f32; x: 4]"] {
        let parsed = parse_type(mgr, source).unwrap();
        assert!(core::ptr::eq(parsed.value, expected), "{}", source);
        assert_eq!(parsed.len, source.len());
    }

    let parsed = parse_type(mgr, "[x:u8]").unwrap();
    assert_eq!(parsed.value, mgr.vector(mgr.uint(Width::W8), true));
}

#[test]
fn test_buffered_requires_numeric_item() {
    assert_eq!(
        kind_of("a: [x:bool]"),
        SchemaErrorKind::BufferedNonPrimitive {
            item: "bool".to_string()
        }
    );
    assert_eq!(
        kind_of("a: [x:enum A[]]"),
        SchemaErrorKind::BufferedNonPrimitive {
            item: "enum A[]".to_string()
        }
    );
    assert_eq!(
        kind_of("a: [[u8]; x:2]"),
        SchemaErrorKind::BufferedNonPrimitive {
            item: "[u8]".to_string()
        }
    );
    assert!(matches!(
        kind_of("a: [x:string]"),
        SchemaErrorKind::BufferedNonPrimitive { .. }
    ));
}

#[test]
fn test_enum_consumes_exact_prefix() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);
    let source = "enum A[a: bool, c: u8], B[]";

    let alone = parse_type(mgr, source).unwrap();
    assert_eq!(alone.len, source.len());

    let followed = parse_type(mgr, "enum A[a: bool, c: u8], B[], next: u8").unwrap();
    assert_eq!(followed.len, source.len());
    assert!(core::ptr::eq(alone.value, followed.value));

    let Type::Enum(variants) = alone.value else {
        panic!("expected enum, got {:?}", alone.value);
    };
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].name, "A");
    assert_eq!(variants[0].fields[0].name, "a");
    assert_eq!(variants[0].fields[1].name, "c");
    assert!(core::ptr::eq(variants[0].fields[1].ty, mgr.uint(Width::W8)));
    assert_eq!(variants[1].name, "B");
    assert!(variants[1].fields.is_empty());
}

#[test]
fn test_parse_field() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    let parsed = parse_field(mgr, "world: [u8; 2], more").unwrap();
    assert_eq!(parsed.value.name, "world");
    assert_eq!(parsed.value.ty, mgr.array(mgr.uint(Width::W8), 2, false));
    assert_eq!(parsed.len, "world: [u8; 2]".len());
}

#[test]
fn test_parse_schema() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    let schema = parse_schema(mgr, "hello: u8, world: [u8; 2], shape: enum Dot[], Line[len: f64]")
        .unwrap();
    let names: Vec<&str> = schema.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["hello", "world", "shape"]);
    assert_eq!(schema.get("shape").unwrap().discriminant_width(), Some(Width::W8));

    assert!(parse_schema(mgr, "").unwrap().is_empty());
}

#[test]
fn test_display_reparses_to_same_type() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    for source in [
        "u64",
        "[x:i32]",
        "[[string; 2]]",
        "enum A[a: bool, c: u8], B[]",
        "[enum Left[], Right[v: [x:f16; 3]]; 7]",
    ] {
        let ty = parse_type(mgr, source).unwrap().value;
        assert_eq!(ty.to_string(), source);
        let again = parse_type(mgr, &ty.to_string()).unwrap().value;
        assert!(core::ptr::eq(ty, again));
    }

    // Buffered marker after the separator renders in the canonical position.
    let ty = parse_type(mgr, "[u8; x: 2]").unwrap().value;
    assert_eq!(ty.to_string(), "[x:u8; 2]");
}

#[test]
fn test_error_kinds() {
    assert!(matches!(kind_of("a: f8"), SchemaErrorKind::UnknownType { .. }));
    assert!(matches!(kind_of("a: u7"), SchemaErrorKind::UnknownType { .. }));
    assert!(matches!(kind_of("a: foo"), SchemaErrorKind::UnknownType { .. }));
    assert!(matches!(kind_of("a: "), SchemaErrorKind::UnknownType { .. }));
    assert_eq!(kind_of("a: [u8"), SchemaErrorKind::UnclosedBracket);
    assert_eq!(kind_of("a: [u8; 2"), SchemaErrorKind::UnclosedBracket);
    assert_eq!(kind_of("a: enum A[b: bool"), SchemaErrorKind::UnclosedBracket);
    assert!(matches!(
        kind_of("a: [u8; x]"),
        SchemaErrorKind::InvalidLength { .. }
    ));
    assert_eq!(
        kind_of("a: [u8; 18446744073709551616]"),
        SchemaErrorKind::InvalidLength {
            text: "18446744073709551616".to_string()
        }
    );
    assert!(matches!(
        kind_of("1a: u8"),
        SchemaErrorKind::InvalidIdentifier { .. }
    ));
    assert_eq!(kind_of("a u8"), SchemaErrorKind::MissingSeparator);
    assert_eq!(kind_of("a:u8"), SchemaErrorKind::MissingSeparator);
    assert!(matches!(
        kind_of("a: u8 b: u8"),
        SchemaErrorKind::TrailingInput { .. }
    ));
    assert_eq!(
        kind_of("a: u8, a: u16"),
        SchemaErrorKind::DuplicateField {
            name: "a".to_string()
        }
    );
    assert_eq!(
        kind_of("e: enum A[], A[x: u8]"),
        SchemaErrorKind::DuplicateVariant {
            name: "A".to_string()
        }
    );
    assert_eq!(
        kind_of("e: enum A[x: u8, x: bool]"),
        SchemaErrorKind::DuplicateField {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_error_span_points_at_offending_text() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);
    let source = "ok: u8, bad: [x:bool; 2]";

    let err = parse_schema(mgr, source).unwrap_err();
    assert_eq!(err.span.str_of(source), "bool");
    assert_eq!(err.text, source);
    assert_eq!(err.field, None);
}
