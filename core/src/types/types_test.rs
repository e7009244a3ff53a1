use super::manager::TypeManager;
use super::{Width, discriminant_width};
use bumpalo::Bump;

#[test]
fn test_discriminant_width_boundaries() {
    assert_eq!(discriminant_width(0), Width::W8);
    assert_eq!(discriminant_width(2), Width::W8);
    assert_eq!(discriminant_width(256), Width::W8);
    assert_eq!(discriminant_width(257), Width::W16);
    assert_eq!(discriminant_width(65_536), Width::W16);
    assert_eq!(discriminant_width(65_537), Width::W32);
    assert_eq!(discriminant_width(1 << 32), Width::W32);
    assert_eq!(discriminant_width((1 << 32) + 1), Width::W64);
}

#[test]
fn test_width_ranges() {
    assert_eq!(Width::W8.max_unsigned(), 255);
    assert_eq!(Width::W16.max_unsigned(), 65_535);
    assert_eq!(Width::W64.max_unsigned(), u64::MAX);
    assert_eq!(Width::W8.signed_range(), (-128, 127));
    assert_eq!(Width::W32.signed_range(), (i32::MIN as i64, i32::MAX as i64));
    assert_eq!(Width::W64.signed_range(), (i64::MIN, i64::MAX));
    assert_eq!(Width::from_bits(16), Some(Width::W16));
    assert_eq!(Width::from_bits(24), None);
    assert_eq!(Width::W32.bits(), 32);
}

#[test]
fn test_fixed_size() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    assert_eq!(mgr.bool().fixed_size(), Some(1));
    assert_eq!(mgr.int(Width::W64).fixed_size(), Some(8));
    assert_eq!(mgr.float16().fixed_size(), Some(2));
    assert_eq!(mgr.string().fixed_size(), None);
    assert_eq!(mgr.array(mgr.uint(Width::W16), 3, false).fixed_size(), Some(6));
    assert_eq!(mgr.vector(mgr.uint(Width::W8), false).fixed_size(), None);

    // Both variants carry two bytes of payload.
    let same = mgr.enumeration(&[
        mgr.variant("A", &[mgr.field("x", mgr.uint(Width::W16))]),
        mgr.variant("B", &[mgr.field("y", mgr.bool()), mgr.field("z", mgr.bool())]),
    ]);
    assert_eq!(same.fixed_size(), Some(3));

    let differ = mgr.enumeration(&[
        mgr.variant("A", &[mgr.field("x", mgr.uint(Width::W16))]),
        mgr.variant("B", &[]),
    ]);
    assert_eq!(differ.fixed_size(), None);
}

#[test]
fn test_min_size() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    assert_eq!(mgr.uint(Width::W32).min_size(), 4);
    assert_eq!(mgr.string().min_size(), 1);
    assert_eq!(mgr.vector(mgr.string(), false).min_size(), 8);
    assert_eq!(mgr.array(mgr.string(), 3, false).min_size(), 3);
    assert_eq!(mgr.array(mgr.uint(Width::W8), 0, false).min_size(), 0);
    assert_eq!(
        mgr.array(mgr.array(mgr.bool(), 0, false), 1 << 40, false).min_size(),
        0
    );

    // Discriminant plus the smallest variant.
    let shape = mgr.enumeration(&[
        mgr.variant("A", &[mgr.field("x", mgr.uint(Width::W16))]),
        mgr.variant("B", &[]),
    ]);
    assert_eq!(shape.min_size(), 1);
}

#[test]
fn test_is_buffered() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    assert!(mgr.vector(mgr.uint(Width::W8), true).is_buffered());
    assert!(mgr.array(mgr.float32(), 4, true).is_buffered());
    assert!(!mgr.vector(mgr.uint(Width::W8), false).is_buffered());
    assert!(!mgr.uint(Width::W8).is_buffered());

    let parsed = crate::parser::parse_type(mgr, "[x:u8; 4]").unwrap().value;
    assert!(parsed.is_buffered());
    assert!(!crate::parser::parse_type(mgr, "[u8; 4]").unwrap().value.is_buffered());
}

#[test]
fn test_display() {
    let bump = Bump::new();
    let mgr = TypeManager::new(&bump);

    assert_eq!(mgr.uint(Width::W32).to_string(), "u32");
    assert_eq!(mgr.int(Width::W8).to_string(), "i8");
    assert_eq!(mgr.array(mgr.float32(), 4, true).to_string(), "[x:f32; 4]");
    assert_eq!(
        mgr.vector(mgr.vector(mgr.string(), false), false).to_string(),
        "[[string]]"
    );

    let shape = mgr.enumeration(&[
        mgr.variant("Circle", &[mgr.field("r", mgr.float32())]),
        mgr.variant("Empty", &[]),
    ]);
    assert_eq!(shape.to_string(), "enum Circle[r: f32], Empty[]");

    let schema = mgr.schema(&[mgr.field("id", mgr.uint(Width::W16)), mgr.field("shape", shape)]);
    assert_eq!(schema.to_string(), "id: u16, shape: enum Circle[r: f32], Empty[]");
    assert_eq!(schema.len(), 2);
    assert!(core::ptr::eq(schema.get("shape").unwrap(), shape));
}
