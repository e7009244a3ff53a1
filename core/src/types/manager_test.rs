use super::manager::TypeManager;
use super::{Type, Width};
use bumpalo::Bump;

#[test]
fn test_interning_primitives() {
    let bump = Bump::new();
    let manager = TypeManager::new(&bump);

    assert!(core::ptr::eq(manager.bool(), manager.bool()));
    assert!(core::ptr::eq(manager.string(), manager.string()));
    assert!(core::ptr::eq(manager.float16(), manager.float16()));
    assert!(core::ptr::eq(manager.uint(Width::W8), manager.uint(Width::W8)));
    assert!(!core::ptr::eq(manager.uint(Width::W8), manager.int(Width::W8)));
    assert!(!core::ptr::eq(manager.uint(Width::W8), manager.uint(Width::W16)));
}

#[test]
fn test_interning_sequences() {
    let bump = Bump::new();
    let manager = TypeManager::new(&bump);

    let u8_ty = manager.uint(Width::W8);
    let array = manager.array(u8_ty, 4, false);
    assert!(core::ptr::eq(array, manager.array(u8_ty, 4, false)));
    assert!(!core::ptr::eq(array, manager.array(u8_ty, 5, false)));
    assert!(!core::ptr::eq(array, manager.array(u8_ty, 4, true)));

    let vector = manager.vector(u8_ty, false);
    assert!(core::ptr::eq(vector, manager.vector(u8_ty, false)));
    assert_eq!(
        vector,
        &Type::Vector {
            item: &Type::UInt(Width::W8),
            buffered: false
        }
    );
}

#[test]
fn test_interning_enum_keeps_variant_order() {
    let bump = Bump::new();
    let manager = TypeManager::new(&bump);

    let a = manager.variant("A", &[manager.field("x", manager.bool())]);
    let b = manager.variant("B", &[]);

    let ab = manager.enumeration(&[a, b]);
    let ab_again = manager.enumeration(&[a, b]);
    let ba = manager.enumeration(&[b, a]);

    assert!(core::ptr::eq(ab, ab_again));
    assert!(!core::ptr::eq(ab, ba));

    let Type::Enum(variants) = ab else {
        panic!("expected enum, got {ab:?}");
    };
    assert_eq!(variants[0].name, "A");
    assert_eq!(variants[1].name, "B");
}

#[test]
fn test_intern_str() {
    let bump = Bump::new();
    let manager = TypeManager::new(&bump);

    let first = manager.intern_str("payload");
    let second = manager.intern_str(&String::from("payload"));
    assert!(core::ptr::eq(first, second));
    assert!(core::ptr::eq(
        manager.field("payload", manager.bool()).name,
        first
    ));
}
