use crate::types::types::{Field, Schema, Type, Variant, Width};
use bumpalo::Bump;
use core::cell::RefCell;
use hashbrown::HashMap;

/// Arena-backed factory for [`Type`] nodes.
///
/// Identical types and names are interned, so building the same type twice
/// returns the same reference.
pub struct TypeManager<'a> {
    // Arena holding all types from this TypeManager.
    arena: &'a Bump,
    interned_strs: RefCell<HashMap<&'a str, &'a str>>,
    interned: RefCell<HashMap<Type<'a>, &'a Type<'a>>>,
}

impl<'a> TypeManager<'a> {
    pub fn new(arena: &'a Bump) -> &'a Self {
        arena.alloc(Self {
            arena,
            interned_strs: RefCell::new(HashMap::new()),
            interned: RefCell::new(HashMap::new()),
        })
    }

    pub fn intern_str(&self, s: &str) -> &'a str {
        if let Some(&interned_str) = self.interned_strs.borrow().get(s) {
            return interned_str;
        }
        let arena_str = self.arena.alloc_str(s);
        self.interned_strs.borrow_mut().insert(arena_str, arena_str);
        arena_str
    }

    fn intern(&self, ty: Type<'a>) -> &'a Type<'a> {
        if let Some(&interned_ty) = self.interned.borrow().get(&ty) {
            return interned_ty;
        }
        let arena_ty = self.arena.alloc(ty.clone());
        self.interned.borrow_mut().insert(ty, arena_ty);
        arena_ty
    }

    // Factory methods for types.
    pub fn bool(&self) -> &'a Type<'a> {
        self.intern(Type::Bool)
    }
    pub fn uint(&self, width: Width) -> &'a Type<'a> {
        self.intern(Type::UInt(width))
    }
    pub fn int(&self, width: Width) -> &'a Type<'a> {
        self.intern(Type::Int(width))
    }
    pub fn float16(&self) -> &'a Type<'a> {
        self.intern(Type::Float16)
    }
    pub fn float32(&self) -> &'a Type<'a> {
        self.intern(Type::Float32)
    }
    pub fn float64(&self) -> &'a Type<'a> {
        self.intern(Type::Float64)
    }
    pub fn string(&self) -> &'a Type<'a> {
        self.intern(Type::String)
    }

    pub fn array(&self, item: &'a Type<'a>, length: u64, buffered: bool) -> &'a Type<'a> {
        self.intern(Type::Array {
            item,
            length,
            buffered,
        })
    }

    pub fn vector(&self, item: &'a Type<'a>, buffered: bool) -> &'a Type<'a> {
        self.intern(Type::Vector { item, buffered })
    }

    /// Build an enum type. Variant order is preserved: it defines the
    /// discriminant of each variant.
    pub fn enumeration(&self, variants: &[Variant<'a>]) -> &'a Type<'a> {
        let variants = self.arena.alloc_slice_copy(variants);
        self.intern(Type::Enum(variants))
    }

    pub fn variant(&self, name: &str, fields: &[Field<'a>]) -> Variant<'a> {
        Variant {
            name: self.intern_str(name),
            fields: self.arena.alloc_slice_copy(fields),
        }
    }

    pub fn field(&self, name: &str, ty: &'a Type<'a>) -> Field<'a> {
        Field {
            name: self.intern_str(name),
            ty,
        }
    }

    pub fn schema(&self, fields: &[Field<'a>]) -> Schema<'a> {
        Schema {
            fields: self.arena.alloc_slice_copy(fields),
        }
    }
}
