use core::fmt::{self, Display};

/// Bit width of a fixed-width integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Width {
    W8 = 1,
    W16 = 2,
    W32 = 4,
    W64 = 8,
}

impl Width {
    pub const fn from_bits(bits: u32) -> Option<Width> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }

    pub const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Largest unsigned value representable in this width.
    pub const fn max_unsigned(self) -> u64 {
        match self {
            Width::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Inclusive range of signed values representable in this width.
    pub const fn signed_range(self) -> (i64, i64) {
        match self {
            Width::W64 => (i64::MIN, i64::MAX),
            _ => {
                let half = 1i64 << (self.bits() - 1);
                (-half, half - 1)
            }
        }
    }
}

/// Width of the discriminant written before an enum's variant fields.
///
/// Up to 256 variants fit in one byte, up to 65536 in two, up to 2^32 in
/// four; anything larger takes eight.
pub const fn discriminant_width(variant_count: u64) -> Width {
    if variant_count <= 1u64 << 8 {
        Width::W8
    } else if variant_count <= 1u64 << 16 {
        Width::W16
    } else if variant_count <= 1u64 << 32 {
        Width::W32
    } else {
        Width::W64
    }
}

/// A layout descriptor.
///
/// Types are allocated in an arena by [`TypeManager`](super::manager::TypeManager)
/// and never mutated afterwards; children are plain references into the same
/// arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type<'a> {
    // Primitives.
    Bool,
    UInt(Width),
    Int(Width),
    Float16,
    Float32,
    Float64,
    String,

    // Sequences.
    Array {
        item: &'a Type<'a>,
        length: u64,
        buffered: bool,
    },
    Vector {
        item: &'a Type<'a>,
        buffered: bool,
    },

    // Tagged unions. Declaration order gives the discriminant values.
    Enum(&'a [Variant<'a>]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field<'a> {
    pub name: &'a str,
    pub ty: &'a Type<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant<'a> {
    pub name: &'a str,
    pub fields: &'a [Field<'a>],
}

/// An ordered list of named fields. Field order is the wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schema<'a> {
    pub fields: &'a [Field<'a>],
}

impl<'a> Type<'a> {
    /// True for the primitives a `buffered` sequence may hold.
    pub fn is_fixed_width_numeric(&self) -> bool {
        matches!(
            self,
            Type::UInt(_) | Type::Int(_) | Type::Float16 | Type::Float32 | Type::Float64
        )
    }

    pub fn is_buffered(&self) -> bool {
        match self {
            Type::Array { buffered, .. } | Type::Vector { buffered, .. } => *buffered,
            _ => false,
        }
    }

    /// Encoded size in bytes when it does not depend on the value.
    ///
    /// Strings and vectors are always variable. An enum is fixed only when
    /// every variant encodes to the same number of bytes.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Type::Bool => Some(1),
            Type::UInt(width) | Type::Int(width) => Some(width.bytes()),
            Type::Float16 => Some(2),
            Type::Float32 => Some(4),
            Type::Float64 => Some(8),
            Type::String | Type::Vector { .. } => None,
            Type::Array { item, length, .. } => {
                let length = usize::try_from(*length).ok()?;
                item.fixed_size()?.checked_mul(length)
            }
            Type::Enum(variants) => {
                let mut sizes = variants.iter().map(|v| fields_fixed_size(v.fields));
                let first = sizes.next()??;
                if sizes.all(|size| size == Some(first)) {
                    let tag = discriminant_width(variants.len() as u64).bytes();
                    first.checked_add(tag)
                } else {
                    None
                }
            }
        }
    }

    /// Fewest bytes any value of this type encodes to.
    ///
    /// Zero only for types that never consume input, such as `[u8; 0]`.
    pub fn min_size(&self) -> usize {
        match self {
            Type::Bool => 1,
            Type::UInt(width) | Type::Int(width) => width.bytes(),
            Type::Float16 => 2,
            Type::Float32 => 4,
            Type::Float64 => 8,
            Type::String => 1,
            Type::Vector { .. } => 8,
            Type::Array { item, length, .. } => {
                let length = usize::try_from(*length).unwrap_or(usize::MAX);
                item.min_size().saturating_mul(length)
            }
            Type::Enum(variants) => {
                let tag = discriminant_width(variants.len() as u64).bytes();
                let payload = variants
                    .iter()
                    .map(|v| fields_min_size(v.fields))
                    .min()
                    .unwrap_or(0);
                tag.saturating_add(payload)
            }
        }
    }

    /// Discriminant width for an enum type, computed from its variants.
    pub fn discriminant_width(&self) -> Option<Width> {
        match self {
            Type::Enum(variants) => Some(discriminant_width(variants.len() as u64)),
            _ => None,
        }
    }
}

fn fields_fixed_size(fields: &[Field<'_>]) -> Option<usize> {
    fields
        .iter()
        .try_fold(0usize, |acc, f| acc.checked_add(f.ty.fixed_size()?))
}

fn fields_min_size(fields: &[Field<'_>]) -> usize {
    fields
        .iter()
        .fold(0usize, |acc, f| acc.saturating_add(f.ty.min_size()))
}

impl<'a> Variant<'a> {
    pub fn field(&self, name: &str) -> Option<&Field<'a>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<'a> Schema<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field<'a>> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&'a Type<'a>> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.ty)
    }

    pub fn fixed_size(&self) -> Option<usize> {
        fields_fixed_size(self.fields)
    }
}

// Display renders canonical schema text; parsing it back yields an equal type.

impl Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::UInt(width) => write!(f, "u{}", width.bits()),
            Type::Int(width) => write!(f, "i{}", width.bits()),
            Type::Float16 => write!(f, "f16"),
            Type::Float32 => write!(f, "f32"),
            Type::Float64 => write!(f, "f64"),
            Type::String => write!(f, "string"),
            Type::Array {
                item,
                length,
                buffered,
            } => {
                let marker = if *buffered { "x:" } else { "" };
                write!(f, "[{marker}{item}; {length}]")
            }
            Type::Vector { item, buffered } => {
                let marker = if *buffered { "x:" } else { "" };
                write!(f, "[{marker}{item}]")
            }
            Type::Enum(variants) => {
                write!(f, "enum ")?;
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{variant}")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

impl Display for Variant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.name)?;
        write_fields(f, self.fields)?;
        write!(f, "]")
    }
}

impl Display for Schema<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, self.fields)
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field<'_>]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}
