use core::fmt;

/// One step of a path from the top-level record to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Variant(String),
    Index(u64),
}

/// Location of a failing value inside a record, e.g. `shape.Circle.radius`
/// or `points[3]`.
///
/// Errors are created at the innermost value and each enclosing frame
/// prepends its segment on the way out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    // Innermost segment first.
    reversed: Vec<PathSegment>,
}

impl FieldPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.reversed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reversed.len()
    }

    /// Segments from the outermost record inwards.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.reversed.iter().rev()
    }

    pub fn push_front(&mut self, segment: PathSegment) {
        self.reversed.push(segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            match segment {
                PathSegment::Field(name) | PathSegment::Variant(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

fn in_path(path: &FieldPath) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" (in `{}`)", path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {position}{}", in_path(.path))]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    /// Buffer offset where the failing read started.
    pub position: usize,
    pub path: FieldPath,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeErrorKind {
    #[error("unexpected end of buffer: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    #[error("discriminant {value} is out of range for an enum with {variants} variants")]
    UnknownDiscriminant { value: u64, variants: usize },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("string has no NUL terminator before the end of the buffer")]
    UnterminatedString,

    #[error("sequence length {len} exceeds the limit of {max}")]
    SequenceTooLong { len: u64, max: u64 },
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            path: FieldPath::new(),
        }
    }

    /// Prepend an enclosing path segment.
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.push_front(segment);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{}", in_path(.path))]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
    pub path: FieldPath,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeErrorKind {
    #[error("missing field `{name}`")]
    MissingField { name: String },

    #[error("unknown variant `{name}`")]
    UnknownVariant { name: String },

    #[error("expected a value of type `{expected}`, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },

    #[error("value {value} does not fit in `{ty}`")]
    OutOfRange { value: String, ty: String },

    #[error("array of type `{ty}` needs {expected} elements, found {found}")]
    LengthMismatch {
        ty: String,
        expected: u64,
        found: usize,
    },

    #[error("string contains a NUL byte")]
    InteriorNul,
}

impl EncodeError {
    pub fn new(kind: EncodeErrorKind) -> Self {
        Self {
            kind,
            path: FieldPath::new(),
        }
    }

    /// Prepend an enclosing path segment.
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.push_front(segment);
        self
    }
}

impl From<EncodeErrorKind> for EncodeError {
    fn from(kind: EncodeErrorKind) -> Self {
        Self::new(kind)
    }
}
