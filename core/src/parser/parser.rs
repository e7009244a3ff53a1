use crate::parser::error::{SchemaError, SchemaErrorKind, convert_pest_error};
use crate::parser::syntax::{Parsed, Span};
use crate::types::manager::TypeManager;
use crate::types::{Field, Schema, Type, Variant, Width};
use hashbrown::HashSet;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;
use tracing::{debug, trace};

#[derive(Parser)]
#[grammar = "parser/schema.pest"]
pub struct SchemaParser;

/// Parse a single type expression from the start of `source`.
///
/// Input after the type is left alone; the returned length says how many
/// bytes the type took, so callers can continue scanning from there.
pub fn parse_type<'a>(
    type_mgr: &'a TypeManager<'a>,
    source: &str,
) -> Result<Parsed<&'a Type<'a>>, SchemaError> {
    let mut pairs =
        SchemaParser::parse(Rule::type_prefix, source).map_err(|e| convert_pest_error(e, source))?;
    let prefix = next_child(&mut pairs, Rule::type_prefix);
    let type_expr = next_child(&mut prefix.into_inner(), Rule::type_prefix);
    Builder::new(type_mgr, source).build_type(type_expr)
}

/// Parse one `name: type` field from the start of `source`.
pub fn parse_field<'a>(
    type_mgr: &'a TypeManager<'a>,
    source: &str,
) -> Result<Parsed<Field<'a>>, SchemaError> {
    let mut pairs = SchemaParser::parse(Rule::field_prefix, source)
        .map_err(|e| convert_pest_error(e, source))?;
    let prefix = next_child(&mut pairs, Rule::field_prefix);
    let field = next_child(&mut prefix.into_inner(), Rule::field_prefix);
    Builder::new(type_mgr, source).build_field(field)
}

/// Parse a whole schema: comma-separated fields covering all of `source`.
///
/// The empty string is a valid schema with no fields.
pub fn parse_schema<'a>(
    type_mgr: &'a TypeManager<'a>,
    source: &str,
) -> Result<Schema<'a>, SchemaError> {
    trace!(source, "Parsing schema");
    let mut pairs =
        SchemaParser::parse(Rule::schema, source).map_err(|e| convert_pest_error(e, source))?;
    let root = next_child(&mut pairs, Rule::schema);

    let builder = Builder::new(type_mgr, source);
    let fields = builder.build_fields(root.into_inner())?;
    let schema = type_mgr.schema(&fields);
    debug!(fields = schema.len(), "Parsed schema");
    Ok(schema)
}

// Structure the grammar guarantees; a missing child is a grammar bug.
fn next_child<'i>(pairs: &mut Pairs<'i, Rule>, parent: Rule) -> Pair<'i, Rule> {
    pairs
        .next()
        .unwrap_or_else(|| unreachable!("grammar guarantees a child under {parent:?}"))
}

fn consumed(pair: &Pair<Rule>) -> usize {
    let span = pair.as_span();
    span.end() - span.start()
}

struct Builder<'a, 's> {
    type_mgr: &'a TypeManager<'a>,
    source: &'s str,
}

impl<'a, 's> Builder<'a, 's> {
    fn new(type_mgr: &'a TypeManager<'a>, source: &'s str) -> Self {
        Self { type_mgr, source }
    }

    fn error(&self, kind: SchemaErrorKind, span: Span) -> SchemaError {
        SchemaError::new(kind, self.source, span)
    }

    fn build_type(&self, pair: Pair<Rule>) -> Result<Parsed<&'a Type<'a>>, SchemaError> {
        debug_assert_eq!(pair.as_rule(), Rule::type_expr);
        let len = consumed(&pair);
        let inner = next_child(&mut pair.into_inner(), Rule::type_expr);

        let ty = match inner.as_rule() {
            Rule::bool_type => self.type_mgr.bool(),
            Rule::string_type => self.type_mgr.string(),
            Rule::uint_type => self.type_mgr.uint(int_width(inner)),
            Rule::int_type => self.type_mgr.int(int_width(inner)),
            Rule::float_type => {
                let width = next_child(&mut inner.into_inner(), Rule::float_type);
                match width.as_str() {
                    "16" => self.type_mgr.float16(),
                    "32" => self.type_mgr.float32(),
                    "64" => self.type_mgr.float64(),
                    other => unreachable!("grammar only accepts float widths, got {other}"),
                }
            }
            Rule::sequence_type => return self.build_sequence(inner),
            Rule::enum_type => return self.build_enum(inner),
            rule => unreachable!("Unknown type rule: {:?}", rule),
        };
        Ok(Parsed::new(ty, len))
    }

    fn build_sequence(&self, pair: Pair<Rule>) -> Result<Parsed<&'a Type<'a>>, SchemaError> {
        let len = consumed(&pair);
        let mut buffered = false;
        let mut item = None;
        let mut length = None;

        for child in pair.into_inner() {
            match child.as_rule() {
                // The marker may sit before the item or before the length;
                // both spellings mean the same thing.
                Rule::buffered => buffered = true,
                Rule::type_expr => {
                    let span = Span::from(child.as_span());
                    item = Some((self.build_type(child)?, span));
                }
                Rule::length => length = Some(self.build_length(child)?),
                Rule::open_bracket | Rule::close_bracket | Rule::length_sep => {}
                rule => unreachable!("Unknown sequence rule: {:?}", rule),
            }
        }

        let Some((item, item_span)) = item else {
            unreachable!("grammar guarantees an item type in a sequence")
        };
        let item = item.value;
        if buffered && !item.is_fixed_width_numeric() {
            return Err(self.error(
                SchemaErrorKind::BufferedNonPrimitive {
                    item: item.to_string(),
                },
                item_span,
            ));
        }

        let ty = match length {
            Some(length) => self.type_mgr.array(item, length, buffered),
            None => self.type_mgr.vector(item, buffered),
        };
        Ok(Parsed::new(ty, len))
    }

    fn build_length(&self, pair: Pair<Rule>) -> Result<u64, SchemaError> {
        let text = pair.as_str();
        text.parse::<u64>().map_err(|_| {
            self.error(
                SchemaErrorKind::InvalidLength {
                    text: text.to_string(),
                },
                pair.as_span().into(),
            )
        })
    }

    fn build_enum(&self, pair: Pair<Rule>) -> Result<Parsed<&'a Type<'a>>, SchemaError> {
        let len = consumed(&pair);
        let mut variants: Vec<Variant<'a>> = Vec::new();
        let mut seen = HashSet::new();

        for child in pair.into_inner() {
            let span = Span::from(child.as_span());
            let variant = self.build_variant(child)?.value;
            if !seen.insert(variant.name) {
                return Err(self.error(
                    SchemaErrorKind::DuplicateVariant {
                        name: variant.name.to_string(),
                    },
                    span,
                ));
            }
            variants.push(variant);
        }

        trace!(variants = variants.len(), "Built enum");
        Ok(Parsed::new(self.type_mgr.enumeration(&variants), len))
    }

    fn build_variant(&self, pair: Pair<Rule>) -> Result<Parsed<Variant<'a>>, SchemaError> {
        debug_assert_eq!(pair.as_rule(), Rule::variant);
        let len = consumed(&pair);
        let mut children = pair.into_inner();
        let name = next_child(&mut children, Rule::variant);
        let fields = self.build_fields(children)?;
        let variant = self.type_mgr.variant(name.as_str(), &fields);
        Ok(Parsed::new(variant, len))
    }

    /// Build every `field` pair in `pairs`, skipping punctuation and
    /// rejecting repeated names.
    fn build_fields(&self, pairs: Pairs<Rule>) -> Result<Vec<Field<'a>>, SchemaError> {
        let mut fields: Vec<Field<'a>> = Vec::new();
        let mut seen = HashSet::new();

        for child in pairs.filter(|p| p.as_rule() == Rule::field) {
            let span = Span::from(child.as_span());
            let field = self.build_field(child)?.value;
            if !seen.insert(field.name) {
                return Err(self.error(
                    SchemaErrorKind::DuplicateField {
                        name: field.name.to_string(),
                    },
                    span,
                ));
            }
            fields.push(field);
        }
        Ok(fields)
    }

    fn build_field(&self, pair: Pair<Rule>) -> Result<Parsed<Field<'a>>, SchemaError> {
        debug_assert_eq!(pair.as_rule(), Rule::field);
        let len = consumed(&pair);
        let mut children = pair.into_inner();
        let name = next_child(&mut children, Rule::field);
        let ty = children
            .find(|p| p.as_rule() == Rule::type_expr)
            .unwrap_or_else(|| unreachable!("grammar guarantees a type in a field"));
        let ty = self.build_type(ty)?.value;
        Ok(Parsed::new(self.type_mgr.field(name.as_str(), ty), len))
    }
}

fn int_width(pair: Pair<Rule>) -> Width {
    let width = next_child(&mut pair.into_inner(), Rule::int_width);
    match width.as_str() {
        "8" => Width::W8,
        "16" => Width::W16,
        "32" => Width::W32,
        "64" => Width::W64,
        other => unreachable!("grammar only accepts integer widths, got {other}"),
    }
}
