//! Tuple descriptor: the ordered (type, name) layout of a row
//!
//! Descriptors are immutable once built. Field storage is shared, so
//! cloning is cheap and a descriptor can be read from any thread.
//!
//! Equality and hashing look at the type sequence only. Names are
//! display metadata; they are not required to be unique, and lookup by
//! name returns the first match.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice;
use std::sync::Arc;

use super::errors::{DescError, DescResult};
use super::types::{Field, Type};
use crate::config::TypeLayout;
use crate::observability::{emit_event_line, event_line, Event};

/// Describes the schema of a tuple.
#[derive(Debug, Clone)]
pub struct TupleDesc {
    fields: Arc<[Field]>,
}

impl TupleDesc {
    /// Builds a descriptor from parallel type and name slices.
    ///
    /// # Errors
    ///
    /// `InvalidSchema` if the slices differ in length or are empty.
    pub fn new(types: &[Type], names: &[Option<&str>]) -> DescResult<Self> {
        if types.len() != names.len() {
            return Err(reject(DescError::length_mismatch(types.len(), names.len())));
        }

        Self::from_fields(
            types
                .iter()
                .zip(names)
                .map(|(t, n)| Field::new(*t, (*n).map(str::to_owned))),
        )
    }

    /// Builds a descriptor with one unnamed field per type.
    ///
    /// # Errors
    ///
    /// `InvalidSchema` if `types` is empty.
    pub fn anonymous(types: &[Type]) -> DescResult<Self> {
        Self::from_fields(types.iter().copied().map(Field::anonymous))
    }

    /// Builds a descriptor from a sequence of fields or `(Type, name)` pairs.
    ///
    /// # Errors
    ///
    /// `InvalidSchema` if the sequence is empty.
    pub fn from_fields<I, F>(fields: I) -> DescResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let fields: Vec<Field> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(reject(DescError::empty()));
        }
        Ok(Self {
            fields: fields.into(),
        })
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field at position `i`.
    pub fn field(&self, i: usize) -> DescResult<&Field> {
        self.fields
            .get(i)
            .ok_or_else(|| DescError::index_out_of_range(i, self.fields.len()))
    }

    /// Returns the (possibly absent) name of field `i`.
    pub fn field_name(&self, i: usize) -> DescResult<Option<&str>> {
        self.field(i).map(Field::name)
    }

    /// Returns the type of field `i`.
    pub fn field_type(&self, i: usize) -> DescResult<Type> {
        self.field(i).map(Field::field_type)
    }

    /// Index of the first field named exactly `name`.
    ///
    /// Later fields sharing the name are unreachable through this lookup.
    /// Unnamed fields never match.
    pub fn index_of_name(&self, name: &str) -> DescResult<usize> {
        self.fields
            .iter()
            .position(|f| f.name() == Some(name))
            .ok_or_else(|| DescError::no_such_field(name))
    }

    /// Size in bytes of one tuple under the default type layout.
    pub fn byte_size(&self) -> usize {
        self.types().map(|t| t.byte_len()).sum()
    }

    /// Size in bytes of one tuple under `layout`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the total does not fit in `usize`.
    pub fn byte_size_with(&self, layout: &TypeLayout) -> DescResult<usize> {
        sum_lengths(&self.fields, layout)
    }

    /// Byte offset of field `i` within a tuple, under the default layout.
    pub fn field_offset(&self, i: usize) -> DescResult<usize> {
        self.field(i)?;
        Ok(self.fields[..i]
            .iter()
            .map(|f| f.field_type().byte_len())
            .sum())
    }

    /// Byte offset of field `i` within a tuple, under `layout`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for a bad `i`, `InvalidConfig` if the offset does
    /// not fit in `usize`.
    pub fn field_offset_with(&self, i: usize, layout: &TypeLayout) -> DescResult<usize> {
        self.field(i)?;
        sum_lengths(&self.fields[..i], layout)
    }

    /// Concatenates `a` and `b`: `a`'s fields first, then `b`'s.
    ///
    /// Duplicate names are kept, so on the result a name present in `a`
    /// always resolves into `a`'s portion.
    pub fn merge(a: &TupleDesc, b: &TupleDesc) -> TupleDesc {
        let fields: Vec<Field> = a.fields.iter().chain(b.fields.iter()).cloned().collect();
        TupleDesc {
            fields: fields.into(),
        }
    }

    /// New descriptor made of the fields at `indices`, in that order.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for any bad index, `InvalidSchema` if `indices`
    /// is empty.
    pub fn project(&self, indices: &[usize]) -> DescResult<TupleDesc> {
        let fields = indices
            .iter()
            .map(|&i| self.field(i).cloned())
            .collect::<DescResult<Vec<_>>>()?;
        Self::from_fields(fields)
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Iterates over the field types in order.
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.fields.iter().map(Field::field_type)
    }
}

fn sum_lengths(fields: &[Field], layout: &TypeLayout) -> DescResult<usize> {
    fields.iter().try_fold(0usize, |total, f| {
        let len = f.field_type().byte_len_with(layout);
        total.checked_add(len).ok_or_else(|| {
            DescError::InvalidConfig(format!(
                "tuple size overflows usize: {} + {} bytes",
                total, len
            ))
        })
    })
}

fn reject(err: DescError) -> DescError {
    emit_event_line(Event::TupleDescRejected, &rejection_line(&err));
    err
}

fn rejection_line(err: &DescError) -> String {
    let reason = err.to_string();
    event_line(
        Event::TupleDescRejected,
        &[("code", err.code()), ("reason", reason.as_str())],
    )
}

impl<'a> IntoIterator for &'a TupleDesc {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for TupleDesc {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.types().eq(other.types())
    }
}

impl Eq for TupleDesc {}

impl Hash for TupleDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.fields.len());
        for t in self.types() {
            t.hash(state);
        }
    }
}

impl fmt::Display for TupleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(
                f,
                "{}[{}]({}[{}])",
                field.field_type(),
                i,
                field.name().unwrap_or("null"),
                i
            )?;
        }
        Ok(())
    }
}
