//! Field accessors: how one field of a shape moves to and from the wire.

use std::fmt;

use ledgerwire_wire::{Error as WireError, Value, ValueKind};

use crate::Shape;

/// The wire kinds a field accepts.
///
/// Checked before a field's setter runs so that a wrong primitive kind is
/// reported as a type mismatch rather than a conversion failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Bool,
    /// Integer or float.
    Number,
    Array,
    Object,
    /// Any of the listed kinds, e.g. an amount that is a string or an object.
    OneOf(&'static [FieldKind]),
    Any,
}

impl FieldKind {
    /// Whether a wire value of `kind` may be handed to this field's setter.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match self {
            FieldKind::String => kind == ValueKind::String,
            FieldKind::Integer => kind == ValueKind::Integer,
            FieldKind::Bool => kind == ValueKind::Bool,
            FieldKind::Number => matches!(kind, ValueKind::Integer | ValueKind::Float),
            FieldKind::Array => kind == ValueKind::Array,
            FieldKind::Object => kind == ValueKind::Map,
            FieldKind::OneOf(kinds) => kinds.iter().any(|k| k.accepts(kind)),
            FieldKind::Any => true,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("string"),
            FieldKind::Integer => f.write_str("integer"),
            FieldKind::Bool => f.write_str("bool"),
            FieldKind::Number => f.write_str("number"),
            FieldKind::Array => f.write_str("array"),
            FieldKind::Object => f.write_str("object"),
            FieldKind::OneOf(kinds) => {
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
            FieldKind::Any => f.write_str("any value"),
        }
    }
}

/// A Rust type that can sit in a shape field.
///
/// `from_wire` returns `None` when the value has an acceptable kind but still
/// cannot be converted (an out-of-range integer, an object missing keys);
/// `rejection` then says why.
pub trait WireField: Sized {
    const KIND: FieldKind;

    /// Fails only for values with no wire form, e.g. a serde type whose
    /// `Serialize` impl errors.
    fn to_wire(&self) -> Result<Value, WireError>;

    fn from_wire(value: &Value) -> Option<Self>;

    /// Why `value`, of an accepted kind, did not convert.
    fn rejection(value: &Value) -> String {
        format!("{} value cannot be converted", value.kind())
    }
}

fn integer_rejection(value: &Value) -> String {
    match value {
        Value::Integer(i) => format!("{} is out of range", i),
        other => format!("{} value cannot be converted", other.kind()),
    }
}

impl WireField for String {
    const KIND: FieldKind = FieldKind::String;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(Value::String(self.clone()))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl WireField for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(Value::Bool(*self))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl WireField for i64 {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(Value::Integer(*self))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn rejection(value: &Value) -> String {
        integer_rejection(value)
    }
}

/// Values past `i64::MAX` do not fit the wire integer and travel as decimal
/// strings, which is also how large JSON numbers are usually quoted.
impl WireField for u64 {
    const KIND: FieldKind = FieldKind::OneOf(&[FieldKind::Integer, FieldKind::String]);

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(i64::try_from(*self)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::String(self.to_string())))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => text.parse().ok(),
            other => other.as_u64(),
        }
    }

    fn rejection(value: &Value) -> String {
        match value {
            Value::String(text) => format!("{:?} is not an unsigned integer", text),
            other => integer_rejection(other),
        }
    }
}

impl WireField for u32 {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(Value::Integer(i64::from(*self)))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|i| u32::try_from(i).ok())
    }

    fn rejection(value: &Value) -> String {
        integer_rejection(value)
    }
}

impl WireField for u8 {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(Value::Integer(i64::from(*self)))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|i| u8::try_from(i).ok())
    }

    fn rejection(value: &Value) -> String {
        integer_rejection(value)
    }
}

impl WireField for f64 {
    const KIND: FieldKind = FieldKind::Number;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(Value::Float(*self))
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl WireField for Value {
    const KIND: FieldKind = FieldKind::Any;

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(self.clone())
    }

    fn from_wire(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: WireField> WireField for Vec<T> {
    const KIND: FieldKind = FieldKind::Array;

    fn to_wire(&self) -> Result<Value, WireError> {
        self.iter()
            .map(WireField::to_wire)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn from_wire(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| {
                if T::KIND.accepts(item.kind()) {
                    T::from_wire(item)
                } else {
                    None
                }
            })
            .collect()
    }

    fn rejection(value: &Value) -> String {
        let Some(items) = value.as_array() else {
            return format!("expected array, found {}", value.kind());
        };
        for (index, item) in items.iter().enumerate() {
            if !T::KIND.accepts(item.kind()) {
                return format!("element {}: expected {}, found {}", index, T::KIND, item.kind());
            }
            if T::from_wire(item).is_none() {
                return format!("element {}: {}", index, T::rejection(item));
            }
        }
        "array cannot be converted".to_string()
    }
}

/// Implement `WireField` for serde types by going through the wire tree.
///
/// ```rust,ignore
/// #[derive(Clone, Serialize, Deserialize)]
/// pub struct Memo { memo_type: Option<String>, memo_data: Option<String> }
///
/// ledgerwire_codec::serde_wire_field!(Memo => FieldKind::Object);
/// ```
#[macro_export]
macro_rules! serde_wire_field {
    ($($ty:ty => $kind:expr),+ $(,)?) => {
        $(
            impl $crate::WireField for $ty {
                const KIND: $crate::FieldKind = $kind;

                fn to_wire(
                    &self,
                ) -> ::std::result::Result<$crate::Value, $crate::__private::WireError> {
                    $crate::__private::to_value(self)
                }

                fn from_wire(value: &$crate::Value) -> Option<Self> {
                    $crate::__private::from_value(value.clone()).ok()
                }
            }
        )+
    };
}

/// Shorthand for a `Field` whose wire name matches the Rust field name.
///
/// Expands inside an `impl Shape` block, where `Self` is the shape:
///
/// ```rust,ignore
/// field!(required amount)
/// field!(optional destination_tag)
/// field!(optional "InvoiceID" => invoice_id)
/// ```
#[macro_export]
macro_rules! field {
    (required $field:ident) => {
        $crate::field!(required stringify!($field) => $field)
    };
    (optional $field:ident) => {
        $crate::field!(optional stringify!($field) => $field)
    };
    (required $name:expr => $field:ident) => {
        $crate::Field::required($name, |s: &Self| &s.$field, |s: &mut Self| &mut s.$field)
    };
    (optional $name:expr => $field:ident) => {
        $crate::Field::optional($name, |s: &Self| &s.$field, |s: &mut Self| &mut s.$field)
    };
}

/// Static description of a field, independent of the shape type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    /// Property name on the wire.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required fields fail decoding when absent or null.
    pub required: bool,
}

type ReadFn<S> = Box<dyn Fn(&S) -> Result<Option<Value>, WireError> + Send + Sync>;
/// Errors carry a description of why the value did not convert.
type WriteFn<S> = Box<dyn Fn(&mut S, &Value) -> Result<(), String> + Send + Sync>;

/// One field of shape `S`: its wire name, kind, and a getter/setter pair.
///
/// Built from plain field projections:
///
/// ```rust,ignore
/// Field::required("account", |s: &Escrow| &s.account, |s: &mut Escrow| &mut s.account)
/// ```
pub struct Field<S> {
    info: FieldInfo,
    read: ReadFn<S>,
    write: WriteFn<S>,
}

impl<S: 'static> Field<S> {
    /// A field that must be present on the wire.
    pub fn required<T: WireField + 'static>(
        name: &'static str,
        get: fn(&S) -> &T,
        set: fn(&mut S) -> &mut T,
    ) -> Self {
        Field {
            info: FieldInfo {
                name,
                kind: T::KIND,
                required: true,
            },
            read: Box::new(move |shape: &S| get(shape).to_wire().map(Some)),
            write: Box::new(move |shape: &mut S, value: &Value| {
                *set(shape) = T::from_wire(value).ok_or_else(|| T::rejection(value))?;
                Ok(())
            }),
        }
    }

    /// A field that may be absent; `None` is omitted when encoding.
    pub fn optional<T: WireField + 'static>(
        name: &'static str,
        get: fn(&S) -> &Option<T>,
        set: fn(&mut S) -> &mut Option<T>,
    ) -> Self {
        Field {
            info: FieldInfo {
                name,
                kind: T::KIND,
                required: false,
            },
            read: Box::new(move |shape: &S| get(shape).as_ref().map(WireField::to_wire).transpose()),
            write: Box::new(move |shape: &mut S, value: &Value| {
                *set(shape) = Some(T::from_wire(value).ok_or_else(|| T::rejection(value))?);
                Ok(())
            }),
        }
    }

    /// Every field of an embedded shape `B`, re-exposed on `S`.
    ///
    /// Concrete shapes use this to carry their family's base fields.
    pub fn embedded<B: Shape>(get: fn(&S) -> &B, set: fn(&mut S) -> &mut B) -> Vec<Field<S>> {
        B::fields()
            .into_iter()
            .map(|field| field.nest(get, set))
            .collect()
    }

    /// Re-expose this field on an outer shape `P` that embeds `S`.
    pub fn nest<P: 'static>(self, get: fn(&P) -> &S, set: fn(&mut P) -> &mut S) -> Field<P> {
        let Field { info, read, write } = self;
        Field {
            info,
            read: Box::new(move |outer: &P| read(get(outer))),
            write: Box::new(move |outer: &mut P, value: &Value| write(set(outer), value)),
        }
    }
}

impl<S> Field<S> {
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    pub fn name(&self) -> &'static str {
        self.info.name
    }

    pub(crate) fn read(&self, shape: &S) -> Result<Option<Value>, WireError> {
        (self.read)(shape)
    }

    pub(crate) fn write(&self, shape: &mut S, value: &Value) -> Result<(), String> {
        (self.write)(shape, value)
    }
}

impl<S> fmt::Debug for Field<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("info", &self.info).finish()
    }
}
