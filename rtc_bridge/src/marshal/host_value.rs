// rtc_bridge/src/marshal/host_value.rs
use crate::payload::external_frame::ExternalFrame;

/// Host-neutral value every marshalled argument is expressed in. A host
/// binding maps these onto its own object model.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Seq(Vec<HostValue>),
    /// Named fields in declaration order.
    Record(Vec<(&'static str, HostValue)>),
    Bytes(ExternalFrame),
}

impl HostValue {
    /// Looks up a field of a `Record`.
    pub fn get(&self, field: &str) -> Option<&HostValue> {
        match self {
            HostValue::Record(fields) => fields
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            HostValue::UInt(v) => Some(v),
            HostValue::Int(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            HostValue::Int(v) => Some(v),
            HostValue::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            HostValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! host_value_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for HostValue {
                fn from(v: $ty) -> Self {
                    HostValue::$variant(v as $target)
                }
            }
        )*
    };
}

host_value_from!(Int as i64: i8, i16, i32, i64);
host_value_from!(UInt as u64: u8, u16, u32, u64);
host_value_from!(Float as f64: f32, f64);

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Str(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Str(v.to_owned())
    }
}

impl From<ExternalFrame> for HostValue {
    fn from(v: ExternalFrame) -> Self {
        HostValue::Bytes(v)
    }
}

/// Builds a `HostValue::Record` field by field.
#[derive(Default)]
pub struct RecordBuilder {
    fields: Vec<(&'static str, HostValue)>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, value: impl Into<HostValue>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn finish(self) -> HostValue {
        HostValue::Record(self.fields)
    }
}
