//! Field descriptors for mapped struct fields.
//!
//! A [`FieldDescriptor`] carries what a dialect needs to pick a column type:
//! the runtime kind of the value, whether the field is the primary key, and
//! the tag settings attached to it (`size:100;not null;index`).

use std::collections::BTreeMap;
use std::fmt;

/// Runtime kind of a mapped field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Boolean.
    Bool,
    /// Pointer-sized signed integer.
    Int,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Pointer-sized unsigned integer.
    Uint,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// Unsigned integer large enough to hold an address.
    Uintptr,
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// Text.
    String,
    /// Date and time.
    Time,
    /// Fixed-length byte array.
    ByteArray(usize),
    /// Variable-length byte sequence.
    ByteSlice,
    /// Any other struct, by type name.
    Struct(String),
    /// Nullable/scanner wrapper; its inner value decides the column type.
    Scanner(Box<FieldKind>),
    /// A kind no dialect knows how to store.
    Unsupported(String),
}

impl FieldKind {
    /// Returns a printable kind name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Bool => "bool".to_string(),
            Self::Int => "int".to_string(),
            Self::Int8 => "int8".to_string(),
            Self::Int16 => "int16".to_string(),
            Self::Int32 => "int32".to_string(),
            Self::Int64 => "int64".to_string(),
            Self::Uint => "uint".to_string(),
            Self::Uint8 => "uint8".to_string(),
            Self::Uint16 => "uint16".to_string(),
            Self::Uint32 => "uint32".to_string(),
            Self::Uint64 => "uint64".to_string(),
            Self::Uintptr => "uintptr".to_string(),
            Self::Float32 => "float32".to_string(),
            Self::Float64 => "float64".to_string(),
            Self::String => "string".to_string(),
            Self::Time => "time".to_string(),
            Self::ByteArray(len) => format!("[{len}]byte"),
            Self::ByteSlice => "[]byte".to_string(),
            Self::Struct(name) | Self::Unsupported(name) => name.clone(),
            Self::Scanner(inner) => format!("scanner({})", inner.name()),
        }
    }

    /// Returns whether this kind is a byte array or byte slice.
    #[must_use]
    pub fn is_bytes(&self) -> bool {
        matches!(self, Self::ByteArray(_) | Self::ByteSlice)
    }

    /// Strips scanner wrappers down to the innermost value kind.
    #[must_use]
    pub fn unwrap_scanner(&self) -> &Self {
        let mut kind = self;
        while let Self::Scanner(inner) = kind {
            kind = inner;
        }
        kind
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Rust types that map onto a [`FieldKind`].
pub trait FieldType {
    /// Returns the kind used for columns of this type.
    fn field_kind() -> FieldKind;
}

macro_rules! impl_field_type {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn field_kind() -> FieldKind {
                    $kind
                }
            }
        )*
    };
}

impl_field_type! {
    bool => FieldKind::Bool,
    isize => FieldKind::Int,
    i8 => FieldKind::Int8,
    i16 => FieldKind::Int16,
    i32 => FieldKind::Int32,
    i64 => FieldKind::Int64,
    usize => FieldKind::Uint,
    u8 => FieldKind::Uint8,
    u16 => FieldKind::Uint16,
    u32 => FieldKind::Uint32,
    u64 => FieldKind::Uint64,
    f32 => FieldKind::Float32,
    f64 => FieldKind::Float64,
    String => FieldKind::String,
    Vec<u8> => FieldKind::ByteSlice,
    chrono::NaiveDateTime => FieldKind::Time,
    chrono::DateTime<chrono::Utc> => FieldKind::Time,
    chrono::DateTime<chrono::Local> => FieldKind::Time,
    chrono::DateTime<chrono::FixedOffset> => FieldKind::Time,
}

impl<const N: usize> FieldType for [u8; N] {
    fn field_kind() -> FieldKind {
        FieldKind::ByteArray(N)
    }
}

// Optional values are stored like the value they wrap.
impl<T: FieldType> FieldType for Option<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

/// Tag settings attached to a field, keyed by upper-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSettings {
    settings: BTreeMap<String, String>,
}

impl TagSettings {
    /// Creates an empty set of tag settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Sets a setting, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    /// Removes a setting, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.settings.remove(key)
    }

    /// Returns whether a setting is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// Returns the number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns whether there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Iterates over settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses a `key:value;key2;...` tag string.
///
/// Keys are trimmed and upper-cased. A key without a value maps to itself,
/// so `not null` yields `NOT NULL => NOT NULL`. Values are kept verbatim and
/// may contain `:`.
#[must_use]
pub fn parse_tag_settings(tag: &str) -> TagSettings {
    let mut settings = TagSettings::new();
    for part in tag.split(';') {
        let mut kv = part.splitn(2, ':');
        let key = kv.next().unwrap_or_default().trim().to_uppercase();
        if key.is_empty() {
            continue;
        }
        let value = kv.next().map_or_else(|| key.clone(), str::to_string);
        settings.set(key, value);
    }
    settings
}

/// Describes one mapped struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Struct field name.
    pub name: String,
    /// Column name.
    pub db_name: String,
    /// Runtime kind of the value.
    pub kind: FieldKind,
    /// Whether this field is the primary key.
    pub is_primary_key: bool,
    /// Tag settings (`SIZE`, `NOT NULL`, `AUTO_INCREMENT`, ...).
    pub tag_settings: TagSettings,
}

impl FieldDescriptor {
    /// Creates a descriptor with the column name derived from `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            db_name: to_db_name(&name),
            name,
            kind,
            is_primary_key: false,
            tag_settings: TagSettings::new(),
        }
    }

    /// Creates a descriptor for a Rust type.
    #[must_use]
    pub fn of<T: FieldType>(name: impl Into<String>) -> Self {
        Self::new(name, T::field_kind())
    }

    /// Marks the field as primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Overrides the column name.
    #[must_use]
    pub fn column(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Adds one tag setting. The key is upper-cased.
    #[must_use]
    pub fn tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tag_settings.set(key.to_uppercase(), value);
        self
    }

    /// Merges settings parsed from a tag string.
    ///
    /// `PRIMARY_KEY` marks the field as primary key and `COLUMN` overrides
    /// the column name.
    #[must_use]
    pub fn tags(mut self, tag: &str) -> Self {
        for (key, value) in parse_tag_settings(tag).iter() {
            self.tag_settings.set(key, value);
        }
        if self.tag_settings.contains("PRIMARY_KEY") {
            self.is_primary_key = true;
        }
        if let Some(column) = self.tag_settings.get("COLUMN") {
            self.db_name = column.to_string();
        }
        self
    }
}

/// Converts a `CamelCase` field name to `snake_case`.
fn to_db_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
