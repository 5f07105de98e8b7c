//! Core types used throughout Entgen
//!
//! This module contains the closed type mapping that replaces the
//! open-ended reflection lookup of the original generator: every
//! language-type name a schema source may declare resolves to exactly
//! one `SystemType` variant, or fails resolution.

use serde::{Deserialize, Serialize};

// ============================================================================
// SystemType
// ============================================================================

/// Generation-target type for a property.
///
/// A column's declared language-type name (a CLR type name such as
/// `"System.Int32"`, or its short alias `"int"`) resolves to exactly one
/// of these variants. Unknown names are a fatal resolution failure, never
/// a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    /// Boolean true/false
    Bool,
    /// 8-bit unsigned integer
    Byte,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point (double precision)
    Float64,
    /// Fixed-point decimal
    Decimal,
    /// Single character
    Char,
    /// Variable-length string
    String,
    /// Date and time
    DateTime,
    /// Date and time with offset
    DateTimeOffset,
    /// Time interval
    TimeSpan,
    /// Globally unique identifier
    Guid,
    /// Binary data
    Bytes,
    /// Untyped object (last-resort mapping)
    Object,
}

impl SystemType {
    /// Resolve a language-type name to a `SystemType`.
    ///
    /// Accepts fully qualified CLR names (`"System.Int32"`) as emitted by
    /// schema readers, and the short keyword aliases (`"int"`). Matching
    /// is case-insensitive on the alias forms. Returns `None` for
    /// anything outside the closed mapping.
    pub fn resolve(name: &str) -> Option<Self> {
        let resolved = match name {
            "System.Boolean" => SystemType::Bool,
            "System.Byte" => SystemType::Byte,
            "System.Int16" => SystemType::Int16,
            "System.Int32" => SystemType::Int32,
            "System.Int64" => SystemType::Int64,
            "System.Single" => SystemType::Float32,
            "System.Double" => SystemType::Float64,
            "System.Decimal" => SystemType::Decimal,
            "System.Char" => SystemType::Char,
            "System.String" => SystemType::String,
            "System.DateTime" => SystemType::DateTime,
            "System.DateTimeOffset" => SystemType::DateTimeOffset,
            "System.TimeSpan" => SystemType::TimeSpan,
            "System.Guid" => SystemType::Guid,
            "System.Byte[]" => SystemType::Bytes,
            "System.Object" => SystemType::Object,
            other => return Self::resolve_alias(other),
        };
        Some(resolved)
    }

    /// Resolve the short keyword aliases (case-insensitive).
    fn resolve_alias(name: &str) -> Option<Self> {
        let resolved = match name.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => SystemType::Bool,
            "byte" => SystemType::Byte,
            "short" | "int16" => SystemType::Int16,
            "int" | "int32" => SystemType::Int32,
            "long" | "int64" => SystemType::Int64,
            "float" | "single" => SystemType::Float32,
            "double" => SystemType::Float64,
            "decimal" => SystemType::Decimal,
            "char" => SystemType::Char,
            "string" => SystemType::String,
            "datetime" => SystemType::DateTime,
            "datetimeoffset" => SystemType::DateTimeOffset,
            "timespan" => SystemType::TimeSpan,
            "guid" => SystemType::Guid,
            "byte[]" | "binary" => SystemType::Bytes,
            "object" => SystemType::Object,
            _ => return None,
        };
        Some(resolved)
    }

    /// The keyword the downstream templates emit for this type.
    pub fn keyword(&self) -> &'static str {
        match self {
            SystemType::Bool => "bool",
            SystemType::Byte => "byte",
            SystemType::Int16 => "short",
            SystemType::Int32 => "int",
            SystemType::Int64 => "long",
            SystemType::Float32 => "float",
            SystemType::Float64 => "double",
            SystemType::Decimal => "decimal",
            SystemType::Char => "char",
            SystemType::String => "string",
            SystemType::DateTime => "DateTime",
            SystemType::DateTimeOffset => "DateTimeOffset",
            SystemType::TimeSpan => "TimeSpan",
            SystemType::Guid => "Guid",
            SystemType::Bytes => "byte[]",
            SystemType::Object => "object",
        }
    }

    /// The fully qualified CLR name for this type.
    pub fn qualified_name(&self) -> &'static str {
        match self {
            SystemType::Bool => "System.Boolean",
            SystemType::Byte => "System.Byte",
            SystemType::Int16 => "System.Int16",
            SystemType::Int32 => "System.Int32",
            SystemType::Int64 => "System.Int64",
            SystemType::Float32 => "System.Single",
            SystemType::Float64 => "System.Double",
            SystemType::Decimal => "System.Decimal",
            SystemType::Char => "System.Char",
            SystemType::String => "System.String",
            SystemType::DateTime => "System.DateTime",
            SystemType::DateTimeOffset => "System.DateTimeOffset",
            SystemType::TimeSpan => "System.TimeSpan",
            SystemType::Guid => "System.Guid",
            SystemType::Bytes => "System.Byte[]",
            SystemType::Object => "System.Object",
        }
    }

    /// Whether this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SystemType::Byte
                | SystemType::Int16
                | SystemType::Int32
                | SystemType::Int64
                | SystemType::Float32
                | SystemType::Float64
                | SystemType::Decimal
        )
    }

    /// Whether this is a date/time type
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SystemType::DateTime | SystemType::DateTimeOffset | SystemType::TimeSpan
        )
    }

    /// Whether this is a reference type in the target language
    /// (value types need a `?` suffix when the column is nullable)
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            SystemType::String | SystemType::Bytes | SystemType::Object
        )
    }

    /// All variants, in declaration order
    pub fn all() -> &'static [SystemType] {
        &[
            SystemType::Bool,
            SystemType::Byte,
            SystemType::Int16,
            SystemType::Int32,
            SystemType::Int64,
            SystemType::Float32,
            SystemType::Float64,
            SystemType::Decimal,
            SystemType::Char,
            SystemType::String,
            SystemType::DateTime,
            SystemType::DateTimeOffset,
            SystemType::TimeSpan,
            SystemType::Guid,
            SystemType::Bytes,
            SystemType::Object,
        ]
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

// ============================================================================
// Tests
// ============================================================================
