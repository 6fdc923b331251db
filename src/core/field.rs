//! Field descriptors, field specifications and value formats
//!
//! A field is declared either as a bare name (`"email"`) or as a set of
//! options. Both shapes are normalized once into a [`FieldDescriptor`];
//! nothing downstream needs to know which shape was used.

use crate::core::error::ConfigurationError;
use crate::core::naming;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

/// The closed set of field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Textarea,
    Boolean,
    Currency,
    Date,
    Datetime,
    Enum,
    Lookup,
}

impl FieldType {
    pub const ALL: [FieldType; 10] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Textarea,
        FieldType::Boolean,
        FieldType::Currency,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Enum,
        FieldType::Lookup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Textarea => "textarea",
            FieldType::Boolean => "boolean",
            FieldType::Currency => "currency",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Enum => "enum",
            FieldType::Lookup => "lookup",
        }
    }

    /// Infer a type from a field name
    ///
    /// Only the email heuristic applies: any name containing "email"
    /// becomes an email field, everything else is plain text.
    pub fn infer_from_name(name: &str) -> Self {
        if name.to_ascii_lowercase().contains("email") {
            FieldType::Email
        } else {
            FieldType::Text
        }
    }

    fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Textarea
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// A typed default value
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Format checks for string-typed field values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
    Phone,
}

impl FieldFormat {
    /// Check a raw string against this format
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Phone => Self::is_valid_phone(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is valid")
        });
        regex.is_match(email)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // 7 to 15 digits after separators are stripped (E.164 upper bound)
            Regex::new(r"^\+?\d{7,15}$").expect("phone pattern is valid")
        });
        let compact: String = phone
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        regex.is_match(&compact)
    }
}

/// Explicit field options
///
/// Mirrors the recognized option keys of a field declaration. Every key is
/// optional; the builder methods exist for declaring fields in code, while
/// manifests deserialize straight into this struct.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldOptions {
    pub name: String,

    #[serde(rename = "type", default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub required: Option<bool>,

    #[serde(default)]
    pub optional: Option<bool>,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,

    #[serde(default)]
    pub lookup: Option<String>,

    #[serde(default)]
    pub display: Option<String>,

    #[serde(default)]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub readonly: bool,

    #[serde(default)]
    pub hidden_in_form: bool,
}

impl FieldOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn of_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = Some(true);
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn lookup(mut self, target: impl Into<String>) -> Self {
        self.lookup = Some(target.into());
        self
    }

    pub fn display(mut self, field: impl Into<String>) -> Self {
        self.display = Some(field.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn hidden_in_form(mut self) -> Self {
        self.hidden_in_form = true;
        self
    }
}

/// A field as declared: a bare name or explicit options
///
/// Deserializes from a string or a map. Errors inside an options map (an
/// unknown key, a wrong value type) are reported as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Bare(String),
    Options(FieldOptions),
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldSpecVisitor;

        impl<'de> Visitor<'de> for FieldSpecVisitor {
            type Value = FieldSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field name or a map of field options")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<FieldSpec, E> {
                Ok(FieldSpec::Bare(name.to_string()))
            }

            fn visit_string<E: de::Error>(self, name: String) -> Result<FieldSpec, E> {
                Ok(FieldSpec::Bare(name))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<FieldSpec, A::Error> {
                FieldOptions::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(FieldSpec::Options)
            }
        }

        deserializer.deserialize_any(FieldSpecVisitor)
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        FieldSpec::Bare(name.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        FieldSpec::Bare(name)
    }
}

impl From<FieldOptions> for FieldSpec {
    fn from(options: FieldOptions) -> Self {
        FieldSpec::Options(options)
    }
}

/// Target of a lookup field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupTarget {
    pub module: String,
    pub display_field: String,
}

/// Normalized description of one column
///
/// Invariant: `enum_values` is set iff the type is `enum`, `lookup` is set
/// iff the type is `lookup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    name: String,
    label: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<LookupTarget>,
    readonly: bool,
    hidden_in_form: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
}

impl FieldDescriptor {
    /// Normalize a bare field name
    pub fn bare(name: impl Into<String>) -> Result<Self, ConfigurationError> {
        let name = name.into();
        ensure_name(&name)?;
        Ok(Self {
            label: naming::humanize(&name),
            field_type: FieldType::infer_from_name(&name),
            name,
            required: false,
            default: None,
            enum_values: None,
            lookup: None,
            readonly: false,
            hidden_in_form: false,
            placeholder: None,
        })
    }

    /// Normalize explicit options
    pub fn from_options(options: FieldOptions) -> Result<Self, ConfigurationError> {
        let FieldOptions {
            name,
            type_name,
            required,
            optional,
            default,
            enum_values,
            lookup,
            display,
            placeholder,
            readonly,
            hidden_in_form,
        } = options;

        ensure_name(&name)?;

        if required == Some(true) && optional == Some(true) {
            return Err(ConfigurationError::ConflictingRequirement { field: name });
        }

        let field_type = match type_name {
            Some(t) => t
                .parse::<FieldType>()
                .map_err(|type_name| ConfigurationError::UnknownFieldType {
                    field: name.clone(),
                    type_name,
                })?,
            None if enum_values.is_some() => FieldType::Enum,
            None if lookup.is_some() => FieldType::Lookup,
            None => FieldType::infer_from_name(&name),
        };

        let enum_values = match (field_type, enum_values) {
            (FieldType::Enum, Some(values)) if values.is_empty() => {
                return Err(ConfigurationError::EmptyEnum { field: name });
            }
            (FieldType::Enum, Some(values)) => Some(values),
            (FieldType::Enum, None) => {
                return Err(ConfigurationError::InconsistentField {
                    field: name,
                    message: "type 'enum' requires enum values".to_string(),
                });
            }
            (other, Some(_)) => {
                return Err(ConfigurationError::InconsistentField {
                    field: name,
                    message: format!("enum values given for type '{}'", other),
                });
            }
            (_, None) => None,
        };

        let lookup = match (field_type, lookup, display) {
            (FieldType::Lookup, Some(target), Some(display_field)) => Some(LookupTarget {
                module: target,
                display_field,
            }),
            (FieldType::Lookup, Some(target), None) => {
                return Err(ConfigurationError::LookupWithoutDisplay {
                    field: name,
                    target,
                });
            }
            (FieldType::Lookup, None, _) => {
                return Err(ConfigurationError::InconsistentField {
                    field: name,
                    message: "type 'lookup' requires a lookup target".to_string(),
                });
            }
            (other, Some(_), _) => {
                return Err(ConfigurationError::InconsistentField {
                    field: name,
                    message: format!("lookup target given for type '{}'", other),
                });
            }
            (_, None, Some(display)) => {
                return Err(ConfigurationError::DisplayWithoutLookup {
                    field: name,
                    display,
                });
            }
            (_, None, None) => None,
        };

        let default = match default {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(coerce_default(
                &name,
                field_type,
                enum_values.as_deref(),
                value,
            )?),
        };

        Ok(Self {
            label: naming::humanize(&name),
            name,
            field_type,
            required: required.unwrap_or(false),
            default,
            enum_values,
            lookup,
            readonly,
            hidden_in_form,
            placeholder,
        })
    }

    /// Normalize either shape of field declaration
    pub fn from_spec(spec: FieldSpec) -> Result<Self, ConfigurationError> {
        match spec {
            FieldSpec::Bare(name) => Self::bare(name),
            FieldSpec::Options(options) => Self::from_options(options),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable label (`first_name` → `First Name`)
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        self.enum_values.as_deref()
    }

    pub fn lookup(&self) -> Option<&LookupTarget> {
        self.lookup.as_ref()
    }

    pub fn lookup_target(&self) -> Option<&str> {
        self.lookup.as_ref().map(|l| l.module.as_str())
    }

    pub fn display_field(&self) -> Option<&str> {
        self.lookup.as_ref().map(|l| l.display_field.as_str())
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn is_hidden_in_form(&self) -> bool {
        self.hidden_in_form
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Check one submitted value against this descriptor
    ///
    /// `Null` and empty strings count as absent. Absent values only fail
    /// when the field is required and not readonly.
    pub fn validate_value(&self, value: &serde_json::Value) -> Result<(), String> {
        use serde_json::Value;

        let absent = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if absent {
            return if self.required && !self.readonly {
                Err("is required".to_string())
            } else {
                Ok(())
            };
        }

        match (self.field_type, value) {
            (FieldType::Text | FieldType::Textarea, Value::String(_) | Value::Number(_)) => Ok(()),
            (FieldType::Email, Value::String(s)) if FieldFormat::Email.matches(s) => Ok(()),
            (FieldType::Email, _) => Err("must be a valid email address".to_string()),
            (FieldType::Phone, Value::String(s)) if FieldFormat::Phone.matches(s) => Ok(()),
            (FieldType::Phone, _) => Err("must be a valid phone number".to_string()),
            (FieldType::Boolean, Value::Bool(_)) => Ok(()),
            (FieldType::Currency, Value::Number(_)) => Ok(()),
            (FieldType::Currency, _) => Err("must be a number".to_string()),
            (FieldType::Date, Value::String(s)) if parse_date(s).is_some() => Ok(()),
            (FieldType::Date, _) => Err("must be a date (YYYY-MM-DD)".to_string()),
            (FieldType::Datetime, Value::String(s)) if parse_datetime(s).is_some() => Ok(()),
            (FieldType::Datetime, _) => Err("must be an ISO 8601 datetime".to_string()),
            (FieldType::Enum, Value::String(s))
                if self.enum_values.iter().flatten().any(|v| v == s) =>
            {
                Ok(())
            }
            (FieldType::Enum, _) => Err(format!(
                "must be one of: {}",
                self.enum_values.as_deref().unwrap_or_default().join(", ")
            )),
            (FieldType::Lookup, Value::String(s)) if Uuid::parse_str(s).is_ok() => Ok(()),
            (FieldType::Lookup, _) => Err("must reference a record id".to_string()),
            (t, _) => Err(format!("is not a valid {} value", t)),
        }
    }
}

impl TryFrom<FieldSpec> for FieldDescriptor {
    type Error = ConfigurationError;

    fn try_from(spec: FieldSpec) -> Result<Self, Self::Error> {
        Self::from_spec(spec)
    }
}

fn ensure_name(name: &str) -> Result<(), ConfigurationError> {
    if name.trim().is_empty() {
        Err(ConfigurationError::EmptyName { kind: "field" })
    } else {
        Ok(())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn coerce_default(
    field: &str,
    field_type: FieldType,
    enum_values: Option<&[String]>,
    value: serde_json::Value,
) -> Result<FieldValue, ConfigurationError> {
    use serde_json::Value;

    let invalid = |message: String| ConfigurationError::InvalidDefault {
        field: field.to_string(),
        message,
    };

    match (field_type, value) {
        (FieldType::Boolean, Value::Bool(b)) => Ok(FieldValue::Boolean(b)),
        (FieldType::Boolean, other) => Err(invalid(format!("expected a boolean, got {}", other))),

        (FieldType::Currency, Value::Number(n)) => Ok(number_value(&n)),
        (FieldType::Currency, other) => Err(invalid(format!("expected a number, got {}", other))),

        (FieldType::Date, Value::String(s)) => parse_date(&s)
            .map(FieldValue::Date)
            .ok_or_else(|| invalid(format!("'{}' is not a YYYY-MM-DD date", s))),
        (FieldType::Date, other) => Err(invalid(format!("expected a date string, got {}", other))),

        (FieldType::Datetime, Value::String(s)) => parse_datetime(&s)
            .map(FieldValue::DateTime)
            .ok_or_else(|| invalid(format!("'{}' is not an ISO 8601 datetime", s))),
        (FieldType::Datetime, other) => Err(invalid(format!(
            "expected a datetime string, got {}",
            other
        ))),

        (FieldType::Enum, Value::String(s)) => {
            if enum_values.unwrap_or_default().contains(&s) {
                Ok(FieldValue::String(s))
            } else {
                Err(invalid(format!("'{}' is not one of the enum values", s)))
            }
        }
        (FieldType::Enum, other) => Err(invalid(format!("expected an enum value, got {}", other))),

        (FieldType::Lookup, _) => Err(invalid("lookup fields take no default".to_string())),

        (t, Value::String(s)) if t.is_textual() => Ok(FieldValue::String(s)),
        (t, Value::Number(n)) if t.is_textual() => Ok(number_value(&n)),
        (t, Value::Bool(b)) if t.is_textual() => Ok(FieldValue::Boolean(b)),
        (t, other) => Err(invalid(format!("{} is not a scalar for type '{}'", other, t))),
    }
}

fn number_value(n: &serde_json::Number) -> FieldValue {
    match n.as_i64() {
        Some(i) => FieldValue::Integer(i),
        None => FieldValue::Float(n.as_f64().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_name_defaults() {
        let field = FieldDescriptor::bare("company").unwrap();
        assert_eq!(field.name(), "company");
        assert_eq!(field.label(), "Company");
        assert_eq!(field.field_type(), FieldType::Text);
        assert!(!field.is_required());
        assert!(field.default_value().is_none());
        assert!(field.enum_values().is_none());
        assert!(field.lookup().is_none());
    }

    #[test]
    fn test_bare_email_is_inferred() {
        assert_eq!(
            FieldDescriptor::bare("email").unwrap().field_type(),
            FieldType::Email
        );
        assert_eq!(
            FieldDescriptor::bare("work_email").unwrap().field_type(),
            FieldType::Email
        );
        assert_eq!(
            FieldDescriptor::bare("phone").unwrap().field_type(),
            FieldType::Text
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(
            FieldDescriptor::bare("  ").unwrap_err(),
            ConfigurationError::EmptyName { kind: "field" }
        );
    }

    #[test]
    fn test_enum_values_keep_order() {
        let field = FieldDescriptor::from_options(
            FieldOptions::new("payment_terms")
                .enum_values(["Net 15", "Net 30", "Net 60", "COD"])
                .default_value("Net 30"),
        )
        .unwrap();

        assert_eq!(field.field_type(), FieldType::Enum);
        assert_eq!(
            field.enum_values().unwrap(),
            &["Net 15", "Net 30", "Net 60", "COD"]
        );
        assert_eq!(
            field.default_value(),
            Some(&FieldValue::String("Net 30".to_string()))
        );
    }

    #[test]
    fn test_empty_enum_is_rejected() {
        let err = FieldDescriptor::from_options(
            FieldOptions::new("status").enum_values(Vec::<String>::new()),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyEnum { .. }));
    }

    #[test]
    fn test_enum_default_must_be_a_member() {
        let err = FieldDescriptor::from_options(
            FieldOptions::new("priority")
                .enum_values(["Low", "High"])
                .default_value("Urgent"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidDefault { .. }));
    }

    #[test]
    fn test_lookup_requires_display() {
        let err =
            FieldDescriptor::from_options(FieldOptions::new("company").lookup("companies"))
                .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::LookupWithoutDisplay {
                field: "company".to_string(),
                target: "companies".to_string(),
            }
        );
    }

    #[test]
    fn test_lookup_descriptor() {
        let field = FieldDescriptor::from_options(
            FieldOptions::new("company")
                .lookup("companies")
                .display("name"),
        )
        .unwrap();
        assert_eq!(field.field_type(), FieldType::Lookup);
        assert_eq!(field.lookup_target(), Some("companies"));
        assert_eq!(field.display_field(), Some("name"));
        assert!(field.enum_values().is_none());
    }

    #[test]
    fn test_display_without_lookup_is_rejected() {
        let err = FieldDescriptor::from_options(FieldOptions::new("company").display("name"))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DisplayWithoutLookup { .. }));
    }

    #[test]
    fn test_required_and_optional_conflict() {
        let err =
            FieldDescriptor::from_options(FieldOptions::new("name").required().optional())
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::ConflictingRequirement { .. }
        ));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = FieldDescriptor::from_options(FieldOptions::new("age").of_type("integer"))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownFieldType {
                field: "age".to_string(),
                type_name: "integer".to_string(),
            }
        );
    }

    #[test]
    fn test_type_contradicting_enum_is_rejected() {
        let err = FieldDescriptor::from_options(
            FieldOptions::new("status")
                .of_type("text")
                .enum_values(["A"]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InconsistentField { .. }));

        let err = FieldDescriptor::from_options(FieldOptions::new("status").of_type("enum"))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InconsistentField { .. }));
    }

    #[test]
    fn test_typed_defaults() {
        let flag = FieldDescriptor::from_options(
            FieldOptions::new("is_active")
                .of_type("boolean")
                .default_value(true),
        )
        .unwrap();
        assert_eq!(flag.default_value().and_then(FieldValue::as_bool), Some(true));

        let credit = FieldDescriptor::from_options(
            FieldOptions::new("credit_limit")
                .of_type("currency")
                .default_value(0),
        )
        .unwrap();
        assert_eq!(credit.default_value(), Some(&FieldValue::Integer(0)));

        let quantity =
            FieldDescriptor::from_options(FieldOptions::new("stock_quantity").default_value(10))
                .unwrap();
        assert_eq!(quantity.field_type(), FieldType::Text);
        assert_eq!(quantity.default_value().and_then(FieldValue::as_integer), Some(10));

        let launch = FieldDescriptor::from_options(
            FieldOptions::new("launch_date")
                .of_type("date")
                .default_value("2024-03-01"),
        )
        .unwrap();
        assert_eq!(
            launch.default_value(),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
        );
    }

    #[test]
    fn test_mistyped_defaults_are_rejected() {
        let err = FieldDescriptor::from_options(
            FieldOptions::new("is_active")
                .of_type("boolean")
                .default_value("yes"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidDefault { .. }));

        let err = FieldDescriptor::from_options(
            FieldOptions::new("created")
                .of_type("datetime")
                .default_value("yesterday"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidDefault { .. }));
    }

    #[test]
    fn test_ui_hints_pass_through() {
        let field = FieldDescriptor::from_options(
            FieldOptions::new("created_date")
                .of_type("datetime")
                .readonly()
                .hidden_in_form(),
        )
        .unwrap();
        assert!(field.is_readonly());
        assert!(field.is_hidden_in_form());

        let sku = FieldDescriptor::from_options(FieldOptions::new("sku").placeholder("PROD-001"))
            .unwrap();
        assert_eq!(sku.placeholder(), Some("PROD-001"));
    }

    #[test]
    fn test_field_spec_deserializes_both_shapes() {
        let specs: Vec<FieldSpec> = serde_json::from_value(json!([
            "email",
            { "name": "status", "enum": ["Active", "Inactive"], "default": "Active" }
        ]))
        .unwrap();

        assert_eq!(specs[0], FieldSpec::Bare("email".to_string()));
        let FieldSpec::Options(options) = &specs[1] else {
            panic!("expected options");
        };
        assert_eq!(options.name, "status");
        assert_eq!(options.default, Some(json!("Active")));
    }

    #[test]
    fn test_field_spec_reports_unknown_option_key() {
        let err = serde_json::from_value::<FieldSpec>(json!({ "name": "sku", "requried": true }))
            .unwrap_err();
        assert!(err.to_string().contains("unknown field `requried`"), "{}", err);

        let err = serde_json::from_value::<FieldSpec>(json!(42)).unwrap_err();
        assert!(err.to_string().contains("a field name or a map of field options"));
    }

    #[test]
    fn test_email_format() {
        assert!(FieldFormat::Email.matches("test@example.com"));
        assert!(FieldFormat::Email.matches("user.name+tag@example.co.uk"));
        assert!(!FieldFormat::Email.matches("invalid-email"));
        assert!(!FieldFormat::Email.matches("@example.com"));
    }

    #[test]
    fn test_phone_format() {
        assert!(FieldFormat::Phone.matches("+33612345678"));
        assert!(FieldFormat::Phone.matches("(555) 123-4567"));
        assert!(!FieldFormat::Phone.matches("123"));
        assert!(!FieldFormat::Phone.matches("call me"));
    }

    #[test]
    fn test_validate_value() {
        let email = FieldDescriptor::from_options(
            FieldOptions::new("email").of_type("email").required(),
        )
        .unwrap();
        assert!(email.validate_value(&json!("a@b.io")).is_ok());
        assert_eq!(email.validate_value(&json!(null)).unwrap_err(), "is required");
        assert!(email.validate_value(&json!("nope")).is_err());

        let status = FieldDescriptor::from_options(
            FieldOptions::new("status").enum_values(["Active", "Inactive"]),
        )
        .unwrap();
        assert!(status.validate_value(&json!("Active")).is_ok());
        assert!(status.validate_value(&json!("Gone")).is_err());
        assert!(status.validate_value(&json!(null)).is_ok());

        let company = FieldDescriptor::from_options(
            FieldOptions::new("company")
                .lookup("companies")
                .display("name"),
        )
        .unwrap();
        assert!(company
            .validate_value(&json!(Uuid::new_v4().to_string()))
            .is_ok());
        assert!(company.validate_value(&json!(42)).is_err());
    }

    #[test]
    fn test_descriptor_serialization() {
        let field = FieldDescriptor::from_options(
            FieldOptions::new("supplier")
                .lookup("suppliers")
                .display("company_name"),
        )
        .unwrap();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "lookup");
        assert_eq!(json["lookup"]["module"], "suppliers");
        assert_eq!(json["lookup"]["display_field"], "company_name");
        assert!(json.get("enum_values").is_none());
    }
}
