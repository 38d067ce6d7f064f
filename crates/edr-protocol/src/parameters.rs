//! The measured field of a collection, as published in collection metadata
//! and in CoverageJSON parameter blocks.

use serde::{Deserialize, Serialize};

/// Text published in English only: `{"en": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedText {
    pub en: String,
}

impl LocalizedText {
    pub fn en(text: impl Into<String>) -> Self {
        Self { en: text.into() }
    }
}

/// Unit of a parameter's values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unit {
    pub label: LocalizedText,
    pub symbol: String,
}

impl Unit {
    pub fn new(label: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            label: LocalizedText::en(label),
            symbol: symbol.into(),
        }
    }

    /// Pressure unit of QNH values.
    pub fn hectopascals() -> Self {
        Self::new("Hectopascal", "hPa")
    }
}

/// What a parameter measures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservedProperty {
    pub label: LocalizedText,
}

/// A collection's parameter, keyed by its code (e.g. "QNH").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameter {
    /// Always "Parameter".
    #[serde(rename = "type")]
    pub type_: String,

    pub id: String,

    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,

    #[serde(rename = "observedProperty")]
    pub observed_property: ObservedProperty,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Parameter {
    /// A parameter whose observed property shares its label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            type_: "Parameter".to_string(),
            id: id.into(),
            observed_property: ObservedProperty {
                label: LocalizedText::en(label.clone()),
            },
            label,
            description: None,
            unit: None,
        }
    }

    /// The parameter code.
    pub fn code(&self) -> &str {
        &self.id
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(LocalizedText::en(description));
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_property_follows_label() {
        let param = Parameter::new("QNH", "Atmospheric pressure");
        assert_eq!(param.code(), "QNH");
        assert_eq!(param.observed_property.label.en, "Atmospheric pressure");
        assert!(param.unit.is_none());
    }

    #[test]
    fn test_parameter_serialization() {
        let param = Parameter::new("QNH", "Atmospheric pressure")
            .with_description("Pressure reduced to mean sea level")
            .with_unit(Unit::hectopascals());

        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "Parameter");
        assert_eq!(json["id"], "QNH");
        assert_eq!(json["description"]["en"], "Pressure reduced to mean sea level");
        assert_eq!(json["observedProperty"]["label"]["en"], "Atmospheric pressure");
        assert_eq!(json["unit"], serde_json::json!({"label": {"en": "Hectopascal"}, "symbol": "hPa"}));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_value(Parameter::new("QNH", "Atmospheric pressure")).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("unit").is_none());
    }
}
