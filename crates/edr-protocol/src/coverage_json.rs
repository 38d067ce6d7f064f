//! CoverageJSON output for data queries.
//!
//! The envelope produced here is a placeholder: a Grid domain with empty
//! axes and a zero shape, carrying only the parameter metadata. Callers must
//! not expect populated data from [`CoverageJson::encode`], even though it
//! receives the grouped series.
//!
//! Extension point: a full encoder would fill the `t` axis from
//! [`GroupedSeries::distinct_timestamps`](crate::records::GroupedSeries::distinct_timestamps),
//! the `x`/`y` axes from entity locations, and the range values from the
//! grouped series.
//!
//! See: <https://covjson.org/>

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parameters::{LocalizedText, ObservedProperty, Parameter, Unit};
use crate::records::GroupedSeries;

/// A CoverageJSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageJson {
    /// Document type (always "CoverageJSON").
    #[serde(rename = "type")]
    pub type_: String,

    /// The domain defining the coverage's spatial/temporal extent.
    pub domain: Domain,

    /// Parameter definitions keyed by parameter code.
    pub parameters: BTreeMap<String, CovJsonParameter>,

    /// Data ranges keyed by parameter code.
    pub ranges: BTreeMap<String, NdArray>,
}

impl CoverageJson {
    /// Build the envelope for one parameter from grouped records.
    ///
    /// The series are not consulted yet: every axis stays empty and the
    /// range shape is zero.
    pub fn encode(_grouped: &GroupedSeries, parameter: &Parameter) -> Self {
        let code = parameter.code().to_string();

        let mut parameters = BTreeMap::new();
        parameters.insert(code.clone(), CovJsonParameter::from_parameter(parameter));

        let mut ranges = BTreeMap::new();
        ranges.insert(code, NdArray::empty_grid());

        Self {
            type_: "CoverageJSON".to_string(),
            domain: Domain::empty_grid(),
            parameters,
            ranges,
        }
    }
}

/// The domain of a coverage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Domain {
    /// Domain type (always "Domain").
    #[serde(rename = "type")]
    pub type_: String,

    /// The domain type.
    #[serde(rename = "domainType")]
    pub domain_type: DomainType,

    /// Axis definitions.
    pub axes: Axes,

    /// Axis reference systems. Empty while the axes carry no values.
    pub referencing: Vec<serde_json::Value>,
}

impl Domain {
    /// A Grid domain with no axis values.
    pub fn empty_grid() -> Self {
        Self {
            type_: "Domain".to_string(),
            domain_type: DomainType::Grid,
            axes: Axes::default(),
            referencing: Vec::new(),
        }
    }
}

/// Domain types produced by this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DomainType {
    /// Grid over x, y, z and t.
    Grid,
}

/// The four grid axes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Axes {
    pub x: Axis<f64>,
    pub y: Axis<f64>,
    pub z: Axis<f64>,
    pub t: Axis<String>,
}

/// An axis as an explicit list of values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axis<T> {
    pub values: Vec<T>,
}

impl<T> Default for Axis<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T> Axis<T> {
    /// Get the number of values in this axis.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if axis is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parameter in CoverageJSON format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CovJsonParameter {
    /// Type (always "Parameter").
    #[serde(rename = "type")]
    pub type_: String,

    /// Description of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,

    /// Unit of measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    /// The observed property.
    #[serde(rename = "observedProperty")]
    pub observed_property: ObservedProperty,
}

impl CovJsonParameter {
    /// Convert from an EDR Parameter.
    pub fn from_parameter(param: &Parameter) -> Self {
        Self {
            type_: "Parameter".to_string(),
            description: param.description.clone(),
            unit: param.unit.clone(),
            observed_property: param.observed_property.clone(),
        }
    }
}

/// N-dimensional array containing data values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdArray {
    /// Type (always "NdArray").
    #[serde(rename = "type")]
    pub type_: String,

    /// Data type of values.
    #[serde(rename = "dataType")]
    pub data_type: String,

    /// Names of axes in order.
    #[serde(rename = "axisNames")]
    pub axis_names: Vec<String>,

    /// Shape of the array, one entry per axis.
    pub shape: Vec<usize>,

    /// The data values.
    pub values: Vec<f32>,
}

impl NdArray {
    /// A float array over `x, y, z, t` with zero extent on every axis.
    pub fn empty_grid() -> Self {
        Self {
            type_: "NdArray".to_string(),
            data_type: "float".to_string(),
            axis_names: ["x", "y", "z", "t"].iter().map(|s| s.to_string()).collect(),
            shape: vec![0, 0, 0, 0],
            values: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qnh() -> Parameter {
        Parameter::new("QNH", "Atmospheric pressure")
            .with_description("Atmospheric pressure")
            .with_unit(Unit::hectopascals())
    }

    #[test]
    fn test_stub_envelope_shape() {
        let cov = CoverageJson::encode(&GroupedSeries::default(), &qnh());

        assert_eq!(cov.type_, "CoverageJSON");
        assert_eq!(cov.domain.type_, "Domain");
        assert_eq!(cov.domain.domain_type, DomainType::Grid);
        assert!(cov.domain.axes.x.is_empty());
        assert!(cov.domain.axes.y.is_empty());
        assert!(cov.domain.axes.z.is_empty());
        assert!(cov.domain.axes.t.is_empty());
        assert!(cov.domain.referencing.is_empty());

        let range = &cov.ranges["QNH"];
        assert_eq!(range.shape, vec![0, 0, 0, 0]);
        assert_eq!(range.axis_names, vec!["x", "y", "z", "t"]);
        assert!(range.values.is_empty());
        assert!(cov.parameters.contains_key("QNH"));
    }

    #[test]
    fn test_stub_serialization() {
        let cov = CoverageJson::encode(&GroupedSeries::default(), &qnh());
        let json = serde_json::to_value(cov).unwrap();

        assert_eq!(json["type"], "CoverageJSON");
        assert_eq!(json["domain"]["domainType"], "Grid");
        assert_eq!(json["domain"]["axes"]["t"]["values"], serde_json::json!([]));
        assert_eq!(json["domain"]["referencing"], serde_json::json!([]));
        assert_eq!(json["parameters"]["QNH"]["type"], "Parameter");
        assert_eq!(json["parameters"]["QNH"]["unit"]["symbol"], "hPa");
        assert_eq!(json["ranges"]["QNH"]["dataType"], "float");
        assert_eq!(json["ranges"]["QNH"]["shape"], serde_json::json!([0, 0, 0, 0]));
    }

    #[test]
    fn test_parameter_code_keys_both_maps() {
        let tmp = Parameter::new("TMP", "Temperature");
        let cov = CoverageJson::encode(&GroupedSeries::default(), &tmp);
        assert_eq!(cov.parameters.keys().collect::<Vec<_>>(), vec!["TMP"]);
        assert_eq!(cov.ranges.keys().collect::<Vec<_>>(), vec!["TMP"]);
    }

    #[test]
    fn test_envelope_ignores_series_contents() {
        let grouped = GroupedSeries::group(&[
            crate::records::ObservationRecord::new("01", "20250720T0000Z", "1000"),
            crate::records::ObservationRecord::new("02", "20250720T0000Z", "1005"),
        ]);
        assert_eq!(
            CoverageJson::encode(&grouped, &qnh()),
            CoverageJson::encode(&GroupedSeries::default(), &qnh())
        );
    }
}
