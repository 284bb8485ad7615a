//! The fixed set of query tools offered to the intent classifier.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value, json};

use crate::error::DispatchError;
use crate::query::{self, DueInvoice, VendorTotal};
use crate::store::InvoiceStore;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    String,
    Number,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Integer => "integer",
            ParamType::String => "string",
            ParamType::Number => "number",
        }
    }
}

/// Declared parameter of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub required: bool,
    pub description: &'static str,
}

const DAYS_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "days",
    kind: ParamType::Integer,
    required: true,
    description: "The number of days to look ahead for due invoices, e.g. 7 for the next week.",
}];

const VENDOR_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "vendor_name",
    kind: ParamType::String,
    required: true,
    description: "The name of the vendor or company, e.g. Amazon or Microsoft.",
}];

const THRESHOLD_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "threshold",
    kind: ParamType::Number,
    required: true,
    description: "The monetary threshold to filter vendors by, e.g. 2000 for $2000.",
}];

/// A query the classifier may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    InvoicesDueInDays,
    TotalForVendor,
    VendorsAboveAmount,
}

impl Tool {
    /// Every tool, in the order they are offered to the classifier.
    pub const ALL: [Tool; 3] = [
        Tool::InvoicesDueInDays,
        Tool::TotalForVendor,
        Tool::VendorsAboveAmount,
    ];

    /// Wire name used in function-calling requests and responses.
    pub fn name(self) -> &'static str {
        match self {
            Tool::InvoicesDueInDays => "get_invoices_due_in_x_days",
            Tool::TotalForVendor => "get_total_for_vendor",
            Tool::VendorsAboveAmount => "get_vendors_above_amount",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::InvoicesDueInDays => {
                "Get a list of invoices that are due within a specified number of days from today."
            }
            Tool::TotalForVendor => {
                "Get the total monetary value of all invoices from a specific vendor or company."
            }
            Tool::VendorsAboveAmount => {
                "Get all vendors whose total invoice value exceeds a specified amount."
            }
        }
    }

    pub fn parameters(self) -> &'static [ParamSpec] {
        match self {
            Tool::InvoicesDueInDays => DAYS_PARAMS,
            Tool::TotalForVendor => VENDOR_PARAMS,
            Tool::VendorsAboveAmount => THRESHOLD_PARAMS,
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// OpenAI-style function tool definition.
    pub fn to_function_json(self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.parameters() {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.as_str(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(param.name);
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                },
            },
        })
    }

    /// Decode the classifier's JSON argument text into a typed call.
    pub fn parse_call(self, arguments: &str) -> Result<ToolCall, DispatchError> {
        let call = match self {
            Tool::InvoicesDueInDays => {
                let args: DaysArgs = self.decode(arguments)?;
                ToolCall::InvoicesDueInDays { days: args.days }
            }
            Tool::TotalForVendor => {
                let args: VendorArgs = self.decode(arguments)?;
                ToolCall::TotalForVendor {
                    vendor_name: args.vendor_name,
                }
            }
            Tool::VendorsAboveAmount => {
                let args: ThresholdArgs = self.decode(arguments)?;
                ToolCall::VendorsAboveAmount {
                    threshold: args.threshold,
                }
            }
        };
        Ok(call)
    }

    fn decode<T: DeserializeOwned>(self, arguments: &str) -> Result<T, DispatchError> {
        let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
        serde_json::from_str(arguments).map_err(|e| DispatchError::InvalidArguments {
            operation: self.name().to_string(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::from_name(s).ok_or_else(|| DispatchError::UnknownOperation(s.to_string()))
    }
}

#[derive(Deserialize)]
struct DaysArgs {
    days: u32,
}

#[derive(Deserialize)]
struct VendorArgs {
    vendor_name: String,
}

#[derive(Deserialize)]
struct ThresholdArgs {
    #[serde(deserialize_with = "json_number")]
    threshold: Decimal,
}

/// A `Decimal` written as a JSON number; quoted numbers are rejected.
fn json_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let number = Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(de::Error::custom)
}

/// A tool selection with validated arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    InvoicesDueInDays { days: u32 },
    TotalForVendor { vendor_name: String },
    VendorsAboveAmount { threshold: Decimal },
}

impl ToolCall {
    pub fn tool(&self) -> Tool {
        match self {
            ToolCall::InvoicesDueInDays { .. } => Tool::InvoicesDueInDays,
            ToolCall::TotalForVendor { .. } => Tool::TotalForVendor,
            ToolCall::VendorsAboveAmount { .. } => Tool::VendorsAboveAmount,
        }
    }

    /// Run the query against the store.
    pub fn execute<'a>(&self, store: &'a InvoiceStore, today: NaiveDate) -> ToolOutput<'a> {
        match self {
            ToolCall::InvoicesDueInDays { days } => {
                ToolOutput::DueInvoices(query::invoices_due_within(store, *days, today))
            }
            ToolCall::TotalForVendor { vendor_name } => {
                ToolOutput::VendorTotal(query::total_for_vendor(store, vendor_name))
            }
            ToolCall::VendorsAboveAmount { threshold } => {
                ToolOutput::VendorsAbove(query::vendors_above(store, *threshold))
            }
        }
    }
}

/// Raw result of a tool, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput<'a> {
    DueInvoices(Vec<DueInvoice<'a>>),
    VendorTotal(Decimal),
    VendorsAbove(Vec<VendorTotal>),
}

impl ToolOutput<'_> {
    /// Render the result as the final answer text.
    pub fn render(&self) -> String {
        match self {
            ToolOutput::DueInvoices(due) => query::format_due_invoices(due),
            ToolOutput::VendorTotal(total) => query::format_vendor_total(*total),
            ToolOutput::VendorsAbove(vendors) => query::format_vendors_above(vendors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
            assert_eq!(tool.name().parse::<Tool>().unwrap(), tool);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Tool::from_name("delete_all_invoices"), None);
        assert!(matches!(
            "delete_all_invoices".parse::<Tool>(),
            Err(DispatchError::UnknownOperation(name)) if name == "delete_all_invoices"
        ));
    }

    #[test]
    fn test_function_json() {
        let value = Tool::VendorsAboveAmount.to_function_json();

        assert_eq!(
            value,
            json!({
                "type": "function",
                "function": {
                    "name": "get_vendors_above_amount",
                    "description": "Get all vendors whose total invoice value exceeds a specified amount.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "threshold": {
                                "type": "number",
                                "description": "The monetary threshold to filter vendors by, e.g. 2000 for $2000."
                            }
                        },
                        "required": ["threshold"]
                    }
                }
            })
        );
    }

    #[test]
    fn test_parse_calls() {
        assert_eq!(
            Tool::InvoicesDueInDays.parse_call(r#"{"days": 7}"#).unwrap(),
            ToolCall::InvoicesDueInDays { days: 7 }
        );
        assert_eq!(
            Tool::TotalForVendor.parse_call(r#"{"vendor_name": "Amazon"}"#).unwrap(),
            ToolCall::TotalForVendor { vendor_name: "Amazon".to_string() }
        );
        assert_eq!(
            Tool::VendorsAboveAmount.parse_call(r#"{"threshold": 2000}"#).unwrap(),
            ToolCall::VendorsAboveAmount { threshold: Decimal::from(2000) }
        );
        assert_eq!(
            Tool::VendorsAboveAmount.parse_call(r#"{"threshold": 1500.5}"#).unwrap(),
            ToolCall::VendorsAboveAmount { threshold: Decimal::from_str("1500.5").unwrap() }
        );
    }

    #[test]
    fn test_invalid_arguments() {
        for (tool, arguments) in [
            (Tool::InvoicesDueInDays, r#"{"days": -3}"#),
            (Tool::InvoicesDueInDays, r#"{"days": "soon"}"#),
            (Tool::InvoicesDueInDays, ""),
            (Tool::TotalForVendor, r#"{"vendor": "Amazon"}"#),
            (Tool::VendorsAboveAmount, "not json"),
            (Tool::VendorsAboveAmount, r#"{"threshold": "2000"}"#),
        ] {
            let err = tool.parse_call(arguments).unwrap_err();
            let matches_tool = matches!(
                &err,
                DispatchError::InvalidArguments { operation, .. } if operation == tool.name()
            );
            assert!(matches_tool, "unexpected error for {tool}: {err}");
        }
    }
}
