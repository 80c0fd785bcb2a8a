//! Tool domain traits
//!
//! Contains pure domain logic for argument validation.
//! Execution lives behind [`ToolHandler`](super::handler::ToolHandler).

use super::entities::{ParamType, ToolArguments, ToolDescriptor};
use thiserror::Error;

/// Why a set of arguments does not satisfy a tool's input schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required parameter '{param}' for tool '{tool}'")]
    MissingParameter { tool: String, param: String },

    #[error("Parameter '{param}' of tool '{tool}' must be of type {expected}")]
    TypeMismatch {
        tool: String,
        param: String,
        expected: ParamType,
    },

    #[error("Parameter '{param}' of tool '{tool}' must be one of [{allowed}]")]
    NotInEnum {
        tool: String,
        param: String,
        allowed: String,
    },

    #[error("Parameter '{param}' of tool '{tool}' is out of range: {value}")]
    OutOfRange {
        tool: String,
        param: String,
        value: f64,
    },
}

/// Validator for tool arguments
///
/// This is a pure domain trait that checks arguments against a
/// descriptor's input schema without any I/O operations.
pub trait ToolValidator {
    /// Validate arguments, returning them coerced to the declared types.
    fn validate(
        &self,
        arguments: &ToolArguments,
        descriptor: &ToolDescriptor,
    ) -> Result<ToolArguments, ValidationError>;
}

/// Default implementation of ToolValidator
///
/// Rejects missing required parameters, coerces each declared argument
/// to its [`ParamType`], then enforces enum membership and numeric bounds.
/// Names the schema does not declare are dropped from the result.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        arguments: &ToolArguments,
        descriptor: &ToolDescriptor,
    ) -> Result<ToolArguments, ValidationError> {
        for param in descriptor.required_parameters() {
            let present = arguments
                .get(&param.name)
                .is_some_and(|v| !v.is_null());
            if !present {
                return Err(ValidationError::MissingParameter {
                    tool: descriptor.name.clone(),
                    param: param.name.clone(),
                });
            }
        }

        let mut coerced = ToolArguments::new();

        for (name, value) in arguments {
            // Undeclared keys are left out of the coerced map
            let Some(param) = descriptor.parameter(name) else {
                continue;
            };

            // Optional parameters may be passed explicitly as null
            if value.is_null() && !param.required {
                continue;
            }

            let value =
                param
                    .param_type
                    .coerce(value)
                    .ok_or_else(|| ValidationError::TypeMismatch {
                        tool: descriptor.name.clone(),
                        param: name.clone(),
                        expected: param.param_type,
                    })?;

            if !param.enum_values.is_empty() {
                let matches = value
                    .as_str()
                    .is_some_and(|s| param.enum_values.iter().any(|e| e == s));
                if !matches {
                    return Err(ValidationError::NotInEnum {
                        tool: descriptor.name.clone(),
                        param: name.clone(),
                        allowed: param.enum_values.join(", "),
                    });
                }
            }

            if let Some(n) = value.as_f64() {
                let below = param.minimum.is_some_and(|min| n < min);
                let above = param.maximum.is_some_and(|max| n > max);
                if below || above {
                    return Err(ValidationError::OutOfRange {
                        tool: descriptor.name.clone(),
                        param: name.clone(),
                        value: n,
                    });
                }
            }

            coerced.insert(name.clone(), value);
        }

        Ok(coerced)
    }
}
