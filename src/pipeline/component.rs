//! Component trait and parameter handling for the pipeline.

use std::collections::HashMap;

use crate::error::{QuoteweaveError, Result};
use crate::pipeline::data::PipelineData;

/// Key/value parameters attached to a component in a pipeline definition,
/// written as `name[key=value,key=value]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentParams {
    values: HashMap<String, String>,
}

impl ComponentParams {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Parse the `key=value,key=value` argument list of a component string.
    pub fn parse(input: &str, component: &str) -> Result<Self> {
        let mut values = HashMap::new();
        for pair in input.split(',').filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(QuoteweaveError::ComponentParse {
                    input: component.to_string(),
                    message: format!(
                        "invalid argument '{pair}', expected 'key=value,key2=value2,...'"
                    ),
                });
            };
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Fetch a required parameter.
    pub fn require(&self, component: &str, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            QuoteweaveError::component(component, format!("missing required parameter '{key}'"))
        })
    }

    /// Fetch an optional numeric parameter, falling back to `default`.
    pub fn get_usize(&self, component: &str, key: &str, default: usize) -> Result<usize> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| {
                QuoteweaveError::component(
                    component,
                    format!("parameter '{key}' must be an integer, got '{raw}'"),
                )
            }),
        }
    }

    /// Fetch an optional boolean parameter, falling back to `default`.
    pub fn get_bool(&self, component: &str, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| {
                QuoteweaveError::component(
                    component,
                    format!("parameter '{key}' must be true or false, got '{raw}'"),
                )
            }),
        }
    }
}

/// One stage of the attribution pipeline.
///
/// Components run in two passes over the shared [`PipelineData`]: `setup`
/// for every component first, then `run` in order.
pub trait Component {
    /// Registered name of the component.
    fn name(&self) -> &str;

    /// Prepare the component; may seed pipeline data.
    fn setup(&mut self, data: &mut PipelineData) -> Result<()> {
        let _ = data;
        Ok(())
    }

    /// Execute the component against the pipeline data.
    fn run(&mut self, data: &mut PipelineData) -> Result<()>;
}
