//! Component pipeline: ordered stages over a shared data record.
//!
//! A pipeline is an ordered list of components, each addressed by a
//! registered name plus optional parameters. Components are set up in order
//! first, then run in order, all against the same [`PipelineData`].

pub mod component;
pub mod components;
pub mod data;
pub mod registry;

pub use component::{Component, ComponentParams};
pub use data::{Character, CharacterGender, CharacterKind, PipelineData};
pub use registry::{available_components, create_component, parse_component_string};

use crate::error::Result;

/// An ordered sequence of components executed against one data record.
pub struct Pipeline {
    components: Vec<Box<dyn Component>>,
    quiet: bool,
}

impl Pipeline {
    pub fn new(components: Vec<Box<dyn Component>>) -> Self {
        Self {
            components,
            quiet: false,
        }
    }

    /// Build a pipeline from `name[key=value,...]` component strings.
    pub fn from_component_strings<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let components = specs
            .iter()
            .map(|spec| parse_component_string(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(components))
    }

    /// Suppress per-component progress lines on stderr.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Set up every component, then run them in order.
    pub fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        for (i, component) in self.components.iter_mut().enumerate() {
            if !self.quiet {
                eprintln!("Setting up component {}_{}", component.name(), i);
            }
            component.setup(data)?;
        }
        for (i, component) in self.components.iter_mut().enumerate() {
            if !self.quiet {
                eprintln!("Running component {}_{}", component.name(), i);
            }
            component.run(data)?;
        }
        if !self.quiet {
            eprintln!("Pipeline finished.");
        }
        Ok(())
    }
}
