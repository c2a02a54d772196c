//! Static registry mapping component names to factory functions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{QuoteweaveError, Result};
use crate::pipeline::component::{Component, ComponentParams};
use crate::pipeline::components::{
    ChunkAttributor, DummyAttributor, EvaluateAttribution, LoadDataFromJson, LoadTextFromFile,
    PrintData, SaveDataToJson,
};

/// Builds a component instance from its parsed parameters.
pub type ComponentFactory = fn(&ComponentParams) -> Result<Box<dyn Component>>;

struct Entry {
    factory: ComponentFactory,
    help: &'static str,
}

fn registry() -> &'static BTreeMap<&'static str, Entry> {
    static REGISTRY: OnceLock<BTreeMap<&'static str, Entry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: BTreeMap<&'static str, Entry> = BTreeMap::new();
        let mut register = |name: &'static str, factory: ComponentFactory, help: &'static str| {
            let previous = map.insert(name, Entry { factory, help });
            debug_assert!(previous.is_none(), "duplicate component name {name}");
        };

        register(
            LoadTextFromFile::NAME,
            LoadTextFromFile::from_params,
            LoadTextFromFile::HELP,
        );
        register(
            LoadDataFromJson::NAME,
            LoadDataFromJson::from_params,
            LoadDataFromJson::HELP,
        );
        register(
            SaveDataToJson::NAME,
            SaveDataToJson::from_params,
            SaveDataToJson::HELP,
        );
        register(PrintData::NAME, PrintData::from_params, PrintData::HELP);
        register(
            DummyAttributor::NAME,
            DummyAttributor::from_params,
            DummyAttributor::HELP,
        );
        register(
            ChunkAttributor::NAME,
            ChunkAttributor::from_params,
            ChunkAttributor::HELP,
        );
        register(
            EvaluateAttribution::NAME,
            EvaluateAttribution::from_params,
            EvaluateAttribution::HELP,
        );
        map
    })
}

/// All registered component names with their help text, sorted by name.
pub fn available_components() -> Vec<(&'static str, &'static str)> {
    registry()
        .iter()
        .map(|(name, entry)| (*name, entry.help))
        .collect()
}

/// Instantiate a registered component by name.
pub fn create_component(name: &str, params: &ComponentParams) -> Result<Box<dyn Component>> {
    let entry = registry()
        .get(name)
        .ok_or_else(|| QuoteweaveError::UnknownComponent {
            name: name.to_string(),
            available: registry()
                .keys()
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        })?;
    (entry.factory)(params)
}

/// Parse a `name[key=value,...]` component string into an instance.
pub fn parse_component_string(input: &str) -> Result<Box<dyn Component>> {
    let (name, params) = match input.split_once('[') {
        Some((name, rest)) => {
            let Some(args) = rest.strip_suffix(']') else {
                return Err(QuoteweaveError::ComponentParse {
                    input: input.to_string(),
                    message: "missing closing ']'".to_string(),
                });
            };
            (name.trim(), ComponentParams::parse(args, name)?)
        }
        None => (input.trim(), ComponentParams::default()),
    };
    create_component(name, &params)
}
