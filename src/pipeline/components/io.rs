//! File-backed components: loading documents and pipeline data snapshots.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::pipeline::component::{Component, ComponentParams};
use crate::pipeline::data::PipelineData;

/// Load the source document text from a file into `original_text`.
pub struct LoadTextFromFile {
    path: PathBuf,
}

impl LoadTextFromFile {
    pub const NAME: &'static str = "load_text";
    pub const HELP: &'static str =
        "Load the source document from a text file. Parameters: path=<file>.";

    pub fn from_params(params: &ComponentParams) -> Result<Box<dyn Component>> {
        let path = PathBuf::from(params.require(Self::NAME, "path")?);
        Ok(Box::new(Self { path }))
    }
}

impl Component for LoadTextFromFile {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        data.original_text = fs::read_to_string(&self.path)?;
        Ok(())
    }
}

/// Replace the whole pipeline data record with a JSON snapshot.
pub struct LoadDataFromJson {
    path: PathBuf,
}

impl LoadDataFromJson {
    pub const NAME: &'static str = "load_json";
    pub const HELP: &'static str =
        "Load pipeline data (text, characters, segments) from a JSON file. Parameters: path=<file>.";

    pub fn from_params(params: &ComponentParams) -> Result<Box<dyn Component>> {
        let path = PathBuf::from(params.require(Self::NAME, "path")?);
        Ok(Box::new(Self { path }))
    }
}

impl Component for LoadDataFromJson {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        *data = serde_json::from_str(&contents)?;
        Ok(())
    }
}

/// Write the current pipeline data record to a JSON file.
pub struct SaveDataToJson {
    path: PathBuf,
}

impl SaveDataToJson {
    pub const NAME: &'static str = "save_json";
    pub const HELP: &'static str =
        "Save the current pipeline data to a JSON file. Parameters: path=<file>.";

    pub fn from_params(params: &ComponentParams) -> Result<Box<dyn Component>> {
        let path = PathBuf::from(params.require(Self::NAME, "path")?);
        Ok(Box::new(Self { path }))
    }
}

impl Component for SaveDataToJson {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Print a summary of the pipeline data to stdout.
pub struct PrintData;

impl PrintData {
    pub const NAME: &'static str = "print_data";
    pub const HELP: &'static str = "Print a summary of the pipeline data to stdout.";

    pub fn from_params(_params: &ComponentParams) -> Result<Box<dyn Component>> {
        Ok(Box::new(Self))
    }
}

impl Component for PrintData {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        println!(
            "Document: {} chars, {} characters known",
            data.original_text.chars().count(),
            data.characters.len()
        );
        println!("Segments: {}", data.segments.len());
        for segment in &data.segments {
            let speaker = segment.speaker_id.as_deref().unwrap_or("-");
            println!(
                "  [{}] {:?} ({}): {:?}",
                segment.id, segment.kind, speaker, segment.text
            );
        }
        if let Some(ground_truth) = &data.ground_truth {
            println!("Ground truth: {} segments", ground_truth.len());
        }
        for (key, value) in &data.attributes {
            println!("  {key} = {value}");
        }
        Ok(())
    }
}
