//! Machine-readable dump of the model.

use serde::Serialize;
use std::io::Write;

use crate::errors::Result;
use crate::model::{DerivedRates, Model, Parameters, State, STATE_COUNT};

#[derive(Debug, Serialize)]
pub struct StateView {
    pub id: &'static str,
    pub jobs: u8,
    pub phase: Option<u8>,
    pub notation: String,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TransitionView {
    pub from: &'static str,
    pub to: &'static str,
    pub rate: f64,
    pub category: String,
    pub symbol: String,
    pub description: &'static str,
}

/// JSON document layout
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub parameters: Parameters,
    pub rates: DerivedRates,
    pub states: Vec<StateView>,
    pub generator: [[f64; STATE_COUNT]; STATE_COUNT],
    pub adjacency: [[u8; STATE_COUNT]; STATE_COUNT],
    pub transitions: Vec<TransitionView>,
}

impl JsonReport {
    pub fn from_model(model: &Model) -> Self {
        let states = State::ALL
            .into_iter()
            .map(|s| StateView {
                id: s.id(),
                jobs: s.jobs(),
                phase: s.phase().map(|p| p.number()),
                notation: s.notation(),
                description: s.description(),
            })
            .collect();

        let transitions = model
            .transitions
            .iter()
            .map(|t| TransitionView {
                from: t.from.id(),
                to: t.to.id(),
                rate: t.rate,
                category: t.category.name(),
                symbol: t.category.symbol(),
                description: t.category.description(),
            })
            .collect();

        Self {
            parameters: model.parameters,
            rates: model.rates,
            states,
            generator: *model.generator.rows(),
            adjacency: *model.adjacency.rows(),
            transitions,
        }
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_model(&mut self, model: &Model) -> Result<()> {
        let json = serde_json::to_string_pretty(&JsonReport::from_model(model))?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_model;
    use serde_json::Value;

    #[test]
    fn test_json_report_structure() {
        let model = build_model(&Parameters::default()).unwrap();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_model(&model).unwrap();

        let json: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json["states"].as_array().unwrap().len(), 7);
        assert_eq!(json["transitions"].as_array().unwrap().len(), 20);
        assert_eq!(json["generator"].as_array().unwrap().len(), 7);
        assert_eq!(json["states"][0]["notation"], "(0,-)");
        assert_eq!(json["states"][0]["phase"], Value::Null);
        assert_eq!(json["transitions"][0]["category"], "arrival-phase-1");
        assert_eq!(
            json["transitions"][0]["description"],
            "arrival, service starts in phase 1"
        );
        assert_eq!(json["adjacency"][5][3], 1);
    }
}
