//! Scripted button presses for a simulation run, read from JSON:
//!
//! ```json
//! { "events": [
//!     { "at": "0.00", "action": "start" },
//!     { "at": "3.00", "action": { "latch": "12:34:56.78" } } ] }
//! ```

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use stopwatch_hdl::prelude::Bcd;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Clear,
    /// Loads the value into the digits through the test path.
    Latch(Bcd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Simulated time of the press.
    pub at: Bcd,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// An action bound to the clock cycle (counted from 1) in which the input is
/// held high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stimulus {
    pub cycle: usize,
    pub action: Action,
}

impl Script {
    /// Presses start at time zero and nothing else.
    pub fn start_only() -> Self {
        Self {
            events: vec![Event {
                at: Bcd::ZERO,
                action: Action::Start,
            }],
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;

        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse script {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts event times into clock cycles, ordered by cycle. Events at the
    /// same time keep their script order and are applied in the same cycle.
    pub fn schedule(&self, cycles_per_cs: usize) -> anyhow::Result<Vec<Stimulus>> {
        let mut stimuli = self
            .events
            .iter()
            .map(|event| {
                let Some(cs) = event.at.to_centiseconds() else {
                    bail!("event time {} is not a valid time", event.at);
                };

                Ok(Stimulus {
                    cycle: cs as usize * cycles_per_cs + 1,
                    action: event.action,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        stimuli.sort_by_key(|stimulus| stimulus.cycle);

        Ok(stimuli)
    }
}
