//! Declarative scenario fixtures: an initial event sequence plus the
//! per-run assertions a conformant engine must satisfy.

use serde::Deserialize;

use fmrt_core::StructEvent;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Update,
    Gap,
    Heartbeat,
    Reset,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub dt: f64,
    #[serde(default)]
    pub stimulus: [f64; 4],
}

impl ScenarioEvent {
    pub fn to_struct_event(&self) -> StructEvent {
        match self.kind {
            EventKind::Update => StructEvent::Update { stimulus: self.stimulus, dt: self.dt },
            EventKind::Gap => StructEvent::Gap { dt: self.dt },
            EventKind::Heartbeat => StructEvent::Heartbeat { dt: self.dt },
            EventKind::Reset => StructEvent::Reset { dt: self.dt },
        }
    }
}

/// A scenario: a name, the event sequence to run from the canonical reset
/// state, and the assertions expected to hold once it's run.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub events: Vec<ScenarioEvent>,
    #[serde(default)]
    pub expected_regimes: Option<Vec<String>>,
    #[serde(default)]
    pub expected_collapse: Option<Vec<bool>>,
    #[serde(default)]
    pub expected_final_mask: Option<u8>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_scenario() {
        let text = r#"{
            "name": "basic-update",
            "events": [{"kind": "update", "dt": 1.0, "stimulus": [1.0, 0.0, 0.0, 0.0]}],
            "expected_regimes": ["ACC"]
        }"#;
        let scenario = Scenario::from_json(text).unwrap();
        assert_eq!(scenario.name, "basic-update");
        assert_eq!(scenario.events.len(), 1);
        assert_eq!(scenario.expected_regimes, Some(vec!["ACC".to_string()]));
    }

    #[test]
    fn defaults_dt_and_stimulus_for_reset_events() {
        let text = r#"{"name": "bare-reset", "events": [{"kind": "reset"}]}"#;
        let scenario = Scenario::from_json(text).unwrap();
        assert_eq!(scenario.events[0].dt, 0.0);
        assert_eq!(scenario.events[0].stimulus, [0.0; 4]);
    }
}
