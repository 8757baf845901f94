//! Executes a [`Scenario`] against `fmrt_core::step` and checks its
//! assertions.

use std::fs;
use std::path::Path;

use fmrt_core::reset_state;

use crate::error::HarnessError;
use crate::scenario::Scenario;

pub fn load_scenario(path: &Path) -> Result<Scenario, HarnessError> {
    let text = fs::read_to_string(path)
        .map_err(|source| HarnessError::ScenarioIo { path: path.display().to_string(), source })?;
    Scenario::from_json(&text)
        .map_err(|source| HarnessError::ScenarioParse { path: path.display().to_string(), source })
}

/// Runs `scenario` from the canonical reset state, checking every
/// assertion it declares. Returns `Ok(())` if all declared assertions
/// hold; the first violation is reported as `Err`.
pub fn run_scenario(scenario: &Scenario) -> Result<(), HarnessError> {
    let mut state = reset_state();
    let mut regimes = Vec::with_capacity(scenario.events.len());
    let mut collapses = Vec::with_capacity(scenario.events.len());
    let mut final_mask = 0u8;

    for (i, event) in scenario.events.iter().enumerate() {
        let env = fmrt_core::step(state, event.to_struct_event());
        tracing::trace!(scenario = %scenario.name, step = i, status = ?env.status, "step executed");
        state = env.state;
        regimes.push(env.metrics.regime.map(|r| r.to_string()).unwrap_or_default());
        collapses.push(env.metrics.is_collapse);
        final_mask = env.invariants_mask;
    }

    if let Some(expected) = &scenario.expected_regimes {
        if expected != &regimes {
            tracing::warn!(scenario = %scenario.name, "regime sequence assertion failed");
            return Err(HarnessError::AssertionFailed {
                name: scenario.name.clone(),
                step: regimes.len(),
                detail: format!("expected regimes {expected:?}, got {regimes:?}"),
            });
        }
    }

    if let Some(expected) = &scenario.expected_collapse {
        if expected != &collapses {
            tracing::warn!(scenario = %scenario.name, "collapse sequence assertion failed");
            return Err(HarnessError::AssertionFailed {
                name: scenario.name.clone(),
                step: collapses.len(),
                detail: format!("expected collapse flags {expected:?}, got {collapses:?}"),
            });
        }
    }

    if let Some(expected) = scenario.expected_final_mask {
        if expected != final_mask {
            tracing::warn!(scenario = %scenario.name, "final invariant mask assertion failed");
            return Err(HarnessError::AssertionFailed {
                name: scenario.name.clone(),
                step: scenario.events.len(),
                detail: format!("expected final mask {expected:#010b}, got {final_mask:#010b}"),
            });
        }
    }

    tracing::info!(scenario = %scenario.name, "scenario passed");
    Ok(())
}
