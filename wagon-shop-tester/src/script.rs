//! Replay scripts: a timed sequence of host pushes and user intents plus the state expected at
//! the end.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use wagon_shop_core::{
    HostMessage, LifecyclePhase, RecordingSink, ShopConfig, ShopRuntime, ShopTab, UserIntent,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub config: Option<ShopConfig>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub expect: Expectations,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    /// Raw host push, decoded the same way the browser decodes it
    Inbound(Value),
    Intent(UserIntent),
}

pub fn inbound(at_ms: u64, message: Value) -> Step {
    Step {
        at_ms,
        action: StepAction::Inbound(message),
    }
}

pub fn intent(at_ms: u64, intent: UserIntent) -> Step {
    Step {
        at_ms,
        action: StepAction::Intent(intent),
    }
}

/// Final-state checks. Absent fields are not checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expectations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_plates: Option<Vec<String>>,
    /// Plate to `stored` flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored: Option<BTreeMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_plate: Option<String>,
    /// `open`, `closing` or `closed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<ShopTab>,
    /// Endpoints of every emitted command, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_open: Option<bool>,
}

/// Outcome of replaying one script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub commands: Vec<String>,
    pub failures: Vec<String>,
    pub duration_us: u64,
}

impl Script {
    /// Load a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid script.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse script {}", path.display()))
    }

    /// Replay every step against a fresh runtime and check the expectations.
    #[must_use]
    pub fn run(&self, verbose: bool) -> ScenarioResult {
        let start = Instant::now();
        let sink = RecordingSink::new();
        let config = self.config.clone().unwrap_or_default();
        let mut runtime = ShopRuntime::new(config, sink.clone());
        let mut failures = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            match &step.action {
                StepAction::Inbound(raw) => match HostMessage::from_value(raw.clone()) {
                    Ok(message) => {
                        if verbose {
                            log::info!("[{}] step {index} @{} <- {}", self.name, step.at_ms, message.kind());
                        }
                        runtime.deliver(message, step.at_ms);
                    }
                    Err(err) => failures.push(format!("step {index}: {err}")),
                },
                StepAction::Intent(user) => {
                    if verbose {
                        log::info!("[{}] step {index} @{} -> {user:?}", self.name, step.at_ms);
                    }
                    runtime.perform(user.clone(), step.at_ms);
                }
            }
        }

        let commands: Vec<String> = sink
            .sent()
            .iter()
            .map(|command| command.endpoint().to_string())
            .collect();
        failures.extend(self.expect.check(&runtime, &commands));

        ScenarioResult {
            scenario_name: self.name.clone(),
            passed: failures.is_empty(),
            steps_run: self.steps.len(),
            commands,
            failures,
            duration_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        }
    }
}

fn phase_name(phase: LifecyclePhase) -> &'static str {
    match phase {
        LifecyclePhase::Open => "open",
        LifecyclePhase::Closing { .. } => "closing",
        LifecyclePhase::Closed => "closed",
    }
}

fn compare<T>(failures: &mut Vec<String>, what: &str, expected: Option<&T>, actual: &T)
where
    T: PartialEq + std::fmt::Debug + ?Sized,
{
    if let Some(expected) = expected
        && expected != actual
    {
        failures.push(format!("{what}: expected {expected:?}, got {actual:?}"));
    }
}

impl Expectations {
    #[must_use]
    pub fn check(&self, runtime: &ShopRuntime<RecordingSink>, commands: &[String]) -> Vec<String> {
        let shop = runtime.controller();
        let store = shop.store();
        let mut failures = Vec::new();

        let available: Vec<String> = store.available().iter().map(|w| w.id.clone()).collect();
        compare(&mut failures, "available ids", self.available_ids.as_ref(), &available);

        let display: Vec<String> = shop.display_list().iter().map(|w| w.id.clone()).collect();
        compare(&mut failures, "display ids", self.display_ids.as_ref(), &display);

        let owned: Vec<String> = store.owned().iter().map(|w| w.plate.clone()).collect();
        compare(&mut failures, "owned plates", self.owned_plates.as_ref(), &owned);

        if let Some(expected) = self.stored.as_ref() {
            for (plate, stored) in expected {
                match store.find_owned(plate) {
                    Some(wagon) if wagon.stored == *stored => {}
                    Some(wagon) => failures.push(format!(
                        "stored flag of {plate}: expected {stored}, got {}",
                        wagon.stored
                    )),
                    None => failures.push(format!("stored flag of {plate}: wagon not owned")),
                }
            }
        }

        if let Some(expected) = self.active_plate.as_ref() {
            let active: Vec<&str> = store
                .owned()
                .iter()
                .filter(|w| w.is_active)
                .map(|w| w.plate.as_str())
                .collect();
            if active != [expected.as_str()] {
                failures.push(format!("active plate: expected [{expected}], got {active:?}"));
            }
        }

        compare(
            &mut failures,
            "phase",
            self.phase.as_deref(),
            phase_name(shop.phase()),
        );
        compare(&mut failures, "cash", self.cash.as_ref(), &shop.player_cash());
        compare(&mut failures, "tab", self.tab.as_ref(), &shop.tab());
        compare(&mut failures, "commands", self.commands.as_deref(), commands);
        compare(
            &mut failures,
            "detail open",
            self.detail_open.as_ref(),
            &shop.detail_open(),
        );
        compare(
            &mut failures,
            "transfer open",
            self.transfer_open.as_ref(),
            &shop.transfer_open(),
        );
        failures
    }
}
