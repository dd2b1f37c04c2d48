//! Behavior flags and their resolution from sandbox options.
//!
//! The sandbox framework hands over a flat string map once at startup.
//! Resolution is layered: a profile default chosen by whether the master
//! toggle is present, then explicit per-key overrides applied on top, in
//! a fixed order. Unrecognized keys are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::WorkflowKind;

/// Master enable/disable toggle. When present, its value drives the
/// three continuous automation flags and disables all workflows; when
/// absent, automation is off and every workflow is armed once.
pub const OPT_MASTER: &str = "human";
/// Per-behavior override for the random pointer movement.
pub const OPT_MOVE_MOUSE: &str = "human.move_mouse";
/// Per-behavior override for the periodic pointer click.
pub const OPT_CLICK_MOUSE: &str = "human.click_mouse";
/// Per-behavior override for the button-click sweep.
pub const OPT_CLICK_BUTTONS: &str = "human.click_buttons";

/// Raw option mapping consumed once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(pub BTreeMap<String, String>);

impl Options {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Boolean coercion for option values: `"0"`, `"false"` and the empty
/// string are false, anything else is true.
fn coerce(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "" | "0" | "false")
}

/// Effective state of one named behavior toggle.
///
/// The one-shot consumption is an explicit transition rather than a
/// mutation buried in the tick loop, so it is testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorFlag {
    Disabled,
    /// Re-evaluated every tick.
    Continuous,
    /// Armed; fires once and becomes [`BehaviorFlag::OneShotDone`].
    OneShotPending,
    /// Fired already; never fires again this run.
    OneShotDone,
}

impl BehaviorFlag {
    pub fn is_active(self) -> bool {
        matches!(self, BehaviorFlag::Continuous | BehaviorFlag::OneShotPending)
    }

    /// Consume a pending one-shot. No effect on other states.
    pub fn complete_one_shot(&mut self) {
        if *self == BehaviorFlag::OneShotPending {
            *self = BehaviorFlag::OneShotDone;
        }
    }

    fn continuous_if(enabled: bool) -> Self {
        if enabled {
            BehaviorFlag::Continuous
        } else {
            BehaviorFlag::Disabled
        }
    }
}

/// The scheduler's live flag table. Built once before the loop enters
/// its run state; only the one-shot consumptions mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagTable {
    pub move_pointer: BehaviorFlag,
    pub click_pointer: BehaviorFlag,
    pub click_buttons: BehaviorFlag,
    workflows: [BehaviorFlag; WorkflowKind::ALL.len()],
}

impl FlagTable {
    /// Resolve the effective flag table from sandbox options.
    ///
    /// Layer 1 is the profile default selected by the presence of
    /// [`OPT_MASTER`]; layer 2 applies the per-key overrides in the
    /// fixed order move, click, buttons.
    pub fn resolve(options: &Options) -> Self {
        let mut table = match options.get(OPT_MASTER) {
            Some(value) => {
                // Automation profile: continuous idle simulation, no
                // scripted application workflows.
                let on = coerce(value);
                FlagTable {
                    move_pointer: BehaviorFlag::continuous_if(on),
                    click_pointer: BehaviorFlag::continuous_if(on),
                    click_buttons: BehaviorFlag::continuous_if(on),
                    workflows: [BehaviorFlag::Disabled; WorkflowKind::ALL.len()],
                }
            }
            None => {
                // Workflow profile: the scripted interactions own the
                // desktop, so the idle simulation stays out of the way.
                FlagTable {
                    move_pointer: BehaviorFlag::Disabled,
                    click_pointer: BehaviorFlag::Disabled,
                    click_buttons: BehaviorFlag::Disabled,
                    workflows: [BehaviorFlag::OneShotPending; WorkflowKind::ALL.len()],
                }
            }
        };

        if let Some(value) = options.get(OPT_MOVE_MOUSE) {
            table.move_pointer = BehaviorFlag::continuous_if(coerce(value));
        }
        if let Some(value) = options.get(OPT_CLICK_MOUSE) {
            table.click_pointer = BehaviorFlag::continuous_if(coerce(value));
        }
        if let Some(value) = options.get(OPT_CLICK_BUTTONS) {
            table.click_buttons = BehaviorFlag::continuous_if(coerce(value));
        }

        table
    }

    pub fn workflow(&self, kind: WorkflowKind) -> BehaviorFlag {
        self.workflows[kind.index()]
    }

    pub fn workflow_mut(&mut self, kind: WorkflowKind) -> &mut BehaviorFlag {
        &mut self.workflows[kind.index()]
    }

    /// The first workflow still armed, in dispatch priority order.
    pub fn next_pending_workflow(&self) -> Option<WorkflowKind> {
        WorkflowKind::ALL
            .into_iter()
            .find(|kind| self.workflow(*kind) == BehaviorFlag::OneShotPending)
    }
}
