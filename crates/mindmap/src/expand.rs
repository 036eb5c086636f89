//! Bounded auto-expand loop.
//!
//! Interactive renderers may collapse branches of a mindmap. Before a scene
//! is read, an embedder can drive its UI through an [`Expander`] so every
//! branch is rendered. [`ensure_expanded`] repeats discovery and triggering
//! for a bounded number of passes, waiting between passes for the UI to
//! settle.

use std::{thread, time::Duration};

use log::{debug, info, warn};
use serde::Deserialize;

/// Access to the collapsed toggles of an interactive mindmap.
pub trait Expander {
    /// Handle to one collapsed toggle.
    type Toggle;

    /// Every toggle currently collapsed.
    fn find_collapsed(&mut self) -> Vec<Self::Toggle>;

    /// Activates `toggle`. Returns whether an action was actually triggered.
    fn trigger(&mut self, toggle: &Self::Toggle) -> bool;
}

/// Bounds for [`ensure_expanded`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExpandPolicy {
    max_passes: usize,
    pass_delay_ms: u64,
}

impl Default for ExpandPolicy {
    fn default() -> Self {
        Self {
            max_passes: 6,
            pass_delay_ms: 350,
        }
    }
}

impl ExpandPolicy {
    pub fn new(max_passes: usize, pass_delay: Duration) -> Self {
        Self {
            max_passes,
            pass_delay_ms: u64::try_from(pass_delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Time to wait after a pass before looking for toggles again.
    pub fn pass_delay(&self) -> Duration {
        Duration::from_millis(self.pass_delay_ms)
    }
}

/// Expands every collapsed branch reachable within `policy`'s bounds.
///
/// Stops early when no collapsed toggle remains or when a pass triggers
/// nothing. Returns the total number of triggered toggles.
pub fn ensure_expanded<E>(expander: &mut E, policy: &ExpandPolicy) -> usize
where
    E: Expander + ?Sized,
{
    let mut total = 0;

    for pass in 0..policy.max_passes() {
        let toggles = expander.find_collapsed();
        if toggles.is_empty() {
            if pass == 0 {
                debug!("No collapsed toggles found");
            } else {
                info!(passes = pass; "All toggles expanded");
            }
            break;
        }

        let triggered = toggles
            .iter()
            .filter(|toggle| expander.trigger(toggle))
            .count();
        total += triggered;
        debug!(
            pass = pass + 1,
            attempted = toggles.len(),
            triggered = triggered;
            "Auto-expand pass finished"
        );

        if triggered == 0 {
            warn!(pass = pass + 1; "Auto-expand pass triggered nothing, stopping");
            break;
        }

        thread::sleep(policy.pass_delay());
    }

    total
}
