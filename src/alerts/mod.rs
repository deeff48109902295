//! Life-limit evaluation.
//!
//! Walks one or many engine trees and produces a ranked list of components
//! approaching or past their tracked life limit. Read-only: evaluation
//! never mutates an engine and has no side effects beyond logging.

use crate::error::{FleetError, Result};
use crate::model::Engine;
use serde::Serialize;
use std::cmp::Ordering;

/// Default alert threshold in hours remaining.
///
/// The historical business constant; callers can override it per query or
/// through configuration.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 50.0;

/// Urgency band for one alert, derived from hours remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Past the life limit; the part should not be operating.
    Overdue,
    /// Inside the last fifth of the alert threshold.
    Critical,
    /// Inside the alert threshold.
    Watch,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overdue => write!(f, "OVERDUE"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Watch => write!(f, "WATCH"),
        }
    }
}

/// One component approaching or past its life limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeLimitAlert {
    pub engine_id: u64,
    pub engine_name: String,
    pub component_id: u64,
    pub serial_number: String,
    pub part_number: String,
    pub description: String,
    pub current_hours: f64,
    pub life_limit: f64,
    /// `life_limit - current_hours`; negative when overdue.
    pub remaining: f64,
    pub severity: AlertSeverity,
}

/// Produces ranked life-limit alerts across a fleet.
#[derive(Debug, Clone, Copy)]
pub struct LifeLimitEvaluator {
    threshold: f64,
}

impl Default for LifeLimitEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_THRESHOLD)
    }
}

impl LifeLimitEvaluator {
    /// Create an evaluator alerting below `threshold` hours remaining.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate one engine. Fails with a validation error when the tree is
    /// malformed (duplicate node ids); that is a defect of the stored
    /// tree, not of the evaluator.
    pub fn evaluate_engine(&self, engine: &Engine) -> Result<Vec<LifeLimitAlert>> {
        if let Err(dup) = engine.components.validate() {
            return Err(FleetError::Validation(format!(
                "engine {} tree has duplicate component id {dup}",
                engine.id
            )));
        }

        let mut alerts = Vec::new();
        for component in engine.components.flatten() {
            if !component.is_life_limited() {
                continue;
            }
            let remaining = component.life_limit - component.current_hours;
            if remaining >= self.threshold {
                continue;
            }
            alerts.push(LifeLimitAlert {
                engine_id: engine.id,
                engine_name: engine.name.clone(),
                component_id: component.id,
                serial_number: component.serial_number.clone(),
                part_number: component.part_number.clone(),
                description: component.description.clone(),
                current_hours: component.current_hours,
                life_limit: component.life_limit,
                remaining,
                severity: self.severity_of(remaining),
            });
        }
        Ok(alerts)
    }

    /// Evaluate many engines and rank the combined result: most urgent
    /// first, overdue parts before everything else. Ties break by engine
    /// id then serial so the ranking is deterministic.
    pub fn evaluate_fleet<'a>(
        &self,
        engines: impl IntoIterator<Item = &'a Engine>,
    ) -> Result<Vec<LifeLimitAlert>> {
        let mut alerts = Vec::new();
        for engine in engines {
            alerts.extend(self.evaluate_engine(engine)?);
        }

        alerts.sort_by(|a, b| {
            a.remaining
                .partial_cmp(&b.remaining)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.engine_id.cmp(&b.engine_id))
                .then_with(|| a.serial_number.cmp(&b.serial_number))
        });

        tracing::debug!(alerts = alerts.len(), threshold = self.threshold, "fleet evaluated");
        Ok(alerts)
    }

    fn severity_of(&self, remaining: f64) -> AlertSeverity {
        if remaining <= 0.0 {
            AlertSeverity::Overdue
        } else if remaining < self.threshold / 5.0 {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Watch
        }
    }
}
