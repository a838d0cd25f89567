use serde::{Deserialize, Serialize};

/// Target dimensions for cell optimization.
///
/// `None` targets mean "no fixed total" on that axis: reconciliation
/// degenerates to a per-cell floor clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationTarget {
    /// Target total width across all columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_width: Option<f32>,
    /// Target total height across all rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_height: Option<f32>,
    /// Smallest allowed column width.
    pub min_cell_width: f32,
    /// Smallest allowed row height.
    pub min_cell_height: f32,
}

impl Default for OptimizationTarget {
    fn default() -> Self {
        Self {
            target_width: None,
            target_height: None,
            min_cell_width: 30.0,
            min_cell_height: 25.0,
        }
    }
}

/// Dash pattern for separator lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

/// Visual style for a separator line.
///
/// Passed explicitly into separator operations at call time; newly
/// created separators sample style from a surviving separator first and
/// fall back to this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparatorStyle {
    /// Line weight in points.
    pub weight: f32,
    pub dash: DashStyle,
    /// Line color as #RRGGBB.
    pub color: String,
}

impl Default for SeparatorStyle {
    fn default() -> Self {
        Self {
            weight: 1.0,
            dash: DashStyle::Solid,
            color: "#A6A6A6".to_string(),
        }
    }
}

/// Aggregate result of a partial-failure-tolerant batch write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Writes the operation attempted.
    pub attempted: usize,
    /// Writes that succeeded.
    pub applied: usize,
}

impl BatchOutcome {
    /// Record one successful write.
    pub fn record_ok(&mut self) {
        self.attempted += 1;
        self.applied += 1;
    }

    /// Record one skipped/failed write.
    pub fn record_skip(&mut self) {
        self.attempted += 1;
    }

    /// Whether every attempted write succeeded.
    pub fn is_complete(&self) -> bool {
        self.applied == self.attempted
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: BatchOutcome) {
        self.attempted += other.attempted;
        self.applied += other.applied;
    }
}
