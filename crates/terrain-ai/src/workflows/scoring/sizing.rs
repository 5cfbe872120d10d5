use serde::{Deserialize, Serialize};

/// Outcome of converting an acquisition budget into a recommended plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSizing {
    pub recommended_m2: f64,
    pub total_cost_per_m2: f64,
    pub estimated_outlay: f64,
    pub clamped: bool,
}

/// Pure budget-to-area conversion bounded to a plot-size window. Sizing must
/// always succeed: a non-positive unit cost falls back to the smallest plot
/// instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSizer {
    min_plot_m2: f64,
    max_plot_m2: f64,
}

impl BudgetSizer {
    pub fn new(min_plot_m2: f64, max_plot_m2: f64) -> Self {
        let floor = min_plot_m2.max(0.0);
        let ceiling = max_plot_m2.max(floor);
        Self {
            min_plot_m2: floor,
            max_plot_m2: ceiling,
        }
    }

    pub fn min_plot_m2(&self) -> f64 {
        self.min_plot_m2
    }

    pub fn max_plot_m2(&self) -> f64 {
        self.max_plot_m2
    }

    pub fn size(
        &self,
        target_budget: f64,
        land_price_per_m2: f64,
        development_cost_per_m2: f64,
    ) -> PlotSizing {
        let total_cost_per_m2 = land_price_per_m2 + development_cost_per_m2;

        if !total_cost_per_m2.is_finite() || total_cost_per_m2 <= 0.0 {
            return PlotSizing {
                recommended_m2: self.min_plot_m2,
                total_cost_per_m2: if total_cost_per_m2.is_finite() {
                    total_cost_per_m2
                } else {
                    0.0
                },
                estimated_outlay: 0.0,
                clamped: true,
            };
        }

        let raw = target_budget.max(0.0) / total_cost_per_m2;
        let recommended_m2 = raw.clamp(self.min_plot_m2, self.max_plot_m2);

        PlotSizing {
            recommended_m2,
            total_cost_per_m2,
            estimated_outlay: recommended_m2 * total_cost_per_m2,
            clamped: recommended_m2 != raw,
        }
    }
}
