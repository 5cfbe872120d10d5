use crate::workflows::scoring::sizing::BudgetSizer;

#[test]
fn premium_district_budget_clamps_to_the_minimum_plot() {
    // 1.5B budget against 9M/m2 all-in cost raw-sizes to roughly 167 m2,
    // which is below the smallest tradable plot.
    let sizer = BudgetSizer::new(500.0, 50_000.0);
    let sizing = sizer.size(1_500_000_000.0, 8_500_000.0, 500_000.0);

    assert_eq!(sizing.recommended_m2, 500.0);
    assert!(sizing.clamped);
    assert_eq!(sizing.total_cost_per_m2, 9_000_000.0);
}

#[test]
fn zero_total_cost_falls_back_to_the_minimum() {
    let sizer = BudgetSizer::new(500.0, 50_000.0);

    let zero = sizer.size(1_000_000.0, 0.0, 0.0);
    assert_eq!(zero.recommended_m2, 500.0);

    let negative = sizer.size(1_000_000.0, -200.0, 100.0);
    assert_eq!(negative.recommended_m2, 500.0);
}

#[test]
fn output_is_always_inside_the_plot_window() {
    let sizer = BudgetSizer::new(500.0, 50_000.0);
    let budgets = [0.0, 1_000.0, 1_500_000_000.0, 9e15];
    let costs = [(100.0, 0.0), (8_500_000.0, 500_000.0), (1.0, 1.0)];

    for budget in budgets {
        for (land, dev) in costs {
            let sizing = sizer.size(budget, land, dev);
            assert!(
                (500.0..=50_000.0).contains(&sizing.recommended_m2),
                "budget {budget} land {land} dev {dev}"
            );
        }
    }
}

#[test]
fn unclamped_sizing_spends_the_whole_budget() {
    let sizer = BudgetSizer::new(500.0, 50_000.0);
    let sizing = sizer.size(9_000_000_000.0, 2_500_000.0, 500_000.0);

    assert_eq!(sizing.recommended_m2, 3_000.0);
    assert!(!sizing.clamped);
    assert_eq!(sizing.estimated_outlay, 9_000_000_000.0);
}

#[test]
fn sizing_is_deterministic() {
    let sizer = BudgetSizer::new(500.0, 50_000.0);
    let first = sizer.size(1_500_000_000.0, 3_000_000.0, 400_000.0);
    let second = sizer.size(1_500_000_000.0, 3_000_000.0, 400_000.0);
    assert_eq!(first, second);
}
