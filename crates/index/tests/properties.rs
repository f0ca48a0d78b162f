use approx::assert_relative_eq;
use cmpi_context::ContextFactors;
use cmpi_index::{
    AdjustmentRules, Deprivations, Household, Indicator, MpiConfig, WEIGHT_TOLERANCE,
    WeightVector, adjusted_weights, compute_standard_mpi, deprivation_score, raw_adjusted_weights,
};

fn grid() -> impl Iterator<Item = (f64, f64)> {
    (0..=20).flat_map(|i| (0..=20).map(move |j| (i as f64 / 20.0, j as f64 / 20.0)))
}

/// Every subset of the ten indicators, as deprivation profiles.
fn all_profiles() -> impl Iterator<Item = Deprivations> {
    (0u32..1 << Indicator::COUNT).map(|mask| {
        let mut flags = [false; Indicator::COUNT];
        for (i, flag) in flags.iter_mut().enumerate() {
            *flag = mask & (1 << i) != 0;
        }
        Deprivations::from_flags(flags)
    })
}

#[test]
fn adjusted_vectors_sum_to_one_across_context_space() {
    for rules in [AdjustmentRules::standard(), AdjustmentRules::extended()] {
        for base in [WeightVector::ophi(), WeightVector::equal()] {
            for (h, u) in grid() {
                let adj = adjusted_weights(&base, &ContextFactors::new(h, u), &rules).unwrap();
                assert!(
                    (adj.weights.sum() - 1.0).abs() <= WEIGHT_TOLERANCE,
                    "sum {} at h={h} u={u}",
                    adj.weights.sum()
                );
            }
        }
    }
}

#[test]
fn raw_adjusted_weights_stay_in_documented_ranges() {
    let rules = AdjustmentRules::standard();
    let base = WeightVector::ophi();
    // Out-of-range inputs are clamped before they reach the rules.
    let inputs = grid().chain([(-0.5, 1.5), (2.0, -3.0), (f64::NAN, f64::NAN)]);
    for (h, u) in inputs {
        let raw = raw_adjusted_weights(&base, &ContextFactors::new(h, u), &rules);
        let e = raw[Indicator::Electricity.index()];
        assert!((0.08..=0.20).contains(&e), "electricity {e} at h={h}");
        for ind in [Indicator::Sanitation, Indicator::DrinkingWater] {
            let w = raw[ind.index()];
            assert!(w >= 0.08 && w <= 0.15 + 1e-12, "{ind} {w} at u={u}");
        }
    }
}

#[test]
fn harsh_rural_cell_matches_hand_computed_weights() {
    // Raw: four 1/6 weights, three 1/18 weights, electricity 0.20,
    // sanitation and water 0.08. Sum = 5/6 + 0.36 = 179/150.
    let factors = ContextFactors::new(1.0, 0.0);
    let base = WeightVector::ophi();
    let rules = AdjustmentRules::standard();

    let raw = raw_adjusted_weights(&base, &factors, &rules);
    assert_eq!(raw[Indicator::Electricity.index()], 0.20);
    assert_eq!(raw[Indicator::Sanitation.index()], 0.08);
    assert_eq!(raw[Indicator::DrinkingWater.index()], 0.08);
    for ind in [
        Indicator::Nutrition,
        Indicator::ChildMortality,
        Indicator::YearsOfSchooling,
        Indicator::SchoolAttendance,
        Indicator::CookingFuel,
        Indicator::Housing,
        Indicator::Assets,
    ] {
        assert_eq!(raw[ind.index()], base.get(ind), "{ind} changed before renormalising");
    }

    let adj = adjusted_weights(&base, &factors, &rules).unwrap();
    assert_relative_eq!(adj.raw_sum, 179.0 / 150.0, epsilon = 1e-12);

    let w = &adj.weights;
    assert_relative_eq!(w.get(Indicator::Electricity), 30.0 / 179.0, epsilon = 1e-12);
    assert_relative_eq!(w.get(Indicator::Sanitation), 12.0 / 179.0, epsilon = 1e-12);
    assert_relative_eq!(w.get(Indicator::DrinkingWater), 12.0 / 179.0, epsilon = 1e-12);
    for ind in [
        Indicator::Nutrition,
        Indicator::ChildMortality,
        Indicator::YearsOfSchooling,
        Indicator::SchoolAttendance,
    ] {
        assert_relative_eq!(w.get(ind), 25.0 / 179.0, epsilon = 1e-12);
    }
    for ind in [Indicator::CookingFuel, Indicator::Housing, Indicator::Assets] {
        assert_relative_eq!(w.get(ind), 25.0 / 537.0, epsilon = 1e-12);
    }
    assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
}

#[test]
fn adjustments_are_independent_of_rule_order() {
    let factors = ContextFactors::new(0.7, 0.4);
    let base = WeightVector::ophi();
    let forward = AdjustmentRules::standard();
    let mut reversed_rules = forward.rules().to_vec();
    reversed_rules.reverse();
    let reversed = AdjustmentRules::new(reversed_rules).unwrap();

    let a = adjusted_weights(&base, &factors, &forward).unwrap();
    let b = adjusted_weights(&base, &factors, &reversed).unwrap();
    assert_eq!(a, b);
}

#[test]
fn score_bounded_and_flag_matches_cutoff_for_every_profile() {
    let cfg = MpiConfig::default();
    let adjusted = adjusted_weights(
        &WeightVector::ophi(),
        &ContextFactors::new(1.0, 1.0),
        &AdjustmentRules::extended(),
    )
    .unwrap()
    .weights;

    for weights in [WeightVector::ophi(), WeightVector::equal(), adjusted] {
        for d in all_profiles() {
            let s = deprivation_score(&d, &weights);
            assert!((0.0..=1.0).contains(&s));
            // Scores within rounding distance of the cutoff count as poor.
            if (s - 1.0 / 3.0).abs() > 1e-9 {
                assert_eq!(cfg.is_poor(s), s >= 1.0 / 3.0, "score {s}");
            } else {
                assert!(cfg.is_poor(s), "score {s}");
            }
        }
    }
}

#[test]
fn ten_household_aggregate() {
    let w = WeightVector::equal();
    let deprived = |n: usize| Deprivations::from_indicators(&Indicator::ALL[..n]);
    // Poor: 0.4, 0.6, 0.5, 0.5 -> mean 0.5. Not poor: 0.0 to 0.3.
    let counts = [4, 6, 5, 5, 0, 1, 2, 3, 3, 1];
    let households: Vec<Household> = counts
        .iter()
        .enumerate()
        .map(|(i, &n)| Household::new(format!("h{i}"), "c1", deprived(n)))
        .collect();

    let r = compute_standard_mpi(&households, &w, &MpiConfig::default()).unwrap();
    assert_eq!(r.summary.total, 10);
    assert_eq!(r.summary.num_poor, 4);
    assert_relative_eq!(r.summary.headcount_ratio, 0.4, epsilon = 1e-12);
    assert_relative_eq!(r.summary.intensity, 0.5, epsilon = 1e-12);
    assert_relative_eq!(r.summary.mpi, 0.20, epsilon = 1e-12);
}

#[test]
fn scoring_is_idempotent() {
    let households: Vec<Household> = all_profiles()
        .step_by(7)
        .enumerate()
        .map(|(i, d)| Household::new(format!("h{i}"), "c", d))
        .collect();
    let cfg = MpiConfig::default();

    let a = compute_standard_mpi(&households, &WeightVector::ophi(), &cfg).unwrap();
    let b = compute_standard_mpi(&households, &WeightVector::ophi(), &cfg).unwrap();
    assert_eq!(a, b);

    let factors = ContextFactors::new(0.35, 0.8);
    let rules = AdjustmentRules::standard();
    let w1 = adjusted_weights(&WeightVector::ophi(), &factors, &rules).unwrap();
    let w2 = adjusted_weights(&WeightVector::ophi(), &factors, &rules).unwrap();
    assert_eq!(w1, w2);
    let a = compute_standard_mpi(&households, &w1.weights, &cfg).unwrap();
    let b = compute_standard_mpi(&households, &w2.weights, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn substitute_weight_sets_are_accepted() {
    let mut raw = [0.05; Indicator::COUNT];
    raw[Indicator::Nutrition.index()] = 0.3;
    raw[Indicator::Electricity.index()] = 0.3;
    let custom = WeightVector::new(raw).unwrap();

    let h = Household::new(
        "h",
        "c",
        Deprivations::from_indicators(&[Indicator::Nutrition, Indicator::Assets]),
    );
    let r = compute_standard_mpi(&[h], &custom, &MpiConfig::default()).unwrap();
    assert_relative_eq!(r.households[0].score, 0.35, epsilon = 1e-12);
    assert!(r.households[0].is_poor);
}
