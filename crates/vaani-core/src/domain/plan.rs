//! The fixed catalog of detox therapy plans offered by the portal.

/// One bookable detox plan.
///
/// `id` is the value the booking endpoint expects in `plan_type`; `label` is
/// what the assistant reads out and matches spoken answers against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetoxPlan {
    pub id: &'static str,
    pub label: &'static str,
}

const PLANS: [DetoxPlan; 4] = [
    DetoxPlan {
        id: "weight_loss_short",
        label: "Weight Loss Short, 7 days",
    },
    DetoxPlan {
        id: "weight_loss_full",
        label: "Weight Loss Full, 14 days",
    },
    DetoxPlan {
        id: "diabetes_short",
        label: "Diabetes Short, 7 days",
    },
    DetoxPlan {
        id: "diabetes_full",
        label: "Diabetes Full, 14 days",
    },
];

/// The plans the booking flow offers, in the order they are read out.
#[must_use]
pub const fn detox_plans() -> &'static [DetoxPlan] {
    &PLANS
}
