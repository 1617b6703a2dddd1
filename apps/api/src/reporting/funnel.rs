use std::collections::HashMap;

use serde::Serialize;

use crate::models::status::AccountStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub stage: &'static str,
    pub count: i64,
}

/// Counts accounts per funnel stage, in pipeline order.
///
/// Stages with no accounts are omitted. Statuses outside the funnel stages
/// (`Lost`, unknown labels, null) are dropped rather than bucketed.
pub fn compute_funnel(statuses: &[Option<String>]) -> Vec<FunnelStage> {
    let mut counts: HashMap<AccountStatus, i64> = HashMap::new();
    for status in statuses.iter().flatten() {
        if let Some(status) = AccountStatus::from_label(status) {
            *counts.entry(status).or_insert(0) += 1;
        }
    }

    AccountStatus::FUNNEL_STAGES
        .into_iter()
        .filter_map(|stage| {
            counts.get(&stage).map(|&count| FunnelStage {
                stage: stage.label(),
                count,
            })
        })
        .collect()
}
