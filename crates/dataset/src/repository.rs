use core_types::{DateRange, Observation};
use std::collections::BTreeSet;

/// The process-wide collection of observations.
///
/// Built once from the snapshot and never mutated afterwards; callers share
/// it behind an `Arc` and only ever borrow from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
    global_range: Option<DateRange>,
}

impl Dataset {
    /// Takes ownership of the observations, ordering them by fund type,
    /// manager and report date.
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| {
            a.fund_type
                .cmp(&b.fund_type)
                .then_with(|| a.manager.cmp(&b.manager))
                .then_with(|| a.report_date.cmp(&b.report_date))
        });

        let global_range = observations
            .iter()
            .map(|o| o.report_date)
            .fold(None, |range: Option<DateRange>, date| match range {
                None => Some(DateRange::new(date, date)),
                Some(r) => Some(DateRange::new(r.start.min(date), r.end.max(date))),
            });

        Self {
            observations,
            global_range,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last report date across every fund type and manager.
    pub fn global_range(&self) -> Option<DateRange> {
        self.global_range
    }

    /// Sorted distinct fund types.
    pub fn fund_types(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.fund_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn has_fund_type(&self, fund_type: &str) -> bool {
        self.observations.iter().any(|o| o.fund_type == fund_type)
    }

    /// Sorted distinct managers, restricted to a fund type when one is given.
    pub fn managers(&self, fund_type: Option<&str>) -> Vec<String> {
        self.observations
            .iter()
            .filter(|o| fund_type.is_none_or(|ft| o.fund_type == ft))
            .map(|o| o.manager.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn for_fund_type(&self, fund_type: &str) -> Vec<&Observation> {
        self.observations
            .iter()
            .filter(|o| o.fund_type == fund_type)
            .collect()
    }

    pub fn for_manager(&self, fund_type: &str, manager: &str) -> Vec<&Observation> {
        self.observations
            .iter()
            .filter(|o| o.fund_type == fund_type && o.manager == manager)
            .collect()
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
