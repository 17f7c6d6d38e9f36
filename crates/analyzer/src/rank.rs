use std::cmp::Ordering;

/// Sort direction of a metric family's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Self::Ascending => a.total_cmp(&b),
            Self::Descending => b.total_cmp(&a),
        }
    }
}

/// Orders one metric family's rows.
///
/// Eligible rows are sorted by their key in `direction`; a row whose key is
/// `None` sorts after every keyed row. Ineligible rows follow in the order
/// given, whatever the direction. The sort is stable, so ties keep their
/// input order.
pub fn rank<R>(
    mut eligible: Vec<(Option<f64>, R)>,
    ineligible: Vec<R>,
    direction: SortDirection,
) -> Vec<R> {
    eligible.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => direction.compare(*a, *b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    eligible
        .into_iter()
        .map(|(_, row)| row)
        .chain(ineligible)
        .collect()
}
