//! Score reconciliation
//!
//! Given the dimensions a user already has and the scores in a submission,
//! decide which rows to overwrite and which to insert. Stores apply the plan
//! inside their own unit of work.

use std::collections::HashMap;

use crate::models::{DimensionScore, Score};

/// A single write against the score table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange<'a> {
    /// Overwrite the score of an existing row
    Update { id: i32, score: Score },
    /// Add a new dimension for the user
    Insert { dimension_name: &'a str, score: Score },
}

impl ScoreChange<'_> {
    fn set_score(&mut self, new_score: Score) {
        match self {
            Self::Update { score, .. } | Self::Insert { score, .. } => *score = new_score,
        }
    }
}

/// Plan the score writes for one submission.
///
/// `existing` maps dimension name to row id. Matching is exact and
/// case-sensitive. A dimension repeated inside `incoming` yields one change
/// carrying the last value, so a payload can never create two rows for the
/// same dimension.
pub fn plan_score_changes<'a>(
    existing: &HashMap<String, i32>,
    incoming: &'a [DimensionScore],
) -> Vec<ScoreChange<'a>> {
    let mut plan: Vec<ScoreChange<'a>> = Vec::with_capacity(incoming.len());
    let mut planned: HashMap<&'a str, usize> = HashMap::with_capacity(incoming.len());

    for entry in incoming {
        let name = entry.dimension_name.as_str();

        if let Some(&idx) = planned.get(name) {
            plan[idx].set_score(entry.score);
            continue;
        }

        let change = match existing.get(name) {
            Some(&id) => ScoreChange::Update {
                id,
                score: entry.score,
            },
            None => ScoreChange::Insert {
                dimension_name: name,
                score: entry.score,
            },
        };

        planned.insert(name, plan.len());
        plan.push(change);
    }

    plan
}

/// Count (inserts, updates) in a plan
pub fn tally(plan: &[ScoreChange<'_>]) -> (usize, usize) {
    plan.iter().fold((0, 0), |(ins, upd), change| match change {
        ScoreChange::Insert { .. } => (ins + 1, upd),
        ScoreChange::Update { .. } => (ins, upd + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> Vec<DimensionScore> {
        pairs
            .iter()
            .map(|(name, score)| DimensionScore::new(name, *score).unwrap())
            .collect()
    }

    #[test]
    fn new_user_inserts_everything_in_order() {
        let incoming = scores(&[("clarity", 9.0), ("depth", 7.0)]);
        let plan = plan_score_changes(&HashMap::new(), &incoming);

        assert_eq!(
            plan,
            vec![
                ScoreChange::Insert {
                    dimension_name: "clarity",
                    score: Score::from(9)
                },
                ScoreChange::Insert {
                    dimension_name: "depth",
                    score: Score::from(7)
                },
            ]
        );
    }

    #[test]
    fn existing_dimension_is_overwritten() {
        let existing = HashMap::from([("clarity".to_string(), 4)]);
        let incoming = scores(&[("clarity", 10.0)]);

        let plan = plan_score_changes(&existing, &incoming);
        assert_eq!(
            plan,
            vec![ScoreChange::Update {
                id: 4,
                score: Score::from(10)
            }]
        );
    }

    #[test]
    fn unseen_dimension_added_alongside_existing() {
        let existing = HashMap::from([("clarity".to_string(), 1), ("depth".to_string(), 2)]);
        let incoming = scores(&[("clarity", 8.0), ("novelty", 5.0)]);

        let plan = plan_score_changes(&existing, &incoming);
        assert_eq!(tally(&plan), (1, 1));
        // depth is not in the payload, so it is not touched
        assert!(!plan
            .iter()
            .any(|c| matches!(c, ScoreChange::Update { id: 2, .. })));
    }

    #[test]
    fn dimension_match_is_case_sensitive() {
        let existing = HashMap::from([("clarity".to_string(), 1)]);
        let incoming = scores(&[("Clarity", 6.0)]);

        let plan = plan_score_changes(&existing, &incoming);
        assert_eq!(
            plan,
            vec![ScoreChange::Insert {
                dimension_name: "Clarity",
                score: Score::from(6)
            }]
        );
    }

    #[test]
    fn repeated_dimension_collapses_to_last_value() {
        let incoming = scores(&[("clarity", 3.0), ("depth", 1.0), ("clarity", 9.0)]);
        let plan = plan_score_changes(&HashMap::new(), &incoming);

        assert_eq!(plan.len(), 2);
        assert_eq!(
            plan[0],
            ScoreChange::Insert {
                dimension_name: "clarity",
                score: Score::from(9)
            }
        );

        let existing = HashMap::from([("clarity".to_string(), 7)]);
        let plan = plan_score_changes(&existing, &incoming);
        assert_eq!(
            plan[0],
            ScoreChange::Update {
                id: 7,
                score: Score::from(9)
            }
        );
    }

    #[test]
    fn empty_payload_plans_nothing() {
        let existing = HashMap::from([("clarity".to_string(), 1)]);
        assert!(plan_score_changes(&existing, &[]).is_empty());
    }
}
