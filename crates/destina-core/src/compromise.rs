use serde::Serialize;

use crate::vikor::{RankedItem, RankingResult};

const SMALL_SET: usize = 4;
const SMALL_SET_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "rows")]
pub enum CompromiseSolution {
    Empty,
    /// Row index of the single accepted compromise.
    Single(usize),
    /// Row indices of the compromise set, best first.
    Set(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompromiseAnalysis {
    pub solution: CompromiseSolution,
    /// `DQ`; 0 when fewer than two items were ranked.
    pub threshold: f64,
    pub acceptable_advantage: bool,
    pub acceptable_stability: bool,
}

impl RankingResult {
    /// VIKOR acceptance test over the ranked items.
    ///
    /// The leader is accepted alone when it beats the runner-up by at least
    /// `DQ` and also leads on `S` or `R`. Otherwise the result is the set of
    /// items that cannot be told apart from it.
    pub fn compromise(&self) -> CompromiseAnalysis {
        let (first, second) = match self.entries() {
            [] => return trivial(CompromiseSolution::Empty),
            [only] => return trivial(CompromiseSolution::Single(only.row)),
            [first, second, ..] => (first, second),
        };

        let threshold = advantage_threshold(self.len());
        let acceptable_advantage = second.compromise - first.compromise >= threshold;
        let acceptable_stability = leads(self.entries(), first);

        let solution = if !acceptable_advantage {
            CompromiseSolution::Set(
                self.iter()
                    .take_while(|e| e.compromise - first.compromise < threshold)
                    .map(|e| e.row)
                    .collect(),
            )
        } else if !acceptable_stability {
            CompromiseSolution::Set(vec![first.row, second.row])
        } else {
            CompromiseSolution::Single(first.row)
        };

        CompromiseAnalysis {
            solution,
            threshold,
            acceptable_advantage,
            acceptable_stability,
        }
    }
}

/// `DQ = 1 / (m - 1)`, or 0.25 with four or fewer alternatives.
fn advantage_threshold(m: usize) -> f64 {
    if m <= SMALL_SET {
        SMALL_SET_THRESHOLD
    } else {
        1.0 / (m as f64 - 1.0)
    }
}

fn trivial(solution: CompromiseSolution) -> CompromiseAnalysis {
    CompromiseAnalysis {
        solution,
        threshold: 0.0,
        acceptable_advantage: true,
        acceptable_stability: true,
    }
}

fn leads(entries: &[RankedItem], leader: &RankedItem) -> bool {
    let best_s = entries
        .iter()
        .map(|e| e.group_utility)
        .fold(f64::INFINITY, f64::min);
    let best_r = entries
        .iter()
        .map(|e| e.individual_regret)
        .fold(f64::INFINITY, f64::min);
    leader.group_utility <= best_s || leader.individual_regret <= best_r
}
