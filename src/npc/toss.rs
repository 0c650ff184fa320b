//! What a hand is worth after tossing cards to the crib, averaged over
//! every cut card that could still come up.

use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::game::scoring::points;

/// Score spread for keeping `kept` and tossing `tossed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TossStats {
    pub tossed: Vec<Card>,
    pub kept: Vec<Card>,
    pub min: u32,
    pub max: u32,
    pub average: f64,
}

/// One entry per way of tossing `toss_count` cards from `hand`, best
/// average first
pub fn toss_stats(hand: &[Card], toss_count: usize) -> Vec<TossStats> {
    let possible_cuts: Vec<Card> = Card::all_cards()
        .into_iter()
        .filter(|c| !hand.contains(c))
        .collect();

    let mut stats: Vec<TossStats> = combinations(hand.len(), toss_count)
        .into_iter()
        .map(|tossed_at| {
            let (tossed, kept): (Vec<_>, Vec<_>) = hand
                .iter()
                .enumerate()
                .partition(|(i, _)| tossed_at.contains(i));
            let tossed: Vec<Card> = tossed.into_iter().map(|(_, c)| *c).collect();
            let kept: Vec<Card> = kept.into_iter().map(|(_, c)| *c).collect();
            summarize(tossed, kept, &possible_cuts)
        })
        .collect();

    stats.sort_by(|a, b| b.average.total_cmp(&a.average));
    stats
}

fn summarize(tossed: Vec<Card>, kept: Vec<Card>, possible_cuts: &[Card]) -> TossStats {
    let scores: Vec<u32> = possible_cuts
        .iter()
        .map(|cut| points(*cut, &kept, false))
        .collect();
    let total: u32 = scores.iter().sum();

    TossStats {
        min: scores.iter().copied().min().unwrap_or_default(),
        max: scores.iter().copied().max().unwrap_or_default(),
        average: if scores.is_empty() {
            0.0
        } else {
            total as f64 / scores.len() as f64
        },
        tossed,
        kept,
    }
}

/// Every way to choose `k` of the indices `0..n`, in lexicographic order
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(
        start: usize,
        n: usize,
        k: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k <= n {
        extend(0, n, k, &mut Vec::with_capacity(k), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(notation: &str) -> Vec<Card> {
        notation
            .split_whitespace()
            .map(|s| Card::from_string(s).unwrap())
            .collect()
    }

    #[test]
    fn combinations_cover_every_choice() {
        assert_eq!(combinations(6, 2).len(), 15);
        assert_eq!(combinations(5, 1).len(), 5);
        assert_eq!(combinations(4, 0), vec![Vec::<usize>::new()]);
        assert!(combinations(2, 3).is_empty());
    }

    #[test]
    fn keeping_the_fives_is_best() {
        let stats = toss_stats(&cards("5S 5C 5D JH KC 2D"), 2);
        assert_eq!(stats.len(), 15);

        let best = &stats[0];
        assert_eq!(best.kept, cards("5S 5C 5D JH"));
        assert_eq!(best.tossed, cards("KC 2D"));
        // Three fives and a ten already make 14
        assert_eq!(best.min, 14);
        assert!(best.max >= 28);
        assert!(stats.windows(2).all(|w| w[0].average >= w[1].average));
    }

    #[test]
    fn averages_sit_between_min_and_max() {
        for stat in toss_stats(&cards("AS 3D 7C 9H QS"), 1) {
            assert!(stat.min as f64 <= stat.average);
            assert!(stat.average <= stat.max as f64);
            assert_eq!(stat.kept.len(), 4);
        }
    }
}
