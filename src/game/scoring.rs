//! Hand, crib and pegging scores.
//!
//! Hand scoring can be computed two ways: [`points`] accumulates the total
//! directly, while [`breakdown`] reports which [`ScoreCategory`]s fired.
//! The two must always agree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum_macros::{Display, EnumIter};

use super::cards::{Card, Rank};

/// Cards in a hand or crib, not counting the cut card
pub const HAND_CARDS: usize = 4;

/// Largest total of five peg values that can still contain a fifteen
const MAX_FIFTEEN_TOTAL: u32 = 46;

/// Scoring combinations for a hand plus the cut card. Fifteens are counted
/// separately since a hand can hold several of them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoreCategory {
    Pair,
    TwoPairs,
    ThreeOfAKind,
    FourOfAKind,
    RunOfThree,
    RunOfFour,
    RunOfFive,
    DoubleRunOfThree,
    DoubleRunOfFour,
    TripleRunOfThree,
    DoubleDoubleRunOfThree,
    FourCardFlush,
    FiveCardFlush,
    Nobs,
}

impl ScoreCategory {
    pub fn points(self) -> u32 {
        match self {
            ScoreCategory::Pair => 2,
            ScoreCategory::TwoPairs => 4,
            ScoreCategory::ThreeOfAKind => 6,
            ScoreCategory::FourOfAKind => 12,
            ScoreCategory::RunOfThree => 3,
            ScoreCategory::RunOfFour => 4,
            ScoreCategory::RunOfFive => 5,
            // Compound runs include the pairs inside them
            ScoreCategory::DoubleRunOfThree => 8,
            ScoreCategory::DoubleRunOfFour => 10,
            ScoreCategory::TripleRunOfThree => 15,
            ScoreCategory::DoubleDoubleRunOfThree => 16,
            ScoreCategory::FourCardFlush => 4,
            ScoreCategory::FiveCardFlush => 5,
            ScoreCategory::Nobs => 1,
        }
    }

    /// The pair category already counted inside a compound run
    fn subsumes(self) -> Option<ScoreCategory> {
        match self {
            ScoreCategory::DoubleRunOfThree | ScoreCategory::DoubleRunOfFour => {
                Some(ScoreCategory::Pair)
            }
            ScoreCategory::TripleRunOfThree => Some(ScoreCategory::ThreeOfAKind),
            ScoreCategory::DoubleDoubleRunOfThree => Some(ScoreCategory::TwoPairs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandScore {
    pub fifteens: u32,
    pub categories: BTreeSet<ScoreCategory>,
}

impl HandScore {
    pub fn total(&self) -> u32 {
        self.fifteens * 2 + self.categories.iter().map(|c| c.points()).sum::<u32>()
    }
}

/// Points for `hand` plus the cut card.
///
/// Returns 0 unless `hand` holds exactly four cards. A crib only scores a
/// flush when the cut card matches too.
pub fn points(cut: Card, hand: &[Card], is_crib: bool) -> u32 {
    if hand.len() != HAND_CARDS {
        return 0;
    }
    let all = with_cut(cut, hand);
    let counts = rank_counts(&all);

    let mut total = count_fifteens(&all) * 2;
    total += counts.iter().map(|&n| n * n.saturating_sub(1)).sum::<u32>();
    if let Some((len, multiplier)) = longest_run(&counts) {
        total += len * multiplier;
    }
    total += flush_points(cut, hand, is_crib);
    if has_nobs(cut, hand) {
        total += 1;
    }
    total
}

/// Which categories `hand` plus the cut card score in
pub fn breakdown(cut: Card, hand: &[Card], is_crib: bool) -> HandScore {
    if hand.len() != HAND_CARDS {
        return HandScore::default();
    }
    let all = with_cut(cut, hand);
    let counts = rank_counts(&all);
    let mut categories = BTreeSet::new();

    let pairs = counts.iter().filter(|&&n| n == 2).count();
    match pairs {
        1 => {
            categories.insert(ScoreCategory::Pair);
        }
        2 => {
            categories.insert(ScoreCategory::TwoPairs);
        }
        _ => {}
    }
    if counts.contains(&3) {
        categories.insert(ScoreCategory::ThreeOfAKind);
    }
    if counts.contains(&4) {
        categories.insert(ScoreCategory::FourOfAKind);
    }

    if let Some(run) = longest_run(&counts).and_then(|(len, mult)| run_category(len, mult)) {
        categories.insert(run);
    }

    match flush_points(cut, hand, is_crib) {
        5 => {
            categories.insert(ScoreCategory::FiveCardFlush);
        }
        4 => {
            categories.insert(ScoreCategory::FourCardFlush);
        }
        _ => {}
    }
    if has_nobs(cut, hand) {
        categories.insert(ScoreCategory::Nobs);
    }

    resolve_subsumed(&mut categories);

    HandScore {
        fifteens: count_fifteens(&all),
        categories,
    }
}

fn resolve_subsumed(categories: &mut BTreeSet<ScoreCategory>) {
    let subsumed: Vec<ScoreCategory> = categories.iter().filter_map(|c| c.subsumes()).collect();
    for category in subsumed {
        categories.remove(&category);
    }
}

fn with_cut(cut: Card, hand: &[Card]) -> Vec<Card> {
    let mut all = Vec::with_capacity(hand.len() + 1);
    all.extend_from_slice(hand);
    all.push(cut);
    all
}

/// Number of cards of each rank, indexed by rank value (index 0 unused)
fn rank_counts(cards: &[Card]) -> [u32; 14] {
    let mut counts = [0; 14];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }
    counts
}

/// Number of distinct subsets of the cards whose peg values sum to 15
pub fn count_fifteens(cards: &[Card]) -> u32 {
    let mut values: Vec<u32> = cards.iter().map(|c| c.peg_value() as u32).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let total: u32 = values.iter().sum();
    if !(15..=MAX_FIFTEEN_TOTAL).contains(&total) {
        return 0;
    }
    if total == 15 {
        return 1;
    }
    subsets_summing_to(&values, 15)
}

fn subsets_summing_to(values: &[u32], target: u32) -> u32 {
    let Some((&first, rest)) = values.split_first() else {
        return 0;
    };
    let with_first = match first.cmp(&target) {
        std::cmp::Ordering::Equal => 1,
        std::cmp::Ordering::Less => subsets_summing_to(rest, target - first),
        std::cmp::Ordering::Greater => 0,
    };
    with_first + subsets_summing_to(rest, target)
}

/// The longest run of three or more consecutive ranks, as
/// `(length, product of the card counts at each rank)`
fn longest_run(counts: &[u32; 14]) -> Option<(u32, u32)> {
    let mut best: Option<(u32, u32)> = None;
    let mut len = 0;
    let mut multiplier = 1;

    for &count in &counts[1..] {
        if count == 0 {
            len = 0;
            multiplier = 1;
            continue;
        }
        len += 1;
        multiplier *= count;
        if len >= 3 && best.map_or(true, |(best_len, _)| len > best_len) {
            best = Some((len, multiplier));
        }
    }
    best
}

fn run_category(len: u32, multiplier: u32) -> Option<ScoreCategory> {
    match (len, multiplier) {
        (3, 1) => Some(ScoreCategory::RunOfThree),
        (3, 2) => Some(ScoreCategory::DoubleRunOfThree),
        (3, 3) => Some(ScoreCategory::TripleRunOfThree),
        (3, 4) => Some(ScoreCategory::DoubleDoubleRunOfThree),
        (4, 1) => Some(ScoreCategory::RunOfFour),
        (4, 2) => Some(ScoreCategory::DoubleRunOfFour),
        (5, 1) => Some(ScoreCategory::RunOfFive),
        _ => None,
    }
}

fn flush_points(cut: Card, hand: &[Card], is_crib: bool) -> u32 {
    let Some(first) = hand.first() else {
        return 0;
    };
    if !hand.iter().all(|c| c.suit == first.suit) {
        return 0;
    }
    if cut.suit == first.suit {
        5
    } else if is_crib {
        0
    } else {
        4
    }
}

fn has_nobs(cut: Card, hand: &[Card]) -> bool {
    hand.iter()
        .any(|c| c.rank == Rank::Jack && c.suit == cut.suit)
}

/// Something that scores while pegging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PegCategory {
    Fifteen,
    ThirtyOne,
    Pair,
    ThreeOfAKind,
    FourOfAKind,
    Run(u32),
    Go,
    LastCard,
}

impl fmt::Display for PegCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PegCategory::Fifteen => write!(f, "fifteen"),
            PegCategory::ThirtyOne => write!(f, "thirty-one"),
            PegCategory::Pair => write!(f, "a pair"),
            PegCategory::ThreeOfAKind => write!(f, "three of a kind"),
            PegCategory::FourOfAKind => write!(f, "four of a kind"),
            PegCategory::Run(len) => write!(f, "a run of {}", len),
            PegCategory::Go => write!(f, "the go"),
            PegCategory::LastCard => write!(f, "last card"),
        }
    }
}

impl PegCategory {
    pub fn points(self) -> u32 {
        match self {
            PegCategory::Fifteen | PegCategory::ThirtyOne | PegCategory::Pair => 2,
            PegCategory::ThreeOfAKind => 6,
            PegCategory::FourOfAKind => 12,
            PegCategory::Run(len) => len,
            PegCategory::Go | PegCategory::LastCard => 1,
        }
    }
}

/// What the last card of `sequence` scores. `sequence` holds every card
/// played since the count last reset, in order, ending with the new card.
pub fn peg_categories(sequence: &[Card]) -> Vec<PegCategory> {
    let mut scored = Vec::new();
    let Some(last) = sequence.last() else {
        return scored;
    };

    let count: u32 = sequence.iter().map(|c| c.peg_value() as u32).sum();
    if count == 15 {
        scored.push(PegCategory::Fifteen);
    }
    if count == 31 {
        scored.push(PegCategory::ThirtyOne);
    }

    let matching = sequence
        .iter()
        .rev()
        .take_while(|c| c.rank == last.rank)
        .count();
    match matching {
        2 => scored.push(PegCategory::Pair),
        3 => scored.push(PegCategory::ThreeOfAKind),
        4 => scored.push(PegCategory::FourOfAKind),
        _ => {}
    }

    if let Some(len) = (3..=sequence.len())
        .rev()
        .find(|&len| is_run(&sequence[sequence.len() - len..]))
    {
        scored.push(PegCategory::Run(len as u32));
    }

    scored
}

/// Points the last card of `sequence` scores while pegging
pub fn peg_points(sequence: &[Card]) -> u32 {
    peg_categories(sequence).iter().map(|c| c.points()).sum()
}

fn is_run(cards: &[Card]) -> bool {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    values.windows(2).all(|w| w[1] == w[0] + 1)
}
