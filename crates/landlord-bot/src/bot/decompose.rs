use landlord_core::model::card::Card;
use landlord_core::model::counts::RankCounts;
use landlord_core::model::rank::Rank;
use landlord_core::rules::{ComboKind, Play};

const MIN_AIRPLANE_LEN: usize = 2;
const MIN_PAIR_RUN_LEN: usize = 3;
const MIN_STRAIGHT_LEN: usize = 5;

/// A hand split into disjoint combinations, one list per category.
///
/// Every list is sorted by rank, lowest first. Airplanes carry their wings
/// when the hand had spare low cards for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    pub rockets: Vec<Play>,
    pub bombs: Vec<Play>,
    pub airplanes: Vec<Play>,
    pub consecutive_pairs: Vec<Play>,
    pub straights: Vec<Play>,
    pub triples: Vec<Play>,
    pub pairs: Vec<Play>,
    pub singles: Vec<Play>,
}

impl Decomposition {
    /// All combinations in extraction priority: rockets, bombs, airplanes,
    /// consecutive pairs, straights, triples, pairs, singles.
    pub fn combos(&self) -> impl Iterator<Item = &Play> {
        self.rockets
            .iter()
            .chain(&self.bombs)
            .chain(&self.airplanes)
            .chain(&self.consecutive_pairs)
            .chain(&self.straights)
            .chain(&self.triples)
            .chain(&self.pairs)
            .chain(&self.singles)
    }

    pub fn len(&self) -> usize {
        self.combos().count()
    }

    pub fn is_empty(&self) -> bool {
        self.combos().next().is_none()
    }

    pub fn card_count(&self) -> usize {
        self.combos().map(Play::len).sum()
    }

    /// True when nothing but bombs and rockets is left.
    pub fn only_escalations(&self) -> bool {
        self.combos().all(|play| play.kind().is_escalation())
    }

    pub fn leftover_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn leftover_singles(&self) -> usize {
        self.singles.len()
    }

    fn record(&mut self, cards: Vec<Card>) {
        let play = match Play::new(cards) {
            Ok(play) => play,
            Err(unrecognized) => {
                debug_assert!(false, "decomposer produced {unrecognized}");
                self.singles
                    .extend(unrecognized.into_cards().into_iter().map(Play::single));
                return;
            }
        };
        let bucket = match play.kind() {
            ComboKind::Rocket => &mut self.rockets,
            ComboKind::Bomb => &mut self.bombs,
            ComboKind::Airplane | ComboKind::AirplaneWithSingles | ComboKind::AirplaneWithPairs => {
                &mut self.airplanes
            }
            ComboKind::ConsecutivePairs => &mut self.consecutive_pairs,
            ComboKind::Straight => &mut self.straights,
            ComboKind::Triple => &mut self.triples,
            ComboKind::Pair => &mut self.pairs,
            ComboKind::Single => &mut self.singles,
            ComboKind::TripleWithOne
            | ComboKind::TripleWithPair
            | ComboKind::QuadWithTwo
            | ComboKind::Unrecognized => {
                debug_assert!(false, "decomposer never builds {}", play.kind());
                self.singles
                    .extend(play.into_cards().into_iter().map(Play::single));
                return;
            }
        };
        bucket.push(play);
    }

    fn sort(&mut self) {
        for bucket in [
            &mut self.rockets,
            &mut self.bombs,
            &mut self.airplanes,
            &mut self.consecutive_pairs,
            &mut self.straights,
            &mut self.triples,
            &mut self.pairs,
            &mut self.singles,
        ] {
            bucket.sort_by_key(|play| (play.rank(), play.len()));
        }
    }
}

/// Cards grouped by rank while the decomposer consumes them.
struct CardPool {
    buckets: [Vec<Card>; Rank::COUNT],
}

impl CardPool {
    fn new(cards: &[Card]) -> Self {
        let mut buckets: [Vec<Card>; Rank::COUNT] = std::array::from_fn(|_| Vec::new());
        for card in cards {
            buckets[card.rank.index()].push(*card);
        }
        for bucket in &mut buckets {
            bucket.sort();
        }
        Self { buckets }
    }

    fn count(&self, rank: Rank) -> usize {
        self.buckets[rank.index()].len()
    }

    fn counts(&self) -> RankCounts {
        let mut counts = RankCounts::new();
        for rank in Rank::ORDERED {
            counts.set(rank, self.count(rank).min(u8::MAX as usize) as u8);
        }
        counts
    }

    fn take(&mut self, rank: Rank, n: usize) -> Vec<Card> {
        let bucket = &mut self.buckets[rank.index()];
        let at = bucket.len().saturating_sub(n);
        bucket.split_off(at)
    }
}

/// Greedy partition of `cards` into combinations.
///
/// Order of extraction: rockets, bombs, airplanes, consecutive pairs,
/// straights, then triples, pairs and singles from whatever is left.
/// Airplanes finally take wings from the low leftovers.
pub fn decompose(cards: &[Card]) -> Decomposition {
    let mut pool = CardPool::new(cards);
    let mut out = Decomposition::default();

    while pool.count(Rank::BlackJoker) > 0 && pool.count(Rank::RedJoker) > 0 {
        let mut rocket = pool.take(Rank::BlackJoker, 1);
        rocket.extend(pool.take(Rank::RedJoker, 1));
        out.record(rocket);
    }

    for rank in Rank::ORDERED {
        while pool.count(rank) >= 4 {
            out.record(pool.take(rank, 4));
        }
    }

    let anchors = extract_runs(&mut pool, 3, MIN_AIRPLANE_LEN);
    for run in extract_runs(&mut pool, 2, MIN_PAIR_RUN_LEN) {
        out.record(run);
    }
    for run in extract_runs(&mut pool, 1, MIN_STRAIGHT_LEN) {
        out.record(run);
    }

    let mut triples = Vec::new();
    let mut pairs = Vec::new();
    let mut singles = Vec::new();
    for rank in Rank::ORDERED {
        let group = pool.take(rank, pool.count(rank));
        match group.len() {
            0 => {}
            1 => singles.extend(group),
            2 => pairs.push(group),
            _ => triples.push(group),
        }
    }

    for mut anchor in anchors {
        let wings = take_wings(anchor.len() / 3, &mut pairs, &mut singles);
        anchor.extend(wings);
        out.record(anchor);
    }

    for group in triples.into_iter().chain(pairs) {
        out.record(group);
    }
    for card in singles {
        out.record(vec![card]);
    }

    out.sort();
    out
}

/// Pulls every run of `per` cards per rank, longest first. At each length
/// the lowest window is taken and the same length is tried again.
fn extract_runs(pool: &mut CardPool, per: u8, min_len: usize) -> Vec<Vec<Card>> {
    let mut runs = Vec::new();
    for len in (min_len..=Rank::CHAIN.len()).rev() {
        while let Some(start) = find_run(&pool.counts(), len, per) {
            let mut run = Vec::with_capacity(len * per as usize);
            for rank in &Rank::CHAIN[start..start + len] {
                run.extend(pool.take(*rank, per as usize));
            }
            runs.push(run);
        }
    }
    runs
}

fn find_run(counts: &RankCounts, len: usize, per: u8) -> Option<usize> {
    if len == 0 || len > Rank::CHAIN.len() {
        return None;
    }
    (0..=Rank::CHAIN.len() - len).find(|&start| {
        Rank::CHAIN[start..start + len]
            .iter()
            .all(|rank| counts.get(*rank) >= per)
    })
}

/// Wings for an airplane of `k` triples: the k lowest pairs, else the k
/// lowest singles, else every leftover when splitting the pairs makes exactly
/// k single wings. Twos and jokers never fly.
fn take_wings(k: usize, pairs: &mut Vec<Vec<Card>>, singles: &mut Vec<Card>) -> Vec<Card> {
    let can_fly = |card: &Card| card.rank.can_chain();

    let pair_slots: Vec<usize> = pairs
        .iter()
        .enumerate()
        .filter(|(_, pair)| pair.first().is_some_and(can_fly))
        .map(|(index, _)| index)
        .collect();
    let single_slots: Vec<usize> = singles
        .iter()
        .enumerate()
        .filter(|(_, card)| can_fly(*card))
        .map(|(index, _)| index)
        .collect();

    if pair_slots.len() >= k {
        let mut wings = Vec::with_capacity(k * 2);
        for &index in pair_slots[..k].iter().rev() {
            wings.extend(pairs.remove(index));
        }
        wings.sort();
        return wings;
    }

    if single_slots.len() >= k {
        let mut wings: Vec<Card> = single_slots[..k]
            .iter()
            .rev()
            .map(|&index| singles.remove(index))
            .collect();
        wings.sort();
        return wings;
    }

    // Pairs are split only when every leftover becomes a wing.
    let absorbs_rest = single_slots.len() == singles.len()
        && pair_slots.len() == pairs.len()
        && singles.len() + pairs.len() * 2 == k;
    if !absorbs_rest {
        return Vec::new();
    }

    let mut wings: Vec<Card> = singles.drain(..).collect();
    wings.extend(pairs.drain(..).flatten());
    wings.sort();
    wings
}
