use landlord_core::game::view::{PlayerView, SeatSummary};
use landlord_core::model::card::parse_cards;
use landlord_core::model::deck::DeckConfig;
use landlord_core::model::player::PlayerId;
use landlord_core::model::table::{Standing, TablePhase};
use landlord_core::rules::Play;

/// A view for seat 0 with `others` cards at seats 1 and 2.
pub(crate) fn view(hand: &str, others: [usize; 2], dealt: usize) -> PlayerView {
    let hand = parse_cards(hand).unwrap();
    let seats = vec![
        SeatSummary {
            id: PlayerId(0),
            name: "me".into(),
            card_count: hand.len(),
        },
        SeatSummary {
            id: PlayerId(1),
            name: "left".into(),
            card_count: others[0],
        },
        SeatSummary {
            id: PlayerId(2),
            name: "right".into(),
            card_count: others[1],
        },
    ];
    PlayerView {
        viewer: PlayerId(0),
        hand,
        seats,
        turn_holder: PlayerId(0),
        phase: TablePhase::Leading,
        standing: None,
        history: Vec::new(),
        cards_dealt: dealt,
        deck: DeckConfig::single(),
    }
}

/// Same as [`view`] with `cards` standing from seat 2.
pub(crate) fn facing(hand: &str, cards: &str, others: [usize; 2], dealt: usize) -> PlayerView {
    let mut view = view(hand, others, dealt);
    let play = Play::new(parse_cards(cards).unwrap()).unwrap();
    view.standing = Some(Standing {
        owner: PlayerId(2),
        play,
    });
    view.phase = TablePhase::Following;
    view
}
