//! Day 4: Scratchcards

use lib::input::ErrorKind;
use lib::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("expected `Card`, but got `{0}`")]
    Card(&'static str),
    #[error("empty line")]
    Empty,
}

/// A scratchcard with the winning numbers on the left and the numbers we have
/// on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u32,
    pub winners: ArrayVec<u32, 16>,
    pub numbers: ArrayVec<u32, 32>,
}

impl Card {
    /// Number of distinct numbers we have which are winning numbers.
    pub fn matches(&self) -> usize {
        self.numbers
            .iter()
            .enumerate()
            .filter(|&(n, d)| self.winners.contains(d) && !self.numbers[..n].contains(d))
            .count()
    }

    /// Points the card is worth, doubling for each match after the first.
    pub fn score(&self) -> u32 {
        match self.matches() {
            0 => 0,
            n => 1 << (n - 1),
        }
    }
}

type CardLine = Split<':', ((W<&'static str>, u32), Split<'|', (ArrayVec<u32, 16>, ArrayVec<u32, 32>)>)>;

lib::from_input! {
    |(Split(((W(card), id), Split((winners, numbers))))): CardLine| -> Card {
        if card != "Card" {
            return Err(ParseCardError::Card(card).into());
        }

        Ok(Card { id, winners, numbers })
    }
}

/// Total number of cards held once every won copy has been processed.
///
/// A card with `m` matches wins one copy of each of the next `m` cards for
/// every instance of it that we hold.
pub fn total_cards(cards: &[Card]) -> usize {
    let mut copies = vec![1usize; cards.len()];

    for (i, card) in cards.iter().enumerate() {
        let held = copies[i];
        let end = (i + 1 + card.matches()).min(cards.len());

        for c in &mut copies[i + 1..end] {
            *c += held;
        }
    }

    copies.iter().sum()
}

pub fn solve(mut input: IStr) -> Result<(u32, usize)> {
    let mut cards = Vec::new();

    while let Some(mut line) = input.try_line::<IStr>()? {
        if line.is_empty() {
            return Err(line.error(ErrorKind::Boxed(ParseCardError::Empty.into())).into());
        }

        let card = line.next::<Card>()?;
        debug!("card {}: {} matches", card.id, card.matches());
        cards.push(card);
    }

    let o1 = cards.iter().map(Card::score).sum();
    let o2 = total_cards(&cards);
    Ok((o1, o2))
}
