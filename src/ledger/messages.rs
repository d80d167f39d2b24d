//! User-facing texts returned alongside successful mutations.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            "es" | "es-es" => Some(Locale::Es),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    BetCreated,
    BetUpdated,
    BetDeleted,
    BetWon,
    BetLost,
    BetVoided,
    BetCashedOut { amount: Decimal },
    BetReopened,
    TransactionCreated,
}

impl Message {
    pub fn render(&self, locale: Locale, currency: &str) -> String {
        match (locale, self) {
            (Locale::En, Message::BetCreated) => "Bet added.".into(),
            (Locale::En, Message::BetUpdated) => "Bet updated.".into(),
            (Locale::En, Message::BetDeleted) => "Bet deleted.".into(),
            (Locale::En, Message::BetWon) => "Bet marked as won.".into(),
            (Locale::En, Message::BetLost) => "Bet marked as lost.".into(),
            (Locale::En, Message::BetVoided) => "Bet voided. The stake has been refunded.".into(),
            (Locale::En, Message::BetCashedOut { amount }) => {
                format!("Bet cashed out for {currency}{}.", money(*amount))
            }
            (Locale::En, Message::BetReopened) => "Bet reopened and marked as pending.".into(),
            (Locale::En, Message::TransactionCreated) => "Transaction added.".into(),

            (Locale::Es, Message::BetCreated) => "Apuesta añadida correctamente.".into(),
            (Locale::Es, Message::BetUpdated) => "Apuesta actualizada correctamente.".into(),
            (Locale::Es, Message::BetDeleted) => "Apuesta eliminada correctamente.".into(),
            (Locale::Es, Message::BetWon) => "Apuesta marcada como ganada.".into(),
            (Locale::Es, Message::BetLost) => "Apuesta marcada como perdida.".into(),
            (Locale::Es, Message::BetVoided) => {
                "Apuesta anulada correctamente. El importe apostado ha sido devuelto.".into()
            }
            (Locale::Es, Message::BetCashedOut { amount }) => {
                format!("Apuesta cerrada (cash out) por {currency}{}.", money(*amount))
            }
            (Locale::Es, Message::BetReopened) => {
                "La apuesta ha sido reabierta y marcada como pendiente.".into()
            }
            (Locale::Es, Message::TransactionCreated) => "Transacción añadida correctamente.".into(),
        }
    }
}

/// Suggested category tags. Users may enter any other non-blank category.
pub fn suggested_categories(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => &[
            "Football",
            "Tennis",
            "Basketball",
            "eSports",
            "Motorsport",
            "Baseball",
            "Table Tennis",
            "Other",
        ],
        Locale::Es => &[
            "Fútbol",
            "Tenis",
            "Baloncesto",
            "eSports",
            "Deportes de Motor",
            "Béisbol",
            "Ping Pong",
            "Otro",
        ],
    }
}

fn money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
