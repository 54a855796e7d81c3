use std::str::FromStr;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected form submission. The display text doubles as the message
/// shown to the user, one message per violated constraint.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Please enter a title.")]
    EmptyTitle,
    #[error("Please enter a valid amount.")]
    InvalidAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub title: String,
    #[serde(default)]
    pub amount: Decimal,
}

impl Expense {
    /// Build a record from raw form text. The title is trimmed and must be
    /// non-empty; the amount must parse as a number (comma decimal
    /// separators are accepted).
    pub fn from_input(title: &str, amount: &str) -> Result<Self, InputError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(InputError::EmptyTitle);
        }

        let amount = amount.trim().replace(',', ".");
        let amount = Decimal::from_str(&amount).map_err(|_| InputError::InvalidAmount)?;

        Ok(Expense {
            title: title.to_string(),
            amount,
        })
    }

    pub fn to_list_item(&self, currency: &str) -> ListItem {
        let amount_style = if self.amount < Decimal::ZERO {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        ListItem::new(Line::from(vec![
            Span::raw(format!("{:<30} ", sanitize(&self.title))),
            Span::styled(format!("{}{:.2}", currency, self.amount), amount_style),
        ]))
    }
}

/// Strip control characters from user-entered text before it reaches the
/// terminal. Record content must never be interpreted as display-control
/// data, so escape sequences and friends are removed rather than rendered.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}
