//! Owned positions and their cost-basis P/L.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Growth,
    Defensive,
    Other(String),
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_lowercase().as_str() {
            "growth" => Category::Growth,
            "defensive" => Category::Defensive,
            _ => Category::Other(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Growth => f.pad("Growth"),
            Category::Defensive => f.pad("Defensive"),
            Category::Other(name) => f.pad(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub ticker: String,
    pub name: Option<String>,
    pub category: Category,
    pub average_cost: f64,
    pub quantity: f64,
}

impl Holding {
    pub fn new(ticker: &str, category: Category, average_cost: f64, quantity: f64) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            name: None,
            category,
            average_cost,
            quantity,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn cost(&self) -> f64 {
        self.quantity * self.average_cost
    }

    pub fn gain(&self, price: f64) -> f64 {
        self.value(price) - self.cost()
    }

    /// (price - average_cost) / average_cost, 0 for a zero cost basis.
    pub fn pct_return(&self, price: f64) -> f64 {
        if self.average_cost == 0.0 {
            return 0.0;
        }
        (price - self.average_cost) / self.average_cost
    }

    /// Value change since the previous close, 0 without one.
    pub fn day_change(&self, price: f64, prev_close: f64) -> f64 {
        if prev_close <= 0.0 {
            return 0.0;
        }
        (price - prev_close) * self.quantity
    }
}
