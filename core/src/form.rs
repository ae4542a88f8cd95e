//! The five input slots holding the current recommendation.
//!
//! `FormBinding` is a pure projection layer: it never validates, and every
//! populate or clear rewrites its slots in one call so no half-updated state
//! is ever observable.

use std::fmt;
use std::str::FromStr;

use crate::types::Recommendation;

/// One of the five input slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    ProductA,
    ProductB,
    RecomType,
    Likes,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::ProductA,
        Field::ProductB,
        Field::RecomType,
        Field::Likes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::ProductA => "product_a",
            Field::ProductB => "product_b",
            Field::RecomType => "recom_type",
            Field::Likes => "likes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBinding {
    slots: Recommendation,
}

impl FormBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every slot as raw text.
    pub fn read(&self) -> Recommendation {
        self.slots.clone()
    }

    /// Overwrite all five slots from a server payload.
    pub fn populate(&mut self, payload: &Recommendation) {
        self.slots = payload.clone();
    }

    /// Blank the four data slots. `id` is left alone.
    pub fn clear(&mut self) {
        let id = std::mem::take(&mut self.slots.id);
        self.slots = Recommendation {
            id,
            ..Recommendation::default()
        };
    }

    pub fn clear_id(&mut self) {
        self.slots.id.clear();
    }

    /// Blank every slot, `id` included.
    pub fn reset(&mut self) {
        self.slots = Recommendation::default();
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.slots.id,
            Field::ProductA => &self.slots.product_a,
            Field::ProductB => &self.slots.product_b,
            Field::RecomType => &self.slots.recom_type,
            Field::Likes => &self.slots.likes,
        }
    }

    /// Keystroke-level edit of a single slot.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Id => &mut self.slots.id,
            Field::ProductA => &mut self.slots.product_a,
            Field::ProductB => &mut self.slots.product_b,
            Field::RecomType => &mut self.slots.recom_type,
            Field::Likes => &mut self.slots.likes,
        };
        *slot = value.into();
    }
}
