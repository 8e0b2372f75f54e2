// src/shared_data.rs

use crate::errors::{OptimizerError, Result};
use crate::global_variables::NUM_LIGHTS;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The four approaches of the intersection, in command-line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    North,
    South,
    West,
    East,
}

impl Approach {
    pub const ALL: [Approach; NUM_LIGHTS] = [
        Approach::North,
        Approach::South,
        Approach::West,
        Approach::East,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Approach::North => "north",
            Approach::South => "south",
            Approach::West => "west",
            Approach::East => "east",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Approach::North => "N",
            Approach::South => "S",
            Approach::West => "W",
            Approach::East => "E",
        }
    }
}

/// Per-approach congestion constants, computed once per run from the vehicle count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightConstants {
    /// Normalized occupancy `(capacity - vehicles) / capacity`. More vehicles means a smaller value.
    pub congestion: f64,
    /// Flow capacity of the approach.
    pub capacity: f64,
    /// Random/overflow delay term. Independent of the green time.
    pub overflow_term: f64,
}

/// A green-time assignment (one entry per light) and its modeled total delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub greens: Vec<u32>,
    pub total_delay: f64,
}

impl Individual {
    pub fn new(greens: Vec<u32>, total_delay: f64) -> Self {
        Self {
            greens,
            total_delay,
        }
    }

    /// Ascending order by total delay.
    pub fn cmp_delay(&self, other: &Individual) -> Ordering {
        self.total_delay.total_cmp(&other.total_delay)
    }
}

/// The primary result record: one green time per approach plus the total delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPlan {
    pub north: u32,
    pub south: u32,
    pub west: u32,
    pub east: u32,
    pub delay: f64,
}

impl SignalPlan {
    pub fn from_individual(individual: &Individual) -> Result<Self> {
        match individual.greens.as_slice() {
            &[north, south, west, east] => Ok(Self {
                north,
                south,
                west,
                east,
                delay: individual.total_delay,
            }),
            greens => Err(OptimizerError::PlanShape {
                expected: NUM_LIGHTS,
                got: greens.len(),
            }),
        }
    }

    pub fn green_for(&self, approach: Approach) -> u32 {
        match approach {
            Approach::North => self.north,
            Approach::South => self.south,
            Approach::West => self.west,
            Approach::East => self.east,
        }
    }
}

impl fmt::Display for SignalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Approach::ALL
            .iter()
            .map(|a| format!("{}={}", a.short_name(), self.green_for(*a)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
