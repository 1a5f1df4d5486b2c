//! Capacity policy for featured slots.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MAX_SHOWN;

/// Rule deciding whether the featured list is full and which slot a new
/// allocation receives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityPolicy {
    /// Full when `MAX_SHOWN` executions are featured; the lowest free slot is
    /// handed out, so gaps are reused.
    #[default]
    CountBased,

    /// Full when the highest occupied slot is `MAX_SHOWN`; new slots are
    /// appended after the highest one and gaps are never reused.
    MaxOrderBased,
}

impl CapacityPolicy {
    /// Picks the slot for a new allocation given the occupied slots in
    /// ascending order, or `None` when the featured list is full.
    ///
    /// ```rust
    /// use lineup_core::models::CapacityPolicy;
    ///
    /// assert_eq!(CapacityPolicy::CountBased.next_slot(&[1, 3]), Some(2));
    /// assert_eq!(CapacityPolicy::MaxOrderBased.next_slot(&[1, 3]), None);
    /// assert_eq!(CapacityPolicy::MaxOrderBased.next_slot(&[]), Some(1));
    /// ```
    pub fn next_slot(&self, occupied: &[u8]) -> Option<u8> {
        match self {
            CapacityPolicy::CountBased => {
                if occupied.len() >= usize::from(MAX_SHOWN) {
                    return None;
                }
                (1..=MAX_SHOWN).find(|slot| !occupied.contains(slot))
            }
            CapacityPolicy::MaxOrderBased => {
                let highest = occupied.last().copied().unwrap_or(0);
                if highest >= MAX_SHOWN {
                    None
                } else {
                    Some(highest + 1)
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityPolicy::CountBased => "count-based",
            CapacityPolicy::MaxOrderBased => "max-order-based",
        }
    }
}

impl FromStr for CapacityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" | "count-based" => Ok(CapacityPolicy::CountBased),
            "max-order" | "max-order-based" => Ok(CapacityPolicy::MaxOrderBased),
            _ => Err(format!("Invalid capacity policy: {s}")),
        }
    }
}
