//! Fixed geography table used for employee addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// US states employees can be located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    CA,
    NY,
    TX,
    WA,
    IL,
    MA,
    CO,
    GA,
    FL,
    OR,
}

impl State {
    pub const ALL: [State; 10] = [
        State::CA,
        State::NY,
        State::TX,
        State::WA,
        State::IL,
        State::MA,
        State::CO,
        State::GA,
        State::FL,
        State::OR,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            State::CA => "CA",
            State::NY => "NY",
            State::TX => "TX",
            State::WA => "WA",
            State::IL => "IL",
            State::MA => "MA",
            State::CO => "CO",
            State::GA => "GA",
            State::FL => "FL",
            State::OR => "OR",
        }
    }

    /// Cities sampled for addresses in this state.
    pub fn cities(self) -> &'static [&'static str] {
        match self {
            State::CA => &["San Francisco", "Los Angeles", "San Diego", "San Jose"],
            State::NY => &["New York", "Buffalo", "Rochester", "Albany"],
            State::TX => &["Austin", "Houston", "Dallas", "San Antonio"],
            State::WA => &["Seattle", "Spokane", "Tacoma", "Bellevue"],
            State::IL => &["Chicago", "Springfield", "Naperville"],
            State::MA => &["Boston", "Cambridge", "Worcester"],
            State::CO => &["Denver", "Boulder", "Colorado Springs"],
            State::GA => &["Atlanta", "Savannah", "Augusta"],
            State::FL => &["Miami", "Orlando", "Tampa", "Jacksonville"],
            State::OR => &["Portland", "Eugene", "Salem"],
        }
    }

    /// Inclusive range of five-digit zip codes for this state.
    pub fn zip_range(self) -> (u32, u32) {
        match self {
            State::CA => (90001, 96162),
            State::NY => (10001, 14925),
            State::TX => (75001, 79999),
            State::WA => (98001, 99403),
            State::IL => (60001, 62999),
            State::MA => (1001, 2791),
            State::CO => (80001, 81658),
            State::GA => (30002, 31999),
            State::FL => (32003, 34997),
            State::OR => (97001, 97920),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
