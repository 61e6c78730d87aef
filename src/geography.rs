//! Geographic taxonomy used to canonicalize the `state` column.

use std::collections::{HashMap, HashSet};

/// Known misspellings and legacy names mapped to their canonical form.
static STATE_ALIASES: &[(&str, &str)] = &[
    ("ORISSA", "ODISHA"),
    ("UTTARANCHAL", "UTTARAKHAND"),
    ("PONDICHERRY", "PUDUCHERRY"),
    ("WEST  BENGAL", "WEST BENGAL"),
    ("WESTBENGAL", "WEST BENGAL"),
    ("WEST BANGAL", "WEST BENGAL"),
    ("WEST BENGLI", "WEST BENGAL"),
    ("CHHATISGARH", "CHHATTISGARH"),
    ("JAMMU & KASHMIR", "JAMMU AND KASHMIR"),
    ("DAMAN & DIU", "DAMAN AND DIU"),
    ("DADRA & NAGAR HAVELI", "DADRA AND NAGAR HAVELI"),
    (
        "THE DADRA AND NAGAR HAVELI AND DAMAN AND DIU",
        "DADRA AND NAGAR HAVELI AND DAMAN AND DIU",
    ),
];

/// States followed by union territories.
static VALID_STATES: &[&str] = &[
    "ANDHRA PRADESH",
    "ARUNACHAL PRADESH",
    "ASSAM",
    "BIHAR",
    "CHHATTISGARH",
    "GOA",
    "GUJARAT",
    "HARYANA",
    "HIMACHAL PRADESH",
    "JHARKHAND",
    "KARNATAKA",
    "KERALA",
    "MADHYA PRADESH",
    "MAHARASHTRA",
    "MANIPUR",
    "MEGHALAYA",
    "MIZORAM",
    "NAGALAND",
    "ODISHA",
    "PUNJAB",
    "RAJASTHAN",
    "SIKKIM",
    "TAMIL NADU",
    "TELANGANA",
    "TRIPURA",
    "UTTAR PRADESH",
    "UTTARAKHAND",
    "WEST BENGAL",
    "DELHI",
    "CHANDIGARH",
    "PUDUCHERRY",
    "LADAKH",
    "JAMMU AND KASHMIR",
    "LAKSHADWEEP",
    "ANDAMAN AND NICOBAR ISLANDS",
    "DADRA AND NAGAR HAVELI AND DAMAN AND DIU",
];

/// An alias table plus the closed set of region names a row may carry.
///
/// Immutable once built; share it by reference (or `Arc`) across tasks.
#[derive(Debug, Clone)]
pub struct Geography {
    aliases: HashMap<String, String>,
    valid: HashSet<String>,
}

impl Geography {
    pub fn new<A, V>(aliases: A, valid: V) -> Self
    where
        A: IntoIterator<Item = (String, String)>,
        V: IntoIterator<Item = String>,
    {
        Self {
            aliases: aliases.into_iter().collect(),
            valid: valid.into_iter().collect(),
        }
    }

    /// Indian states and union territories.
    pub fn india() -> Self {
        Self::new(
            STATE_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
            VALID_STATES.iter().map(|s| s.to_string()),
        )
    }

    /// Maps a known alias to its canonical name; anything else passes through.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.valid.contains(name)
    }

    pub fn valid_names(&self) -> impl Iterator<Item = &str> {
        self.valid.iter().map(String::as_str)
    }
}
