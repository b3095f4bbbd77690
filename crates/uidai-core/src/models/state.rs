use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::UidaiError;

/// One of the 37 states and union territories recognized by the cleaning stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndianState {
    AndhraPradesh,
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Goa,
    Gujarat,
    Haryana,
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    TamilNadu,
    Telangana,
    Tripura,
    UttarPradesh,
    Uttarakhand,
    WestBengal,
    AndamanAndNicobarIslands,
    Chandigarh,
    DadraAndNagarHaveli,
    DamanAndDiu,
    Delhi,
    JammuAndKashmir,
    Ladakh,
    Lakshadweep,
    Puducherry,
}

impl IndianState {
    /// Every recognized state and union territory
    pub const ALL: [IndianState; 37] = [
        Self::AndhraPradesh,
        Self::ArunachalPradesh,
        Self::Assam,
        Self::Bihar,
        Self::Chhattisgarh,
        Self::Goa,
        Self::Gujarat,
        Self::Haryana,
        Self::HimachalPradesh,
        Self::Jharkhand,
        Self::Karnataka,
        Self::Kerala,
        Self::MadhyaPradesh,
        Self::Maharashtra,
        Self::Manipur,
        Self::Meghalaya,
        Self::Mizoram,
        Self::Nagaland,
        Self::Odisha,
        Self::Punjab,
        Self::Rajasthan,
        Self::Sikkim,
        Self::TamilNadu,
        Self::Telangana,
        Self::Tripura,
        Self::UttarPradesh,
        Self::Uttarakhand,
        Self::WestBengal,
        Self::AndamanAndNicobarIslands,
        Self::Chandigarh,
        Self::DadraAndNagarHaveli,
        Self::DamanAndDiu,
        Self::Delhi,
        Self::JammuAndKashmir,
        Self::Ladakh,
        Self::Lakshadweep,
        Self::Puducherry,
    ];

    /// Canonical name as written in the cleaned datasets
    pub fn name(&self) -> &'static str {
        match self {
            Self::AndhraPradesh => "Andhra Pradesh",
            Self::ArunachalPradesh => "Arunachal Pradesh",
            Self::Assam => "Assam",
            Self::Bihar => "Bihar",
            Self::Chhattisgarh => "Chhattisgarh",
            Self::Goa => "Goa",
            Self::Gujarat => "Gujarat",
            Self::Haryana => "Haryana",
            Self::HimachalPradesh => "Himachal Pradesh",
            Self::Jharkhand => "Jharkhand",
            Self::Karnataka => "Karnataka",
            Self::Kerala => "Kerala",
            Self::MadhyaPradesh => "Madhya Pradesh",
            Self::Maharashtra => "Maharashtra",
            Self::Manipur => "Manipur",
            Self::Meghalaya => "Meghalaya",
            Self::Mizoram => "Mizoram",
            Self::Nagaland => "Nagaland",
            Self::Odisha => "Odisha",
            Self::Punjab => "Punjab",
            Self::Rajasthan => "Rajasthan",
            Self::Sikkim => "Sikkim",
            Self::TamilNadu => "Tamil Nadu",
            Self::Telangana => "Telangana",
            Self::Tripura => "Tripura",
            Self::UttarPradesh => "Uttar Pradesh",
            Self::Uttarakhand => "Uttarakhand",
            Self::WestBengal => "West Bengal",
            Self::AndamanAndNicobarIslands => "Andaman and Nicobar Islands",
            Self::Chandigarh => "Chandigarh",
            Self::DadraAndNagarHaveli => "Dadra and Nagar Haveli",
            Self::DamanAndDiu => "Daman and Diu",
            Self::Delhi => "Delhi",
            Self::JammuAndKashmir => "Jammu and Kashmir",
            Self::Ladakh => "Ladakh",
            Self::Lakshadweep => "Lakshadweep",
            Self::Puducherry => "Puducherry",
        }
    }

    /// ISO 3166-2:IN subdivision code used by the map layer.
    ///
    /// Dadra and Nagar Haveli and Daman and Diu were merged into a single
    /// subdivision in 2020, so both share `IN-DH`.
    pub fn iso_code(&self) -> &'static str {
        match self {
            Self::AndhraPradesh => "IN-AP",
            Self::ArunachalPradesh => "IN-AR",
            Self::Assam => "IN-AS",
            Self::Bihar => "IN-BR",
            Self::Chhattisgarh => "IN-CG",
            Self::Goa => "IN-GA",
            Self::Gujarat => "IN-GJ",
            Self::Haryana => "IN-HR",
            Self::HimachalPradesh => "IN-HP",
            Self::Jharkhand => "IN-JH",
            Self::Karnataka => "IN-KA",
            Self::Kerala => "IN-KL",
            Self::MadhyaPradesh => "IN-MP",
            Self::Maharashtra => "IN-MH",
            Self::Manipur => "IN-MN",
            Self::Meghalaya => "IN-ML",
            Self::Mizoram => "IN-MZ",
            Self::Nagaland => "IN-NL",
            Self::Odisha => "IN-OD",
            Self::Punjab => "IN-PB",
            Self::Rajasthan => "IN-RJ",
            Self::Sikkim => "IN-SK",
            Self::TamilNadu => "IN-TN",
            Self::Telangana => "IN-TS",
            Self::Tripura => "IN-TR",
            Self::UttarPradesh => "IN-UP",
            Self::Uttarakhand => "IN-UK",
            Self::WestBengal => "IN-WB",
            Self::AndamanAndNicobarIslands => "IN-AN",
            Self::Chandigarh => "IN-CH",
            Self::DadraAndNagarHaveli => "IN-DH",
            Self::DamanAndDiu => "IN-DH",
            Self::Delhi => "IN-DL",
            Self::JammuAndKashmir => "IN-JK",
            Self::Ladakh => "IN-LA",
            Self::Lakshadweep => "IN-LD",
            Self::Puducherry => "IN-PY",
        }
    }
}

impl fmt::Display for IndianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndianState {
    type Err = UidaiError;

    /// Parses the canonical name; surrounding whitespace is ignored, spelling is not
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.name() == trimmed)
            .ok_or_else(|| UidaiError::UnknownState {
                name: trimmed.to_string(),
            })
    }
}

impl Serialize for IndianState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for IndianState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_states_have_unique_names() {
        let names: HashSet<_> = IndianState::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), 37);
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for state in IndianState::ALL {
            assert_eq!(state.name().parse::<IndianState>().unwrap(), state);
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!("  Tamil Nadu ".parse::<IndianState>().unwrap(), IndianState::TamilNadu);
    }

    #[test]
    fn test_parse_rejects_unknown_and_misspelled() {
        assert!("Orissa".parse::<IndianState>().is_err());
        assert!("bihar".parse::<IndianState>().is_err());
        assert!("".parse::<IndianState>().is_err());
    }

    #[test]
    fn test_iso_codes() {
        assert_eq!(IndianState::Bihar.iso_code(), "IN-BR");
        assert_eq!(IndianState::Goa.iso_code(), "IN-GA");
        assert_eq!(IndianState::Delhi.iso_code(), "IN-DL");
        assert!(IndianState::ALL.iter().all(|s| s.iso_code().starts_with("IN-")));
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&IndianState::WestBengal).unwrap();
        assert_eq!(json, "\"West Bengal\"");
        let parsed: IndianState = serde_json::from_str("\"Ladakh\"").unwrap();
        assert_eq!(parsed, IndianState::Ladakh);
    }
}
