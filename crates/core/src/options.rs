use std::fmt;

use serde::{Deserialize, Serialize};

pub const STARTING_GOLD_MAX: u32 = 50_000;
pub const HAMMER_PRICE_MAX: u32 = 50;

/// Tunable game options carried by a ruleset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub starting_gold: u32,
    pub hammer_price: u32,
    pub fog_of_war: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self { starting_gold: 0, hammer_price: 20, fog_of_war: true }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum OptionError {
    OutOfRange { option: &'static str, value: u32, max: u32 },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { option, value, max } => {
                write!(f, "option `{option}` is {value}, allowed range is 0..={max}")
            }
        }
    }
}

impl GameOptions {
    pub fn validate(&self) -> Result<(), OptionError> {
        if self.starting_gold > STARTING_GOLD_MAX {
            return Err(OptionError::OutOfRange {
                option: "starting_gold",
                value: self.starting_gold,
                max: STARTING_GOLD_MAX,
            });
        }
        if self.hammer_price > HAMMER_PRICE_MAX {
            return Err(OptionError::OutOfRange {
                option: "hammer_price",
                value: self.hammer_price,
                max: HAMMER_PRICE_MAX,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let options = GameOptions::default();
        assert_eq!(options.starting_gold, 0);
        assert_eq!(options.hammer_price, 20);
        assert!(options.fog_of_war);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_name_the_offending_option() {
        let options = GameOptions { starting_gold: 50_001, ..GameOptions::default() };
        let err = options.validate().unwrap_err();
        assert_eq!(
            err,
            OptionError::OutOfRange { option: "starting_gold", value: 50_001, max: 50_000 }
        );

        let options = GameOptions { hammer_price: 51, ..GameOptions::default() };
        assert!(matches!(
            options.validate(),
            Err(OptionError::OutOfRange { option: "hammer_price", .. })
        ));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults_when_deserializing() {
        let options: GameOptions = serde_json::from_str(r#"{"hammer_price": 5}"#).unwrap();
        assert_eq!(options.hammer_price, 5);
        assert_eq!(options.starting_gold, 0);
        assert!(options.fog_of_war);
    }
}
