use crate::trace::program_counter::ProgramCounter;

use serde::{de::Error as DeError, Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Bare lowercase hex string, the form both trace formats reduce to.
pub struct ProgramCounterHex;

impl SerializeAs<ProgramCounter> for ProgramCounterHex {
    fn serialize_as<S>(value: &ProgramCounter, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_str())
    }
}

impl<'de> DeserializeAs<'de, ProgramCounter> for ProgramCounterHex {
    fn deserialize_as<D>(deserializer: D) -> Result<ProgramCounter, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse::<ProgramCounter>()
            .map_err(|err| DeError::custom(format!("invalid program counter: {}", err)))
    }
}
