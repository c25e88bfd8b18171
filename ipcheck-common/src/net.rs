use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

#[cfg(feature = "user")]
use schemars::JsonSchema;

/// Outcome of checking a header checksum. Both variants
/// are ordinary results, neither is an error.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[cfg_attr(feature = "user", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[default]
    Valid,
    Invalid,
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}
