use std::fmt;

use serde::Serialize;

/// A CPV code is always exactly five digits.
pub const CPV_CODE_LEN: usize = 5;

/// A validated CPV (Common Procurement Vocabulary) classification code:
/// exactly five ASCII digits.
///
/// The only way to obtain one is [`CpvCode::normalize`], so every value in
/// the system upholds the five-digit invariant by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CpvCode(String);

impl CpvCode {
    /// Normalize a raw model reply into a CPV code.
    ///
    /// The reply is trimmed, then every non-digit character is discarded
    /// wherever it appears, preserving digit order. The remaining digit
    /// string is length-adjusted: more than five digits keeps the first five,
    /// exactly four digits gains a trailing `'0'`, every other length is left
    /// alone. The result is accepted only if it ends up at exactly five
    /// digits; `"Code: 77311 (maintenance)"` normalizes to `"77311"` while
    /// `"031"` is rejected.
    pub fn normalize(raw: &str) -> Option<Self> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let adjusted = if digits.len() > CPV_CODE_LEN {
            digits[..CPV_CODE_LEN].to_string()
        } else if digits.len() == CPV_CODE_LEN - 1 {
            format!("{digits}0")
        } else {
            digits
        };

        (adjusted.len() == CPV_CODE_LEN).then_some(Self(adjusted))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CpvCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
