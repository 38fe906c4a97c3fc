//! Decomposition of composite registration identifiers
//!
//! A RUES registration identifier (`id_rm`) is a composite string: the last
//! 10 characters are the registration number and the remaining prefix is the
//! chamber-of-commerce code, zero-padded to 2 characters.

/// A registration identifier split into its chamber and number parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationId {
    /// 10-character registration number, unique within a chamber.
    pub registration_number: String,
    /// 2-character code of the chamber of commerce that issued the
    /// registration.
    pub chamber_code: String,
}

impl RegistrationId {
    /// Splits a composite identifier by position. Content is not validated;
    /// malformed input yields a best-effort split (inputs of 10 characters or
    /// fewer become the whole registration number under chamber `"00"`).
    pub fn decompose(identifier: &str) -> Self {
        let chars: Vec<char> = identifier.chars().collect();
        let split = chars.len().saturating_sub(10);
        let chamber: String = chars[..split].iter().collect();
        let registration_number: String = chars[split..].iter().collect();
        RegistrationId {
            registration_number,
            chamber_code: format!("{:0>2}", chamber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_two_char_chamber() {
        let id = RegistrationId::decompose("210037256304");
        assert_eq!(id.registration_number, "0037256304");
        assert_eq!(id.chamber_code, "21");
    }

    #[test]
    fn test_decompose_pads_single_char_chamber() {
        let id = RegistrationId::decompose("40001763070");
        assert_eq!(id.registration_number, "0001763070");
        assert_eq!(id.chamber_code, "04");
    }

    #[test]
    fn test_decompose_exact_ten_chars() {
        let id = RegistrationId::decompose("0037256304");
        assert_eq!(id.registration_number, "0037256304");
        assert_eq!(id.chamber_code, "00");
    }

    #[test]
    fn test_decompose_short_input() {
        let id = RegistrationId::decompose("123");
        assert_eq!(id.registration_number, "123");
        assert_eq!(id.chamber_code, "00");
    }

    #[test]
    fn test_decompose_empty_input() {
        let id = RegistrationId::decompose("");
        assert_eq!(id.registration_number, "");
        assert_eq!(id.chamber_code, "00");
    }

    #[test]
    fn test_decompose_long_chamber_kept_whole() {
        let id = RegistrationId::decompose("1230037256304");
        assert_eq!(id.registration_number, "0037256304");
        assert_eq!(id.chamber_code, "123");
    }
}
