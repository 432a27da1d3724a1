//! Input masks
//!
//! Display masks for Brazilian customer identifiers. Punctuation is inserted
//! at fixed digit positions on every keystroke; validation always runs against
//! the digit-only normalization, never the masked display string.

use smallvec::SmallVec;

/// Maximum number of digits in a tax id (CPF) or mobile phone number.
const MAX_DIGITS: usize = 11;

/// A masked text input holding both the display string and the digit-only
/// value used for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedInput {
    display: String,
    digits: String,
}

impl MaskedInput {
    /// Create a tax-id input masked as `XXX.XXX.XXX-XX`.
    pub fn tax_id(raw: &str) -> Self {
        let display = mask_tax_id(raw);
        let digits = digits_only(&display);

        Self { display, digits }
    }

    /// Create a phone input masked as `(XX) XXXX-XXXX` or `(XX) XXXXX-XXXX`.
    pub fn phone(raw: &str) -> Self {
        let display = mask_phone(raw);
        let digits = digits_only(&display);

        Self { display, digits }
    }

    /// The masked display string.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The digit-only normalization.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Whether no digits have been entered.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

/// Strip everything but ASCII digits from the input.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Format a tax id (CPF) as `XXX.XXX.XXX-XX`, inserting punctuation as digits
/// arrive. Digits beyond the eleventh are dropped.
pub fn mask_tax_id(input: &str) -> String {
    let digits = take_digits(input);
    let mut out = String::with_capacity(14);

    for (position, digit) in digits.iter().enumerate() {
        if position == 3 || position == 6 {
            out.push('.');
        }

        if position == 9 {
            out.push('-');
        }

        out.push(*digit);
    }

    out
}

/// Format a phone number as `(XX) XXXX-XXXX`, or `(XX) XXXXX-XXXX` once an
/// eleventh digit arrives. Digits beyond the eleventh are dropped.
pub fn mask_phone(input: &str) -> String {
    let digits = take_digits(input);

    if digits.is_empty() {
        return String::new();
    }

    // Five-digit local prefix for eleven-digit mobile numbers, four otherwise.
    let hyphen_at = if digits.len() > 10 { 7 } else { 6 };
    let mut out = String::with_capacity(15);

    out.push('(');

    for (position, digit) in digits.iter().enumerate() {
        if position == 2 {
            out.push_str(") ");
        }

        if position == hyphen_at {
            out.push('-');
        }

        out.push(*digit);
    }

    out
}

/// Collect up to [`MAX_DIGITS`] digits from the input.
fn take_digits(input: &str) -> SmallVec<[char; MAX_DIGITS]> {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_id_masks_full_cpf() {
        assert_eq!(mask_tax_id("12345678901"), "123.456.789-01");
    }

    #[test]
    fn tax_id_masks_partial_input_progressively() {
        assert_eq!(mask_tax_id(""), "");
        assert_eq!(mask_tax_id("123"), "123");
        assert_eq!(mask_tax_id("1234"), "123.4");
        assert_eq!(mask_tax_id("1234567"), "123.456.7");
        assert_eq!(mask_tax_id("1234567890"), "123.456.789-0");
    }

    #[test]
    fn tax_id_strips_punctuation_and_truncates() {
        assert_eq!(mask_tax_id("123.456.789-01"), "123.456.789-01");
        assert_eq!(mask_tax_id("123456789012345"), "123.456.789-01");
    }

    #[test]
    fn phone_masks_ten_digit_landline() {
        assert_eq!(mask_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn phone_masks_eleven_digit_mobile() {
        assert_eq!(mask_phone("11912345678"), "(11) 91234-5678");
    }

    #[test]
    fn phone_masks_partial_input_progressively() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("1"), "(1");
        assert_eq!(mask_phone("11"), "(11");
        assert_eq!(mask_phone("119"), "(11) 9");
        assert_eq!(mask_phone("1191234"), "(11) 9123-4");
    }

    #[test]
    fn digits_only_strips_mask_punctuation() {
        assert_eq!(digits_only("123.456.789-01"), "12345678901");
        assert_eq!(digits_only("(11) 91234-5678"), "11912345678");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn masked_input_keeps_display_and_digits_in_sync() {
        let tax_id = MaskedInput::tax_id("12345678901");

        assert_eq!(tax_id.display(), "123.456.789-01");
        assert_eq!(tax_id.digits(), "12345678901");
        assert!(!tax_id.is_empty());

        let phone = MaskedInput::phone("");

        assert_eq!(phone.display(), "");
        assert!(phone.is_empty());
    }
}
