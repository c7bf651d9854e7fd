//! SMS message model
//!
//! SMS delivery is no longer offered; the model remains so callers that build
//! messages keep compiling and can still normalize phone numbers.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sms {
    pub country_code: String,
    pub local_number: String,
    pub message: String,
}

impl Sms {
    pub fn new(
        country_code: impl Into<String>,
        local_number: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            local_number: local_number.into(),
            message: message.into(),
        }
    }

    /// E.164-style number: digits only, `+` prefixed
    ///
    /// ASCII and Arabic-Indic digits (U+0660..U+0669) are kept as written;
    /// everything else is dropped.
    pub fn phone_number(&self) -> String {
        let digits: String = self
            .country_code
            .chars()
            .chain(self.local_number.chars())
            .filter(|c| c.is_ascii_digit() || ('\u{0660}'..='\u{0669}').contains(c))
            .collect();
        format!("+{}", digits)
    }
}
