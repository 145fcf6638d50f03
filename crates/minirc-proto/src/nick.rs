//! Nickname grammar validation.

/// Extension trait for checking if a string is a well-formed nickname.
pub trait NickExt {
    /// Check whether this string is a well-formed nickname.
    ///
    /// A nickname starts with an ASCII letter, followed by any number of
    /// ASCII letters, digits, `_` or `-`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minirc_proto::NickExt;
    ///
    /// assert!("nick".is_valid_nick());
    /// assert!("Nick_123".is_valid_nick());
    /// assert!("a-b".is_valid_nick());
    ///
    /// assert!(!"123nick".is_valid_nick());
    /// assert!(!"".is_valid_nick());
    /// assert!(!"nick name".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;
}

impl NickExt for &str {
    fn is_valid_nick(&self) -> bool {
        let mut chars = self.chars();

        let first = match chars.next() {
            Some(c) => c,
            None => return false,
        };

        if !first.is_ascii_alphabetic() {
            return false;
        }

        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}
