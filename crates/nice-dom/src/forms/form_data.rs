//! Form Data
//!
//! Entries collected from form-associated controls at submission.

use super::FormControl;

/// Form data for submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text value
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append a control's contribution. Unnamed, disabled and valueless
    /// controls contribute nothing.
    pub fn append_control(&mut self, control: &dyn FormControl) -> bool {
        if control.is_disabled() {
            return false;
        }
        match (control.name(), control.form_value()) {
            (Some(name), Some(value)) if !name.is_empty() => {
                self.append(name, value);
                true
            }
            _ => false,
        }
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if key exists
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to URL-encoded string
    pub fn to_url_encoded(&self) -> String {
        self.entries.iter()
            .map(|(name, value)| format!("{}={}", urlencoding_encode(name), urlencoding_encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn urlencoding_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                result.push(c);
            }
            ' ' => result.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ValidityState;

    struct Control {
        name: Option<&'static str>,
        value: Option<&'static str>,
        disabled: bool,
        validity: ValidityState,
    }

    impl FormControl for Control {
        fn name(&self) -> Option<&str> {
            self.name
        }

        fn form_value(&self) -> Option<&str> {
            self.value
        }

        fn is_disabled(&self) -> bool {
            self.disabled
        }

        fn validity(&self) -> &ValidityState {
            &self.validity
        }
    }

    #[test]
    fn test_append_control() {
        let mut data = FormData::new();
        let fruit = Control { name: Some("fruit"), value: Some("pear"), disabled: false, validity: ValidityState::default() };
        let empty = Control { name: Some("color"), value: None, disabled: false, validity: ValidityState::missing() };
        let off = Control { name: Some("size"), value: Some("xl"), disabled: true, validity: ValidityState::default() };

        assert!(data.append_control(&fruit));
        assert!(!data.append_control(&empty));
        assert!(!data.append_control(&off));

        assert_eq!(data.get("fruit"), Some("pear"));
        assert!(!data.has("color"));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_url_encoded() {
        let mut data = FormData::new();
        data.append("city", "São Paulo");
        data.append("q", "a&b");
        assert_eq!(data.to_url_encoded(), "city=S%C3%A3o+Paulo&q=a%26b");
    }
}
