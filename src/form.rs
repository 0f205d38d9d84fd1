use crate::config::{DEFAULT_CURRENCY, SavedConfig};

pub const SERVER_URL_FIELD: usize = 0;
pub const REFRESH_SECS_FIELD: usize = 1;
pub const CURRENCY_FIELD: usize = 2;

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub invalid: bool,
}

impl FormField {
    fn new(label: &'static str, required: bool, value: impl Into<String>) -> Self {
        FormField {
            label,
            value: value.into(),
            required,
            invalid: false,
        }
    }
}

/// The settings form: server URL and refresh interval are required, the
/// currency code is optional (defaults to INR). Validation follows the
/// submit-gate contract: trim, mark empty required fields, clear the mark
/// everywhere else, report overall validity.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub saving: bool,
}

impl SettingsForm {
    pub fn from_config(config: &SavedConfig) -> Self {
        SettingsForm {
            fields: vec![
                FormField::new("Server URL", true, config.server_url.clone()),
                FormField::new(
                    "Refresh interval (seconds)",
                    true,
                    config.refresh_secs.to_string(),
                ),
                FormField::new("Currency code", false, config.currency.clone()),
            ],
            focus: 0,
            saving: false,
        }
    }

    pub fn focused_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Marks each empty required field invalid and clears the marking on the
    /// rest. The refresh interval must also be a positive integer.
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        for (index, field) in self.fields.iter_mut().enumerate() {
            let trimmed = field.value.trim();
            field.invalid = field.required && trimmed.is_empty();
            if index == REFRESH_SECS_FIELD && !trimmed.is_empty() {
                field.invalid = !matches!(trimmed.parse::<u64>(), Ok(n) if n > 0);
            }
            if field.invalid {
                valid = false;
            }
        }
        valid
    }

    /// Assumes `validate` returned true.
    pub fn to_config(&self) -> SavedConfig {
        let currency = self.fields[CURRENCY_FIELD].value.trim();
        SavedConfig {
            server_url: self.fields[SERVER_URL_FIELD].value.trim().to_string(),
            refresh_secs: self.fields[REFRESH_SECS_FIELD]
                .value
                .trim()
                .parse()
                .unwrap_or(crate::config::DEFAULT_REFRESH_SECS),
            currency: if currency.is_empty() {
                DEFAULT_CURRENCY.to_string()
            } else {
                currency.to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SettingsForm {
        SettingsForm::from_config(&SavedConfig::default())
    }

    #[test]
    fn empty_required_field_fails_and_is_marked() {
        let mut form = form();
        form.fields[SERVER_URL_FIELD].value = "   ".into();
        assert!(!form.validate());
        assert!(form.fields[SERVER_URL_FIELD].invalid);
        // the filled required field stays unmarked
        assert!(!form.fields[REFRESH_SECS_FIELD].invalid);
    }

    #[test]
    fn filling_a_field_clears_its_marking() {
        let mut form = form();
        form.fields[SERVER_URL_FIELD].value.clear();
        assert!(!form.validate());
        form.fields[SERVER_URL_FIELD].value = "http://rides.example".into();
        assert!(form.validate());
        assert!(!form.fields[SERVER_URL_FIELD].invalid);
    }

    #[test]
    fn empty_optional_field_is_allowed() {
        let mut form = form();
        form.fields[CURRENCY_FIELD].value.clear();
        assert!(form.validate());
        assert_eq!(form.to_config().currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn refresh_interval_must_be_a_positive_integer() {
        let mut form = form();
        form.fields[REFRESH_SECS_FIELD].value = "soon".into();
        assert!(!form.validate());
        form.fields[REFRESH_SECS_FIELD].value = "0".into();
        assert!(!form.validate());
        form.fields[REFRESH_SECS_FIELD].value = " 45 ".into();
        assert!(form.validate());
        assert_eq!(form.to_config().refresh_secs, 45);
    }

    #[test]
    fn to_config_trims_values() {
        let mut form = form();
        form.fields[SERVER_URL_FIELD].value = "  http://rides.example:5000  ".into();
        assert!(form.validate());
        assert_eq!(form.to_config().server_url, "http://rides.example:5000");
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut form = form();
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, CURRENCY_FIELD);
        form.next_field();
        assert_eq!(form.focus, SERVER_URL_FIELD);
        form.prev_field();
        assert_eq!(form.focus, CURRENCY_FIELD);
    }
}
