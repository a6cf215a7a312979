//! SMS message templates with `{placeholder}` substitution.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Appointment,
    Reminder,
    Confirmation,
}

impl Template {
    pub fn text(&self) -> &'static str {
        match self {
            Template::Appointment => "Your HVAC appointment is scheduled for {date} at {time}.",
            Template::Reminder => "Reminder: Your HVAC service is tomorrow at {time}.",
            Template::Confirmation => "Thank you for scheduling with Mark Jacob HVAC!",
        }
    }

    pub fn render(&self, values: &[(&str, &str)]) -> String {
        render(self.text(), values)
    }
}

/// Replaces every `{key}` in `template` with its value. Unknown placeholders are
/// left as they are.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
}
