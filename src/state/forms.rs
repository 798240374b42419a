// Form input state for each tab.
// Holds field values and the focus ring of fields and controls.

use std::collections::BTreeMap;

use super::busy::ControlId;
use super::tabs::Tab;

/// Named input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    ReviewCount,
    Rating,
    Title,
    ReviewText,
    Keywords,
    CsvPath,
    SyntheticPath,
    RealPath,
    IncludeCharts,
}

impl FieldId {
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::ReviewCount => "Number of reviews",
            FieldId::Rating => "Rating (1-5)",
            FieldId::Title => "Title",
            FieldId::ReviewText => "Review text",
            FieldId::Keywords => "Persona keywords (comma-separated)",
            FieldId::CsvPath => "Generation log (CSV)",
            FieldId::SyntheticPath => "Synthetic reviews path",
            FieldId::RealPath => "Real reviews path",
            FieldId::IncludeCharts => "Include charts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checkbox(bool),
}

/// A focusable element on a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focusable {
    Field(FieldId),
    Control(ControlId),
}

/// Ordered focus ring for a tab.
pub fn layout(tab: Tab) -> &'static [Focusable] {
    use Focusable::{Control, Field};
    match tab {
        Tab::Generate => &[
            Control(ControlId::GenerateSingle),
            Control(ControlId::GenerateBad),
            Field(FieldId::ReviewCount),
            Control(ControlId::GenerateBatch),
        ],
        Tab::Quality => &[
            Field(FieldId::Rating),
            Field(FieldId::Title),
            Field(FieldId::ReviewText),
            Field(FieldId::Keywords),
            Control(ControlId::CheckQuality),
        ],
        Tab::Reports => &[
            Field(FieldId::CsvPath),
            Field(FieldId::SyntheticPath),
            Field(FieldId::RealPath),
            Field(FieldId::IncludeCharts),
            Control(ControlId::QualityReport),
            Control(ControlId::ComparisonReport),
        ],
        Tab::Server => &[
            Control(ControlId::ListFiles),
            Control(ControlId::ShowConfig),
        ],
    }
}

/// Values and focus positions for all forms.
#[derive(Debug, Clone)]
pub struct Forms {
    values: BTreeMap<FieldId, FieldValue>,
    focus: BTreeMap<Tab, usize>,
}

impl Default for Forms {
    fn default() -> Self {
        let values = [
            (FieldId::ReviewCount, FieldValue::Text("10".to_string())),
            (FieldId::Rating, FieldValue::Text("4".to_string())),
            (FieldId::Title, FieldValue::Text(String::new())),
            (FieldId::ReviewText, FieldValue::Text(String::new())),
            (FieldId::Keywords, FieldValue::Text(String::new())),
            (FieldId::CsvPath, FieldValue::Text(String::new())),
            (FieldId::SyntheticPath, FieldValue::Text(String::new())),
            (FieldId::RealPath, FieldValue::Text(String::new())),
            (FieldId::IncludeCharts, FieldValue::Checkbox(false)),
        ]
        .into_iter()
        .collect();

        Self {
            values,
            focus: BTreeMap::new(),
        }
    }
}

impl Forms {
    /// Text value of a field; checkboxes read as empty.
    pub fn text(&self, field: FieldId) -> &str {
        match self.values.get(&field) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn checked(&self, field: FieldId) -> bool {
        matches!(self.values.get(&field), Some(FieldValue::Checkbox(true)))
    }

    #[cfg(test)]
    pub fn set_text(&mut self, field: FieldId, text: impl Into<String>) {
        self.values.insert(field, FieldValue::Text(text.into()));
    }

    pub fn focused(&self, tab: Tab) -> Focusable {
        let items = layout(tab);
        let index = self.focus.get(&tab).copied().unwrap_or(0);
        items[index.min(items.len() - 1)]
    }

    pub fn focus_next(&mut self, tab: Tab) {
        let len = layout(tab).len();
        let index = self.focus.entry(tab).or_insert(0);
        *index = (*index + 1) % len;
    }

    pub fn focus_prev(&mut self, tab: Tab) {
        let len = layout(tab).len();
        let index = self.focus.entry(tab).or_insert(0);
        *index = (*index + len - 1) % len;
    }

    /// Type a character into the focused text field.
    pub fn input_char(&mut self, tab: Tab, c: char) {
        if let Focusable::Field(field) = self.focused(tab) {
            if let Some(FieldValue::Text(text)) = self.values.get_mut(&field) {
                text.push(c);
            }
        }
    }

    /// Delete the last character of the focused text field.
    pub fn backspace(&mut self, tab: Tab) {
        if let Focusable::Field(field) = self.focused(tab) {
            if let Some(FieldValue::Text(text)) = self.values.get_mut(&field) {
                text.pop();
            }
        }
    }

    /// Flip the focused checkbox. Returns false if focus is not on a checkbox.
    pub fn toggle(&mut self, tab: Tab) -> bool {
        if let Focusable::Field(field) = self.focused(tab) {
            if let Some(FieldValue::Checkbox(checked)) = self.values.get_mut(&field) {
                *checked = !*checked;
                return true;
            }
        }
        false
    }

    pub fn is_checkbox(&self, field: FieldId) -> bool {
        matches!(self.values.get(&field), Some(FieldValue::Checkbox(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_ring_wraps() {
        let mut forms = Forms::default();
        assert_eq!(
            forms.focused(Tab::Server),
            Focusable::Control(ControlId::ListFiles)
        );
        forms.focus_next(Tab::Server);
        forms.focus_next(Tab::Server);
        assert_eq!(
            forms.focused(Tab::Server),
            Focusable::Control(ControlId::ListFiles)
        );
        forms.focus_prev(Tab::Server);
        assert_eq!(
            forms.focused(Tab::Server),
            Focusable::Control(ControlId::ShowConfig)
        );
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut forms = Forms::default();
        forms.focus_next(Tab::Quality);
        for c in "Fast CI".chars() {
            forms.input_char(Tab::Quality, c);
        }
        forms.backspace(Tab::Quality);
        assert_eq!(forms.text(FieldId::Title), "Fast C");
        assert_eq!(forms.text(FieldId::Rating), "4");
    }

    #[test]
    fn test_toggle_only_on_checkbox() {
        let mut forms = Forms::default();
        assert!(!forms.toggle(Tab::Reports));
        for _ in 0..3 {
            forms.focus_next(Tab::Reports);
        }
        assert!(forms.toggle(Tab::Reports));
        assert!(forms.checked(FieldId::IncludeCharts));
    }

    #[test]
    fn test_every_control_has_a_place() {
        for control in ControlId::ALL {
            assert!(layout(control.tab()).contains(&Focusable::Control(control)));
        }
    }
}
