use serde::Serialize;
use tracing::warn;

use super::catalog::SelectOption;

pub const LABEL_SEPARATOR: &str = ",";

/// Errors raised while toggling a multi-select option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown option '{option_id}' for {field}")]
    UnknownOption { field: &'static str, option_id: String },
}

/// Ordered set of checked options with a comma-joined label projection.
///
/// Selected ids keep toggle order; re-checking an option after clearing it moves
/// it to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    field: &'static str,
    options: Vec<SelectOption>,
    selected: Vec<String>,
}

impl SelectionSet {
    /// Options whose label is blank or contains the separator are dropped so the
    /// joined value always splits back into the checked labels.
    pub fn new(field: &'static str, options: Vec<SelectOption>) -> Self {
        let options = options
            .into_iter()
            .filter(|option| {
                let usable =
                    !option.label.trim().is_empty() && !option.label.contains(LABEL_SEPARATOR);
                if !usable {
                    warn!(field, option_id = %option.id, "dropping option with unusable label");
                }
                usable
            })
            .collect();

        Self {
            field,
            options,
            selected: Vec::new(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_checked(&self, option_id: &str) -> bool {
        self.selected.iter().any(|id| id == option_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn toggle(&mut self, option_id: &str, checked: bool) -> Result<(), SelectionError> {
        if !self.options.iter().any(|option| option.id == option_id) {
            return Err(SelectionError::UnknownOption {
                field: self.field,
                option_id: option_id.to_string(),
            });
        }

        let position = self.selected.iter().position(|id| id == option_id);
        match (checked, position) {
            (true, None) => self.selected.push(option_id.to_string()),
            (false, Some(index)) => {
                self.selected.remove(index);
            }
            _ => {}
        }
        Ok(())
    }

    /// Labels of the checked options, in toggle order.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter_map(|id| self.options.iter().find(|option| &option.id == id))
            .map(|option| option.label.as_str())
            .collect()
    }

    pub fn joined(&self) -> String {
        self.selected_labels().join(LABEL_SEPARATOR)
    }

    /// Checkbox indicator state for every option, in catalog order.
    pub fn indicators(&self) -> Vec<SelectionIndicator> {
        self.options
            .iter()
            .map(|option| SelectionIndicator {
                id: option.id.clone(),
                label: option.label.clone(),
                checked: self.is_checked(&option.id),
            })
            .collect()
    }

    /// Clear the selection, returning the ids whose indicator flipped.
    pub fn reset(&mut self) -> Vec<String> {
        std::mem::take(&mut self.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionIndicator {
    pub id: String,
    pub label: String,
    pub checked: bool,
}
