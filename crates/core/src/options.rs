use crate::types::OutputOption;

/// Ordered set of selected output options.
///
/// Toggling appends absent options and removes present ones, so the wire
/// order follows the order in which the user picked them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSelection {
    selected: Vec<OutputOption>,
}

impl Default for OptionSelection {
    /// Summary and didactic guide are preselected.
    fn default() -> Self {
        Self {
            selected: vec![OutputOption::Summary, OutputOption::Guide],
        }
    }
}

impl OptionSelection {
    pub fn empty() -> Self {
        Self {
            selected: Vec::new(),
        }
    }

    pub fn from_options(options: impl IntoIterator<Item = OutputOption>) -> Self {
        let mut selection = Self::empty();
        for option in options {
            if !selection.contains(option) {
                selection.selected.push(option);
            }
        }
        selection
    }

    pub fn toggle(&mut self, option: OutputOption) {
        if let Some(pos) = self.selected.iter().position(|o| *o == option) {
            self.selected.remove(pos);
        } else {
            self.selected.push(option);
        }
    }

    pub fn contains(&self, option: OutputOption) -> bool {
        self.selected.contains(&option)
    }

    pub fn as_slice(&self) -> &[OutputOption] {
        &self.selected
    }

    pub fn to_vec(&self) -> Vec<OutputOption> {
        self.selected.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}
