use std::collections::{BTreeMap, BTreeSet};

use lattic3_types::{AssetLabel, Side};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    error::{AmountError, PreviewError},
    validation::{fallback_amount, validate_amount},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Idle,
    Selecting,
    ReadyForPreview,
    PreviewOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AmountInput {
    raw: String,
    amount: Decimal,
    error: Option<AmountError>,
}

impl AmountInput {
    fn new(raw: &str, max: Decimal) -> Self {
        let (amount, error) = match validate_amount(raw, max) {
            Ok(amount) => (amount, None),
            Err(err) => (fallback_amount(raw), Some(err)),
        };
        Self {
            raw: raw.to_string(),
            amount,
            error,
        }
    }
}

/// Rows picked on one side of the market and the amounts typed for them.
///
/// Keyed by asset label, so replacing the market rows never shifts a selection
/// onto another asset.
#[derive(Debug, Clone)]
pub struct SideSelection {
    side: Side,
    selected: BTreeSet<AssetLabel>,
    inputs: BTreeMap<AssetLabel, AmountInput>,
    preview_open: bool,
}

impl SideSelection {
    pub const fn new(side: Side) -> Self {
        Self {
            side,
            selected: BTreeSet::new(),
            inputs: BTreeMap::new(),
            preview_open: false,
        }
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.preview_open {
            SelectionPhase::PreviewOpen
        } else if self.selected.is_empty() {
            SelectionPhase::Idle
        } else if self.check().is_ok() {
            SelectionPhase::ReadyForPreview
        } else {
            SelectionPhase::Selecting
        }
    }

    pub fn is_selected(&self, label: AssetLabel) -> bool {
        self.selected.contains(&label)
    }

    pub fn selected(&self) -> impl Iterator<Item = AssetLabel> + '_ {
        self.selected.iter().copied()
    }

    /// Amount held for `label`, zero when nothing valid was typed.
    pub fn amount(&self, label: AssetLabel) -> Decimal {
        self.inputs
            .get(&label)
            .map(|input| input.amount)
            .unwrap_or_default()
    }

    pub fn raw_input(&self, label: AssetLabel) -> Option<&str> {
        self.inputs.get(&label).map(|input| input.raw.as_str())
    }

    /// Inline error of the row, if its input is invalid.
    pub fn row_error(&self, label: AssetLabel) -> Option<&AmountError> {
        self.inputs
            .get(&label)
            .and_then(|input| input.error.as_ref())
    }

    pub fn select(&mut self, label: AssetLabel) {
        if !self.preview_open {
            self.selected.insert(label);
        }
    }

    pub fn deselect(&mut self, label: AssetLabel) {
        if !self.preview_open {
            self.selected.remove(&label);
            self.inputs.remove(&label);
        }
    }

    /// Record the typed amount of a row. The input is kept even when invalid so the
    /// row can show its error; the returned error is that same inline error.
    pub fn set_amount(
        &mut self,
        label: AssetLabel,
        raw: &str,
        max: Decimal,
    ) -> Result<Decimal, AmountError> {
        if self.preview_open {
            return Ok(self.amount(label));
        }
        let input = AmountInput::new(raw, max);
        let result = input.error.clone().map_or(Ok(input.amount), Err);
        self.inputs.insert(label, input);
        result
    }

    /// Re-check every typed amount against fresh maxima and drop rows whose
    /// asset is no longer listed.
    pub fn revalidate(&mut self, max_for: impl Fn(AssetLabel) -> Option<Decimal>) {
        self.selected.retain(|label| max_for(*label).is_some());
        self.inputs.retain(|label, input| match max_for(*label) {
            Some(max) => {
                *input = AmountInput::new(&input.raw, max);
                true
            }
            None => false,
        });
    }

    fn check(&self) -> Result<(), PreviewError> {
        if self.selected.is_empty() {
            return Err(PreviewError::NothingSelected);
        }

        let invalid: Vec<(AssetLabel, AmountError)> = self
            .selected
            .iter()
            .filter_map(|label| self.row_error(*label).map(|err| (*label, err.clone())))
            .collect();
        if !invalid.is_empty() {
            return Err(PreviewError::InvalidRows(invalid));
        }

        if !self
            .selected
            .iter()
            .any(|label| self.amount(*label) > Decimal::ZERO)
        {
            return Err(PreviewError::NoPositiveAmount);
        }
        Ok(())
    }

    pub fn open_preview(&mut self) -> Result<(), PreviewError> {
        if self.preview_open {
            return Err(PreviewError::AlreadyOpen);
        }
        self.check()?;
        self.preview_open = true;
        Ok(())
    }

    /// Close the preview and drop the selection.
    pub fn cancel_preview(&mut self) {
        self.reset();
    }

    /// Take the selected rows with a positive amount, in label order, and reset.
    ///
    /// Rows may have been re-checked by a refresh while the preview was open. If
    /// any is now invalid the preview closes and the selection stays for editing.
    pub fn take_confirmed(&mut self) -> Result<Vec<(AssetLabel, Decimal)>, PreviewError> {
        if !self.preview_open {
            return Err(PreviewError::NotOpen);
        }
        if let Err(err) = self.check() {
            self.preview_open = false;
            return Err(err);
        }
        let lines = self
            .selected
            .iter()
            .map(|label| (*label, self.amount(*label)))
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .collect();
        self.reset();
        Ok(lines)
    }

    pub fn reset(&mut self) {
        self.selected.clear();
        self.inputs.clear();
        self.preview_open = false;
    }
}
