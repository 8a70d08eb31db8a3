//! Editing operations on a [`Resume`].
//!
//! Every operation is atomic: it either applies completely or returns an [`EditError`]
//! and leaves the resume untouched. Field updates are JSON patches keyed by the
//! interchange field names (`startDate`, `isVisible`, ...).

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::resume::models::{with_items, Resume, Section, SectionKind, SectionToggle};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Section '{0}' not found")]
    SectionNotFound(String),

    #[error("Item {index} is out of range for section '{section_id}' ({len} items)")]
    ItemOutOfRange {
        section_id: String,
        index: usize,
        len: usize,
    },

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Field-name → new-value map applied to a personal-info block or an item.
pub type FieldPatch = Map<String, Value>;

impl Resume {
    /// Appends a new, empty section of `kind` and returns it.
    pub fn add_section(&mut self, kind: SectionKind) -> &Section {
        let id = self.fresh_section_id(kind);
        self.sections.push(Section::new(id, kind));
        &self.sections[self.sections.len() - 1]
    }

    pub fn remove_section(&mut self, id: &str) -> Result<Section, EditError> {
        let pos = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| EditError::SectionNotFound(id.to_string()))?;
        Ok(self.sections.remove(pos))
    }

    /// Flips the section's visibility and returns the new value.
    pub fn toggle_section_visibility(&mut self, id: &str) -> Result<bool, EditError> {
        let section = self.section_mut(id)?;
        section.is_visible = !section.is_visible;
        Ok(section.is_visible)
    }

    pub fn rename_section(&mut self, id: &str, title: impl Into<String>) -> Result<(), EditError> {
        self.section_mut(id)?.title = title.into();
        Ok(())
    }

    /// Sets a display toggle. Returns `false` (and changes nothing) when the section's
    /// kind does not declare that toggle.
    pub fn set_section_toggle(
        &mut self,
        id: &str,
        toggle: SectionToggle,
        on: bool,
    ) -> Result<bool, EditError> {
        use crate::resume::models::SectionBody;

        let section = self.section_mut(id)?;
        let slot = match (&mut section.body, toggle) {
            (
                SectionBody::Experience {
                    show_company_location,
                    ..
                },
                SectionToggle::ShowCompanyLocation,
            ) => show_company_location,
            (SectionBody::Experience { show_dates, .. }, SectionToggle::ShowDates) => show_dates,
            (SectionBody::Education { show_location, .. }, SectionToggle::ShowLocation) => {
                show_location
            }
            (SectionBody::Education { show_gpa, .. }, SectionToggle::ShowGpa) => show_gpa,
            _ => return Ok(false),
        };
        *slot = on;
        Ok(true)
    }

    /// Appends an empty item of the section's type; returns its index.
    pub fn add_item(&mut self, section_id: &str) -> Result<usize, EditError> {
        let section = self.section_mut(section_id)?;
        Ok(with_items!(&mut section.body, items => {
            items.push(Default::default());
            items.len() - 1
        }))
    }

    pub fn update_item(
        &mut self,
        section_id: &str,
        index: usize,
        patch: &FieldPatch,
    ) -> Result<(), EditError> {
        let section = self.section_mut(section_id)?;
        check_index(section, index)?;
        with_items!(&mut section.body, items => {
            let updated = apply_patch(&items[index], patch)?;
            items[index] = updated;
        });
        Ok(())
    }

    pub fn remove_item(&mut self, section_id: &str, index: usize) -> Result<(), EditError> {
        let section = self.section_mut(section_id)?;
        check_index(section, index)?;
        with_items!(&mut section.body, items => {
            items.remove(index);
        });
        Ok(())
    }

    /// Flips one item's visibility and returns the new value.
    pub fn toggle_item_visibility(
        &mut self,
        section_id: &str,
        index: usize,
    ) -> Result<bool, EditError> {
        let section = self.section_mut(section_id)?;
        check_index(section, index)?;
        Ok(with_items!(&mut section.body, items => {
            let item = &mut items[index];
            item.is_visible = !item.is_visible;
            item.is_visible
        }))
    }

    pub fn update_personal_info(&mut self, patch: &FieldPatch) -> Result<(), EditError> {
        self.personal_info = apply_patch(&self.personal_info, patch)?;
        Ok(())
    }

    fn section_mut(&mut self, id: &str) -> Result<&mut Section, EditError> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| EditError::SectionNotFound(id.to_string()))
    }

    fn fresh_section_id(&self, kind: SectionKind) -> String {
        let base = format!("{}-{}", kind.as_str(), Utc::now().timestamp_millis());
        if self.section(&base).is_none() {
            return base;
        }
        (2u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| self.section(id).is_none())
            .unwrap_or(base)
    }
}

fn check_index(section: &Section, index: usize) -> Result<(), EditError> {
    let len = section.body.item_count();
    if index >= len {
        return Err(EditError::ItemOutOfRange {
            section_id: section.id.clone(),
            index,
            len,
        });
    }
    Ok(())
}

/// Applies `patch` to a copy of `target`, one field at a time so a bad value is
/// reported against the field that carried it.
fn apply_patch<T>(target: &T, patch: &FieldPatch) -> Result<T, EditError>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(target)? {
        Value::Object(map) => map,
        _ => {
            return Err(EditError::Serialization(serde::ser::Error::custom(
                "patch target is not an object",
            )))
        }
    };

    for (field, value) in patch {
        if !merged.contains_key(field) {
            return Err(EditError::UnknownField(field.clone()));
        }
        merged.insert(field.clone(), value.clone());
        serde_json::from_value::<T>(Value::Object(merged.clone())).map_err(|e| {
            EditError::InvalidValue {
                field: field.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}
