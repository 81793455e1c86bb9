use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::SelectedFile;
use crate::domains::onboarding::errors::{PreconditionError, SelectionRejected};

const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg"];

const SPREADSHEET_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// One of the three files collected on the profile-content step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSlot {
    Headshot,
    Gallery,
    Reviews,
}

impl UploadSlot {
    pub const ALL: [UploadSlot; 3] = [UploadSlot::Headshot, UploadSlot::Gallery, UploadSlot::Reviews];

    /// Content types a file must declare to occupy this slot
    pub fn accepted_content_types(self) -> &'static [&'static str] {
        match self {
            UploadSlot::Headshot | UploadSlot::Gallery => IMAGE_CONTENT_TYPES,
            UploadSlot::Reviews => SPREADSHEET_CONTENT_TYPES,
        }
    }

    pub fn accepts(self, file: &SelectedFile) -> bool {
        let essence = file.mime_essence();
        self.accepted_content_types().iter().any(|t| *t == essence)
    }

    /// Form label shown next to the slot
    pub fn label(self) -> &'static str {
        match self {
            UploadSlot::Headshot => "Professional Headshot",
            UploadSlot::Gallery => "Gallery Photo",
            UploadSlot::Reviews => "Client Reviews",
        }
    }
}

impl fmt::Display for UploadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSlot::Headshot => write!(f, "headshot"),
            UploadSlot::Gallery => write!(f, "gallery"),
            UploadSlot::Reviews => write!(f, "reviews"),
        }
    }
}

impl FromStr for UploadSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "headshot" => Ok(UploadSlot::Headshot),
            "gallery" => Ok(UploadSlot::Gallery),
            "reviews" => Ok(UploadSlot::Reviews),
            _ => Err(anyhow::anyhow!("Invalid upload slot: {}", s)),
        }
    }
}

/// Files selected on the profile-content step, at most one per slot.
///
/// Only files whose content type the slot accepts are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUploads {
    headshot: Option<SelectedFile>,
    gallery: Option<SelectedFile>,
    reviews: Option<SelectedFile>,
}

/// All three files, borrowed from a complete [`PendingUploads`]
#[derive(Debug, Clone, Copy)]
pub struct ReadyUploads<'a> {
    pub headshot: &'a SelectedFile,
    pub gallery: &'a SelectedFile,
    pub reviews: &'a SelectedFile,
}

impl PendingUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a file in a slot.
    ///
    /// `None` (picker dismissed) leaves the slot untouched. A file with a
    /// disallowed content type is rejected and the slot keeps its previous value.
    pub fn select(
        &mut self,
        slot: UploadSlot,
        file: Option<SelectedFile>,
    ) -> Result<(), SelectionRejected> {
        let Some(file) = file else {
            return Ok(());
        };

        if !slot.accepts(&file) {
            return Err(SelectionRejected {
                slot,
                content_type: file.content_type,
            });
        }

        *self.slot_mut(slot) = Some(file);
        Ok(())
    }

    pub fn clear(&mut self, slot: UploadSlot) {
        *self.slot_mut(slot) = None;
    }

    /// Empty every slot
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, slot: UploadSlot) -> Option<&SelectedFile> {
        match slot {
            UploadSlot::Headshot => self.headshot.as_ref(),
            UploadSlot::Gallery => self.gallery.as_ref(),
            UploadSlot::Reviews => self.reviews.as_ref(),
        }
    }

    /// Slots still waiting for a file, in form order
    pub fn missing_slots(&self) -> Vec<UploadSlot> {
        UploadSlot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    /// Borrow all three files, or report which are missing
    pub fn ready(&self) -> Result<ReadyUploads<'_>, PreconditionError> {
        match (&self.headshot, &self.gallery, &self.reviews) {
            (Some(headshot), Some(gallery), Some(reviews)) => Ok(ReadyUploads {
                headshot,
                gallery,
                reviews,
            }),
            _ => Err(PreconditionError::MissingFiles(self.missing_slots())),
        }
    }

    fn slot_mut(&mut self, slot: UploadSlot) -> &mut Option<SelectedFile> {
        match slot {
            UploadSlot::Headshot => &mut self.headshot,
            UploadSlot::Gallery => &mut self.gallery,
            UploadSlot::Reviews => &mut self.reviews,
        }
    }
}
