//! Partition of the N slots into sections.

use std::ops::Range;

use crate::error::{DinnerForgeError, Result};

/// Number of sections (courses) in one evening.
pub const SECTION_COUNT: usize = 3;

/// Slot-to-section mapping.
///
/// Slots are numbered `0..slot_count`; section `s` (0-based) owns the
/// contiguous range `s * section_size .. (s + 1) * section_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    slot_count: usize,
    section_size: usize,
}

impl SectionLayout {
    /// Layout for `participant_count` participants (one slot each).
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the count is zero or not divisible by
    /// three.
    pub fn for_participants(participant_count: usize) -> Result<Self> {
        if participant_count == 0 {
            return Err(DinnerForgeError::Config(
                "participant count must be positive".to_string(),
            ));
        }
        if participant_count % SECTION_COUNT != 0 {
            return Err(DinnerForgeError::Config(format!(
                "participant count {} is not divisible by {}",
                participant_count, SECTION_COUNT
            )));
        }
        Ok(SectionLayout {
            slot_count: participant_count,
            section_size: participant_count / SECTION_COUNT,
        })
    }

    /// Layout with an explicitly configured section size, which must agree
    /// with the participant count.
    pub fn with_section_size(participant_count: usize, section_size: usize) -> Result<Self> {
        let layout = Self::for_participants(participant_count)?;
        if layout.section_size != section_size {
            return Err(DinnerForgeError::Config(format!(
                "section size {} does not match {} participants (expected {})",
                section_size, participant_count, layout.section_size
            )));
        }
        Ok(layout)
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn section_size(&self) -> usize {
        self.section_size
    }

    /// 0-based section of a slot.
    #[inline]
    pub fn section_of(&self, slot: usize) -> usize {
        slot / self.section_size
    }

    /// 1-based section number as written in output files.
    #[inline]
    pub fn display_section(&self, slot: usize) -> usize {
        self.section_of(slot) + 1
    }

    pub fn slots(&self, section: usize) -> Range<usize> {
        let start = section * self.section_size;
        start..start + self.section_size
    }

    pub fn sections(&self) -> Range<usize> {
        0..SECTION_COUNT
    }
}
