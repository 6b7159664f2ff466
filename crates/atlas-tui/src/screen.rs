//! Screen identifier enum.

use atlas_core::Phase;

/// Identifies each top-level view. Which one is shown follows the store's
/// phase; there is no manual navigation between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Loading,
    Failure,
    Directory,
}

impl ScreenId {
    pub fn for_phase(phase: Phase<'_>) -> Self {
        match phase {
            Phase::Loading => Self::Loading,
            Phase::Failed(_) => Self::Failure,
            Phase::Ready => Self::Directory,
        }
    }
}
