//! Shared UI primitives used by every view.

mod feedback;
mod list;
mod modal;

pub use feedback::{EmptyState, ErrorAlert, LoadingState, StatusBadge, Tone};
pub use list::{FilterSelect, Pagination, SearchBar};
pub use modal::{ConfirmDialog, ModalOverlay};
