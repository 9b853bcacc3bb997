//! Release classification and updates

mod classify;
mod mutate;

pub use classify::{
    ClassifiedRelease, CurrentMarker, MissingChannel, ReleaseKind, ReleaseReport, classify,
};
pub use mutate::{
    ReleaseMutator, ReleaseStatus, STATUS_KEYWORDS, appended_body, find_release,
};
