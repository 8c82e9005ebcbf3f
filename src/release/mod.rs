//! Release records and the shared collection they are stored in.

mod collection;
mod model;

pub use collection::{CollectionView, ReleaseCollection};
pub use model::{NO_RELEASE_NOTES, PLACEHOLDER_TAG, Release, is_windows_asset};
