//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Opaque, stable identifier of a history entry.
///
/// Assigned once when the entry is captured and never derived from its text,
/// so it survives edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl_id!(EntryId);
