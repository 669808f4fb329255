//! Records served by the backend REST API. All of them are read-only from
//! this side; submissions live in `forms::fields`.

use serde::{Deserialize, Deserializer};

pub mod about;
pub mod feedback;
pub mod location;
pub mod position;
pub mod settings;

pub use about::{Milestone, TeamMember};
pub use feedback::Feedback;
pub use location::{LatLng, Location};
pub use position::Position;
pub use settings::Settings;

/// Reads an explicit `null` as the field's default. Missing keys are covered
/// by `#[serde(default)]` on the containers.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns the trimmed value when it carries any text.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
