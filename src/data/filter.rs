use std::fmt;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Location selection
// ---------------------------------------------------------------------------

/// Label shown for the overlay sentinel in the location selector.
pub const ALL_LOCATIONS_LABEL: &str = "All locations";

/// Which location the pH histogram is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationSelection {
    /// Overlay one layer per sampling site.
    #[default]
    All,
    /// A single location name. Need not exist in the dataset.
    Location(String),
}

impl LocationSelection {
    /// Options for the selector: the sentinel, then each dataset location in
    /// first-seen order.
    pub fn options(dataset: &Dataset) -> Vec<LocationSelection> {
        std::iter::once(LocationSelection::All)
            .chain(
                dataset
                    .locations
                    .iter()
                    .map(|loc| LocationSelection::Location(loc.clone())),
            )
            .collect()
    }
}

impl fmt::Display for LocationSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSelection::All => f.write_str(ALL_LOCATIONS_LABEL),
            LocationSelection::Location(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of samples taken at `location`, in dataset order.
pub fn location_indices(dataset: &Dataset, location: &str) -> Vec<usize> {
    dataset
        .samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.location == location)
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of samples matching `selection`.
///
/// [`LocationSelection::All`] matches every sample; the overlay view narrows
/// this to the registered sampling sites itself.
pub fn filtered_indices(dataset: &Dataset, selection: &LocationSelection) -> Vec<usize> {
    match selection {
        LocationSelection::All => (0..dataset.len()).collect(),
        LocationSelection::Location(name) => location_indices(dataset, name),
    }
}
