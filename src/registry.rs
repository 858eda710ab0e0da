//! Site registry for the Big Sioux River dashboard.
//!
//! The canonical list of map points: the river sampling sites whose readings
//! appear in the dataset, plus the point-source facilities shown for context.
//! Other modules take site names from here instead of hardcoding them.

// ---------------------------------------------------------------------------
// Site metadata
// ---------------------------------------------------------------------------

/// How a site is drawn on the map and whether it takes part in statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    /// Water samples are collected here (blue marker).
    SamplingLocation,
    /// Industrial or treatment facility (red marker). Never aggregated.
    PointSource,
}

impl SiteKind {
    pub fn label(self) -> &'static str {
        match self {
            SiteKind::SamplingLocation => "Sampling location",
            SiteKind::PointSource => "Point-source facility",
        }
    }
}

/// A named point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    /// Matches the `Location` column for sampling sites.
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    pub kind: SiteKind,
}

impl Site {
    /// `lat, lon` to four decimals, about ten metres.
    pub fn coordinate_label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// All map points, sampling sites first.
pub static SITE_REGISTRY: &[Site] = &[
    Site {
        name: "Big Sioux River @ I-90",
        latitude: 43.610284,
        longitude: -96.744755,
        kind: SiteKind::SamplingLocation,
    },
    Site {
        name: "Big Sioux River @ Timberline",
        latitude: 43.599841,
        longitude: -96.653049,
        kind: SiteKind::SamplingLocation,
    },
    Site {
        name: "Big Sioux River @ Bahnson",
        latitude: 43.569702,
        longitude: -96.684698,
        kind: SiteKind::SamplingLocation,
    },
    Site {
        name: "Skunk Creek @ Marion Road",
        latitude: 43.533863,
        longitude: -96.790952,
        kind: SiteKind::SamplingLocation,
    },
    Site {
        name: "Big Sioux River @ Falls Park",
        latitude: 43.556980,
        longitude: -96.722439,
        kind: SiteKind::SamplingLocation,
    },
    Site {
        name: "Smithfield Foods",
        latitude: 43.562259,
        longitude: -96.719821,
        kind: SiteKind::PointSource,
    },
    Site {
        name: "SF Waste Water Treatment",
        latitude: 43.594920,
        longitude: -96.661289,
        kind: SiteKind::PointSource,
    },
    Site {
        name: "Williams Disposal Pit (Superfund)",
        latitude: 43.545033086692605,
        longitude: -96.79196640241707,
        kind: SiteKind::PointSource,
    },
];

/// Look up a site by its exact name.
pub fn find_site(name: &str) -> Option<&'static Site> {
    SITE_REGISTRY.iter().find(|s| s.name == name)
}

/// Sites of one kind, in registry order.
pub fn sites_of_kind(kind: SiteKind) -> impl Iterator<Item = &'static Site> {
    SITE_REGISTRY.iter().filter(move |s| s.kind == kind)
}

/// Sampling-site names sorted alphabetically; the layer order of the pH
/// overlay.
pub fn sampling_site_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = sites_of_kind(SiteKind::SamplingLocation)
        .map(|s| s.name)
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_sampling_sites_and_three_facilities() {
        assert_eq!(sites_of_kind(SiteKind::SamplingLocation).count(), 5);
        assert_eq!(sites_of_kind(SiteKind::PointSource).count(), 3);
    }

    #[test]
    fn site_names_are_unique() {
        for site in SITE_REGISTRY {
            let dupes = SITE_REGISTRY.iter().filter(|s| s.name == site.name).count();
            assert_eq!(dupes, 1, "duplicate site {}", site.name);
        }
    }

    #[test]
    fn coordinates_are_in_sioux_falls_area() {
        for site in SITE_REGISTRY {
            assert!((43.4..43.7).contains(&site.latitude), "{}", site.name);
            assert!((-96.9..-96.6).contains(&site.longitude), "{}", site.name);
        }
    }

    #[test]
    fn overlay_order_is_alphabetical() {
        assert_eq!(
            sampling_site_names(),
            [
                "Big Sioux River @ Bahnson",
                "Big Sioux River @ Falls Park",
                "Big Sioux River @ I-90",
                "Big Sioux River @ Timberline",
                "Skunk Creek @ Marion Road",
            ]
        );
    }

    #[test]
    fn facilities_are_not_sampling_sites() {
        let site = find_site("Smithfield Foods").unwrap();
        assert_eq!(site.kind, SiteKind::PointSource);
        assert!(!sampling_site_names().contains(&site.name));
        assert!(find_site("Nowhere").is_none());
    }

    #[test]
    fn coordinate_label_of_a_sampling_site() {
        let site = find_site("Big Sioux River @ I-90").unwrap();
        assert_eq!(site.coordinate_label(), "43.6103, -96.7448");
    }
}
