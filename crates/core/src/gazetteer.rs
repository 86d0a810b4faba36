//! Static place-name list backing the "other" neighborhood autocomplete.

use crate::neighborhoods::is_fixed_option;

/// Maximum number of suggestions offered at once.
pub const MAX_SUGGESTIONS: usize = 5;

/// New York City neighborhood names across the five boroughs.
///
/// Includes the fixed pill options; [`suggest`] filters those out.
pub const GAZETTEER: &[&str] = &[
    // Manhattan
    "Alphabet City",
    "Battery Park City",
    "Carnegie Hill",
    "Chelsea",
    "Chinatown",
    "Civic Center",
    "East Harlem",
    "East Village",
    "Financial District",
    "Flatiron District",
    "Gramercy Park",
    "Greenwich Village",
    "Hamilton Heights",
    "Harlem",
    "Hell's Kitchen",
    "Hudson Square",
    "Hudson Yards",
    "Inwood",
    "Kips Bay",
    "Lenox Hill",
    "Lincoln Square",
    "Little Italy",
    "Lower East Side",
    "Manhattan Valley",
    "Meatpacking District",
    "Midtown",
    "Midtown East",
    "Morningside Heights",
    "Murray Hill",
    "NoHo",
    "NoMad",
    "Nolita",
    "Roosevelt Island",
    "SoHo",
    "Stuyvesant Town",
    "Sutton Place",
    "Tribeca",
    "Tudor City",
    "Two Bridges",
    "Upper East Side",
    "Upper West Side",
    "Washington Heights",
    "West Village",
    "Yorkville",
    // Brooklyn
    "Bay Ridge",
    "Bedford-Stuyvesant",
    "Bensonhurst",
    "Boerum Hill",
    "Borough Park",
    "Brighton Beach",
    "Brooklyn Heights",
    "Bushwick",
    "Carroll Gardens",
    "Clinton Hill",
    "Cobble Hill",
    "Coney Island",
    "Crown Heights",
    "Ditmas Park",
    "Downtown Brooklyn",
    "DUMBO",
    "Dyker Heights",
    "East Flatbush",
    "East New York",
    "Flatbush",
    "Fort Greene",
    "Gowanus",
    "Gravesend",
    "Greenpoint",
    "Kensington",
    "Midwood",
    "Park Slope",
    "Prospect Heights",
    "Prospect Lefferts Gardens",
    "Red Hook",
    "Sheepshead Bay",
    "Sunset Park",
    "Vinegar Hill",
    "Williamsburg",
    "Windsor Terrace",
    // Queens
    "Astoria",
    "Bayside",
    "Briarwood",
    "Corona",
    "Ditmars Steinway",
    "Douglaston",
    "East Elmhurst",
    "Elmhurst",
    "Far Rockaway",
    "Flushing",
    "Forest Hills",
    "Fresh Meadows",
    "Glendale",
    "Hunters Point",
    "Jackson Heights",
    "Jamaica",
    "Jamaica Estates",
    "Kew Gardens",
    "Little Neck",
    "Long Island City",
    "Maspeth",
    "Middle Village",
    "Ozone Park",
    "Rego Park",
    "Richmond Hill",
    "Ridgewood",
    "Rockaway Beach",
    "Sunnyside",
    "Whitestone",
    "Woodhaven",
    "Woodside",
    // The Bronx
    "Belmont",
    "Castle Hill",
    "City Island",
    "Concourse",
    "Fordham",
    "Hunts Point",
    "Kingsbridge",
    "Morris Park",
    "Mott Haven",
    "Pelham Bay",
    "Riverdale",
    "Soundview",
    "Throgs Neck",
    "Tremont",
    "Wakefield",
    "Williamsbridge",
    // Staten Island
    "Great Kills",
    "New Brighton",
    "New Dorp",
    "Port Richmond",
    "Rosebank",
    "St. George",
    "Stapleton",
    "Todt Hill",
    "Tottenville",
];

/// Autocomplete candidates for `query`.
///
/// Case-insensitive substring match over [`GAZETTEER`], in gazetteer order,
/// skipping fixed pill options and anything in `selected` (compared
/// case-insensitively). Capped at [`MAX_SUGGESTIONS`]. A blank query yields
/// nothing.
pub fn suggest(query: &str, selected: &[String]) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    GAZETTEER
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .filter(|name| !is_fixed_option(name))
        .filter(|name| !selected.iter().any(|s| s.eq_ignore_ascii_case(name)))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_substring_case_insensitively() {
        assert_eq!(suggest("astor", &[]), vec!["Astoria"]);
        assert_eq!(suggest("ASTORIA", &[]), vec!["Astoria"]);
        assert!(suggest("hill", &[]).contains(&"Murray Hill"));
    }

    #[test]
    fn excludes_fixed_options() {
        let found = suggest("village", &[]);
        assert!(!found.contains(&"West Village"));
        assert!(!found.contains(&"Greenwich Village"));
        assert!(found.contains(&"East Village"));
    }

    #[test]
    fn excludes_already_selected() {
        let selected = vec!["east village".to_string()];
        assert!(!suggest("village", &selected).contains(&"East Village"));
    }

    #[test]
    fn caps_at_five_in_gazetteer_order() {
        let found = suggest("a", &[]);
        assert_eq!(found.len(), MAX_SUGGESTIONS);
        assert_eq!(found[0], "Alphabet City");
    }

    #[test]
    fn blank_query_yields_nothing() {
        assert!(suggest("", &[]).is_empty());
        assert!(suggest("   ", &[]).is_empty());
    }

    #[test]
    fn gazetteer_has_no_duplicates() {
        let mut names: Vec<&str> = GAZETTEER.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GAZETTEER.len());
    }
}
