//! Static sector registry: relay access keys and department names.

/// GHMC key, also the default for unrecognized sectors.
pub const DEFAULT_ACCESS_KEY: &str = "75d766c5-42fb-4e6b-90b3-024105fafb9a";

/// Sectors the complaint form offers.
pub const SECTORS: [&str; 3] = ["Road Transport", "GHMC", "Electricity"];

/// Relay access key for a sector. Unrecognized sectors fall back to the
/// GHMC key so a submission is never blocked on the lookup.
pub fn access_key(sector: &str) -> &'static str {
    match sector {
        "GHMC" => DEFAULT_ACCESS_KEY,
        "Road Transport" => "aec64b43-2ec4-417b-b4c2-969dca7a3716",
        "Electricity" => "8b741d0d-9f8f-4813-b326-c2722ff26efd",
        _ => DEFAULT_ACCESS_KEY,
    }
}

/// Display name of the department responsible for a sector.
pub fn department(sector: &str) -> String {
    format!("Department of {sector}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sector_selects_its_key() {
        assert_eq!(access_key("Electricity"), "8b741d0d-9f8f-4813-b326-c2722ff26efd");
        assert_eq!(access_key("Road Transport"), "aec64b43-2ec4-417b-b4c2-969dca7a3716");
    }

    #[test]
    fn unknown_sector_selects_default_key() {
        assert_eq!(access_key("Unknown"), DEFAULT_ACCESS_KEY);
        assert_eq!(access_key(""), DEFAULT_ACCESS_KEY);
    }

    #[test]
    fn ghmc_key_is_the_default() {
        assert_eq!(access_key("GHMC"), DEFAULT_ACCESS_KEY);
    }
}
