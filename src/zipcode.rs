/// Look up city and state for a US zip code from the bundled zipcodes database
pub fn lookup_place(zip: &str) -> Option<(String, String)> {
    // Avoid zipcodes::matching to suppress debug_print output.
    let results = zipcodes::filter_by(vec![|z: &zipcodes::Zipcode| z.zip_code == zip], None).ok()?;
    let info = results.first()?;
    Some((info.city.clone(), info.state.clone()))
}

/// Format a ZIP for display, appending "City, ST" when the ZIP is known
pub fn describe_zip(zip: &str) -> String {
    match lookup_place(zip) {
        Some((city, state)) => format!("{} ({}, {})", zip, city, state),
        None => zip.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_zip_is_unchanged() {
        assert_eq!(describe_zip("not-a-zip"), "not-a-zip");
        assert!(lookup_place("not-a-zip").is_none());
    }

    #[test]
    fn test_known_zip_is_annotated() {
        let described = describe_zip("10001");
        assert!(described.starts_with("10001 ("), "{}", described);
        assert!(described.ends_with(", NY)"), "{}", described);
    }
}
