use hermes_directions::geopoint::GeoPoint;

/// Parses a `lat,lng` pair, the order people copy from a map.
pub fn parse_point(input: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| String::from("Expected lat,lng"))?;

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude {lat}"))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude {lng}"))?;

    let point = GeoPoint::new(lat, lng);
    if !point.is_valid() {
        return Err(format!("Coordinates out of range: {input}"));
    }

    Ok(point)
}
