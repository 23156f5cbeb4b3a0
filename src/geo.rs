use serde::Deserialize;

/// Reverse-geocoded address pieces from a Nominatim-style endpoint.
#[derive(Debug, Clone)]
pub struct GeoAddress {
    pub country: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    country: Option<String>,
}

/// Best-effort reverse geocoding, used at registration when coordinates are
/// supplied without a country or address. Any failure yields `None` — the
/// account is created either way.
pub async fn reverse_geocode(latitude: f64, longitude: f64) -> Option<GeoAddress> {
    let client = reqwest::Client::new();
    let response = client
        .get("https://nominatim.openstreetmap.org/reverse")
        .query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "jsonv2".to_string()),
        ])
        .header("User-Agent", "lexmarket-backend")
        .send()
        .await
        .ok()?;

    let parsed: NominatimResponse = response.json().await.ok()?;
    Some(GeoAddress {
        country: parsed.address.country,
        display_name: parsed.display_name,
    })
}
