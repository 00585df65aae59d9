use actstream::{Field, Place as _};

use crate::Mapper;

use super::{Merge, ObjectBase, Parse};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
	pub base: ObjectBase,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub address: Option<String>,
}

impl Parse for Place {
	fn parse(data: &serde_json::Value, mapper: &Mapper) -> Field<Self> {
		let (latitude, longitude) = match data.position() {
			Ok(iso) => match parse_position(iso) {
				Some((lat, lon)) => (Some(lat), Some(lon)),
				None => {
					tracing::debug!("ignoring unparsable position '{iso}'");
					(None, None)
				},
			},
			// some servers send a plain object instead of an iso string
			Err(_) => match data.get("position") {
				Some(pos) => (
					pos.get("latitude").and_then(|x| x.as_f64()),
					pos.get("longitude").and_then(|x| x.as_f64()),
				),
				None => (None, None),
			},
		};

		Ok(Place {
			base: ObjectBase::parse(data, mapper, false)?,
			latitude,
			longitude,
			address: data.address()
				.ok()
				.and_then(|x| x.get("formatted"))
				.and_then(|x| x.as_str())
				.map(str::to_string),
		})
	}
}

impl Merge for Place {
	fn merge(self, newer: Self) -> Self {
		Place {
			base: self.base.merge(newer.base),
			latitude: newer.latitude.or(self.latitude),
			longitude: newer.longitude.or(self.longitude),
			address: newer.address.or(self.address),
		}
	}
}

/// latitude and longitude out of an ISO 6709 string like `+27.5916+086.5640+8850/`
pub fn parse_position(iso: &str) -> Option<(f64, f64)> {
	let iso = iso.trim_end_matches('/');
	let mut starts = iso
		.char_indices()
		.filter(|(_, c)| *c == '+' || *c == '-')
		.map(|(i, _)| i);
	let lat_start = starts.next()?;
	let lon_start = starts.next()?;
	let lon_end = starts.next().unwrap_or(iso.len());
	if lat_start != 0 {
		return None;
	}
	let lat = iso[lat_start..lon_start].parse::<f64>().ok()?;
	let lon = iso[lon_start..lon_end].parse::<f64>().ok()?;
	Some((lat, lon))
}
