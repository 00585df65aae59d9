/// Special collection addressing everyone, on pump.io servers
pub const PUBLIC : &str = "http://activityschema.org/collection/public";

/// addressing entry for an id, as pump.io expects them inside `to` and `cc`
pub fn recipient(id: &str, object_type: &str) -> serde_json::Value {
	serde_json::json!({ "id": id, "objectType": object_type })
}

pub fn public() -> serde_json::Value {
	recipient(PUBLIC, "collection")
}

#[cfg(test)]
mod test {
	use crate::{Base, Object, ObjectMut};

	#[test]
	fn public_recipient_reads_back_from_to() {
		let note = serde_json::json!({ "objectType": "note" })
			.set_to(vec![super::public(), super::recipient("acct:bob@pump.example", "person")]);

		let to : Vec<&str> = note.to().into_iter().filter_map(|x| x.id().ok()).collect();
		assert_eq!(to, [super::PUBLIC, "acct:bob@pump.example"]);
		assert_eq!(note.to()[0].object_type().ok(), Some("collection"));
	}
}
