use actstream::{ActivityMut, BaseMut, ObjectMut, ObjectType, Verb};

use crate::{feed::Feed, transport::{is_absolute, Method, Params, Transport}, Config, Mapper, Object, PumpResult};

/// Entry point of the library: a configured server, a way to reach it and a [Mapper] for its answers.
///
/// Requests are blocking and issued one at a time from the calling thread.
pub struct Pump {
	config: Config,
	transport: Box<dyn Transport>,
	mapper: Mapper,
}

impl Pump {
	pub fn new(config: Config, transport: impl Transport + 'static) -> Self {
		Pump {
			mapper: Mapper::with_config(&config.mapper),
			transport: Box::new(transport),
			config,
		}
	}

	#[cfg(feature = "fetch")]
	pub fn connect(config: Config) -> PumpResult<Self> {
		let transport = crate::transport::HttpTransport::new(&config)?;
		Ok(Pump::new(config, transport))
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn mapper(&self) -> &Mapper {
		&self.mapper
	}

	pub fn endpoint_url(&self, endpoint: &str) -> String {
		if is_absolute(endpoint) {
			return endpoint.to_string();
		}
		format!("{}/{}", self.config.base_url(), endpoint.trim_start_matches('/'))
	}

	/// absolute urls go out as they are, anything else is an endpoint of the configured server
	pub fn request(&self, url: &str, method: Method, params: &Params, data: Option<&serde_json::Value>) -> PumpResult<serde_json::Value> {
		Ok(self.transport.request(url, method, params, data, is_absolute(url))?)
	}

	pub fn get_object(&self, url: &str) -> PumpResult<Object> {
		let data = self.request(url, Method::Get, &Params::new(), None)?;
		self.mapper.get_object(&data)
	}

	pub fn feed(&self, url: &str) -> Feed {
		Feed::new(url)
	}

	pub fn inbox(&self) -> Feed {
		self.user_feed(&self.config.server.nickname, "inbox", Some(ObjectType::Activity))
	}

	pub fn outbox(&self) -> Feed {
		self.user_feed(&self.config.server.nickname, "feed", Some(ObjectType::Activity))
	}

	pub fn followers(&self, nickname: &str) -> Feed {
		self.user_feed(nickname, "followers", Some(ObjectType::Person))
	}

	pub fn following(&self, nickname: &str) -> Feed {
		self.user_feed(nickname, "following", Some(ObjectType::Person))
	}

	pub fn favorites(&self, nickname: &str) -> Feed {
		self.user_feed(nickname, "favorites", None)
	}

	pub fn lists(&self, nickname: &str) -> Feed {
		self.user_feed(nickname, "lists/person", Some(ObjectType::Collection))
	}

	fn user_feed(&self, nickname: &str, name: &str, implicit: Option<ObjectType>) -> Feed {
		let mut feed = Feed::new(format!("api/user/{nickname}/{name}"));
		if let Some(kind) = implicit {
			feed.object_types.push(kind.as_ref().to_string());
		}
		feed
	}

	/// Deliver an activity through the configured user's outbox, getting back what the server made of it
	pub fn post_activity(&self, activity: serde_json::Value) -> PumpResult<Object> {
		let outbox = format!("api/user/{}/feed", self.config.server.nickname);
		let response = self.request(&outbox, Method::Post, &Params::new(), Some(&activity))?;
		self.mapper.get_object(&response)
	}

	pub(crate) fn post_verb(&self, verb: Verb, object: serde_json::Value, target: Option<serde_json::Value>) -> PumpResult<Object> {
		tracing::debug!("posting '{verb}' activity");
		self.post_activity(activity(verb, object, target))
	}

	pub fn post_note(&self, content: &str, public: bool) -> PumpResult<Object> {
		let note = serde_json::json!({})
			.set_object_type(Some(ObjectType::Note.as_ref()))
			.set_content(Some(content));
		let mut activity = activity(Verb::Post, note, None);
		if public {
			activity = activity.set_to(vec![actstream::target::public()]);
		}
		self.post_activity(activity)
	}

	pub fn comment(&self, on: &Object, content: &str) -> PumpResult<Object> {
		let comment = serde_json::json!({})
			.set_object_type(Some(ObjectType::Comment.as_ref()))
			.set_content(Some(content))
			.set_in_reply_to(Some(on.reference()));
		self.post_verb(Verb::Post, comment, None)
	}

	pub fn like(&self, object: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::Like, object.reference(), None)
	}

	pub fn unlike(&self, object: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::Unlike, object.reference(), None)
	}

	pub fn share(&self, object: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::Share, object.reference(), None)
	}

	pub fn unshare(&self, object: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::Unshare, object.reference(), None)
	}

	pub fn delete(&self, object: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::Delete, object.reference(), None)
	}

	pub fn follow(&self, person: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::Follow, person.reference(), None)
	}

	pub fn unfollow(&self, person: &Object) -> PumpResult<Object> {
		self.post_verb(Verb::StopFollowing, person.reference(), None)
	}
}

fn activity(verb: Verb, object: serde_json::Value, target: Option<serde_json::Value>) -> serde_json::Value {
	serde_json::json!({})
		.set_object_type(Some(ObjectType::Activity.as_ref()))
		.set_verb(Some(verb.as_ref()))
		.set_object(Some(object))
		.set_target(target)
}
