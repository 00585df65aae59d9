use std::path::PathBuf;
use clap::{Parser, Subcommand};

use pump::{LoggableError, Object, Query};


#[derive(Parser)]
/// walk activitystreams feeds of a pump.io-style server
struct Args {
	#[clap(subcommand)]
	/// command to run
	command: Mode,

	/// path to config file, leave empty to not use any
	#[arg(short, long)]
	config: Option<PathBuf>,

	#[arg(long)]
	/// server hostname, overrides config value
	host: Option<String>,

	#[arg(long)]
	/// local user nickname, overrides config value
	nickname: Option<String>,

	#[arg(long, default_value_t=false)]
	/// run with debug level tracing
	debug: bool,
}

#[derive(Clone, Subcommand)]
enum Mode {
	/// print current or default configuration
	Config,

	/// list items of a feed, newest first unless --since is given
	Feed {
		/// feed url or api endpoint, defaults to the configured user's inbox
		url: Option<String>,

		#[arg(short, long)]
		/// how many items to print, defaults to configured page size
		limit: Option<usize>,

		#[arg(long, default_value_t = false)]
		/// print every item, following pages until the end
		all: bool,

		#[arg(long, conflicts_with_all = ["since", "before"])]
		/// skip this many items first
		offset: Option<usize>,

		#[arg(long, conflicts_with = "before")]
		/// only items newer than this id
		since: Option<String>,

		#[arg(long)]
		/// only items older than this id
		before: Option<String>,
	},

	/// fetch and print one object
	Fetch {
		/// object url or api endpoint
		url: String,
	},
}

fn main() {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.compact()
		.with_max_level(if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO })
		.init();

	let mut config = pump::Config::load(args.config.as_ref());
	if let Some(host) = args.host {
		config.server.host = host;
	}
	if let Some(nickname) = args.nickname {
		config.server.nickname = nickname;
	}

	if matches!(args.command, Mode::Config) {
		println!("{}", toml::to_string_pretty(&config).expect("failed serializing config"));
		return;
	}

	let client = pump::Pump::connect(config).expect("failed creating http client");

	match args.command {
		Mode::Feed { url, limit, all, offset, since, before } => {
			let mut feed = match url {
				Some(url) => client.feed(&url),
				None => client.inbox(),
			};

			let mut query = Query::new();
			if let Some(limit) = limit {
				query = query.limit(limit);
			}
			if all {
				query = query.unbounded();
			}
			if let Some(offset) = offset {
				query = query.offset(offset);
			}
			if let Some(since) = since {
				query = query.since(since);
			}
			if let Some(before) = before {
				query = query.before(before);
			}

			match feed.items(&client, query) {
				Err(e) => tracing::error!("invalid feed query: {e}"),
				Ok(items) => for item in items {
					item.map(|x| print_object(&x)).err_failed("failed fetching feed page");
				},
			}
		},

		Mode::Fetch { url } =>
			client.get_object(&url)
				.map(|x| print_object(&x))
				.err_failed("failed fetching object"),

		Mode::Config => unreachable!(),
	}
}

fn print_object(obj: &Object) {
	let text = match obj {
		Object::Activity(activity) => {
			let actor = activity.actor().map(|x| x.display_name().unwrap_or(x.id())).unwrap_or("?");
			let object = activity.object().map(|x| x.id()).unwrap_or("?");
			format!("{actor} {} {object}", activity.verb)
		},
		_ => obj.display_name().or(obj.content()).unwrap_or_default().to_string(),
	};
	let deleted = if obj.is_deleted() { " (deleted)" } else { "" };
	println!("[{}] {}{deleted} {text}", obj.object_type(), obj.id());
}
