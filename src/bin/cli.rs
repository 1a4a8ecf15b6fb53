//! ShelfDB CLI
//!
//! Command-line interface over a `users` table.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use shelfdb::{Config, Database, Format, Identifiable, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// ShelfDB CLI
#[derive(Parser, Debug)]
#[command(name = "shelfdb-cli")]
#[command(about = "Inspect and edit a ShelfDB users table")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./shelfdb_data")]
    data_dir: String,

    /// Table file format (json, json-indent, yaml, bson, binary)
    #[arg(short, long, default_value = "json-indent")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all users sorted by name
    List,

    /// Get a user by name
    Get {
        /// The user's name
        name: String,
    },

    /// Insert a user, failing if the name is taken
    Insert {
        name: String,
        age: u32,
        #[arg(long)]
        male: bool,
    },

    /// Insert or overwrite a user
    Upsert {
        name: String,
        age: u32,
        #[arg(long)]
        male: bool,
    },

    /// Delete a user by name
    Delete {
        /// The user's name
        name: String,
    },

    /// Show the oldest user
    Oldest {
        /// Only consider male users
        #[arg(long, conflicts_with = "female")]
        male: bool,

        /// Only consider female users
        #[arg(long)]
        female: bool,
    },

    /// Count users
    Count,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    name: String,
    male: bool,
    age: u32,
}

impl Identifiable for User {
    fn id(&self) -> String {
        self.name.clone()
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .format(args.format)
        .build();

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> shelfdb::Result<()> {
    let db = Database::open(config)?;
    let users: Table<User> = db.table("users")?;

    match command {
        Commands::List => {
            for user in users.list().all() {
                print_user(&user);
            }
        }
        Commands::Get { name } => {
            let user = users.require(&name)?;
            print_user(&user);
        }
        Commands::Insert { name, age, male } => {
            users.insert(User { name, male, age })?;
            users.close()?;
        }
        Commands::Upsert { name, age, male } => {
            users.upsert(User { name, male, age });
            users.close()?;
        }
        Commands::Delete { name } => {
            if users.delete_by_id(&name) {
                users.close()?;
            } else {
                println!("no user named {}", name);
            }
        }
        Commands::Oldest { male, female } => {
            let oldest = users
                .filter(move |_, u| (!male || u.male) && (!female || !u.male))
                .sort(|a, b| a.age < b.age)
                .max();
            match oldest {
                Some(user) => print_user(&user),
                None => println!("no matching users"),
            }
        }
        Commands::Count => println!("{}", users.len()),
    }

    Ok(())
}

fn print_user(user: &User) {
    let gender = if user.male { "male" } else { "female" };
    println!("{}\t{}\t{}", user.name, user.age, gender);
}
