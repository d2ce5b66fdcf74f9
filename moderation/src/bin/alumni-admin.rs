//! CLI tool to moderate join/update requests and edit a JSON record file.

use std::path::PathBuf;
use std::process;

use alumni_directory::{BatchForm, DirectoryConfig, YearRange, load_records, save_records};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use moderation::{
    JoinForm, ModerationError, ModerationQueue, Photo, RecordForm, RequestKind, add_record,
    delete_record, edit_batch, edit_record,
};
use tracing::Level;

/// Review requests and maintain the alumni directory.
#[derive(Parser)]
#[command(name = "alumni-admin")]
struct Cli {
    /// Records file (JSON array)
    #[arg(long, default_value = "students.json")]
    records: PathBuf,

    /// Requests file (JSON array)
    #[arg(long, default_value = "requests.json")]
    requests: PathBuf,

    /// Directory config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pending requests
    Pending,
    /// Submit a join request
    Join(FormArgs),
    /// Add a record directly
    Add(FormArgs),
    /// Replace every field of a record
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Approve a pending request
    Approve { id: String },
    /// Reject a pending request
    Reject { id: String },
    /// Delete a record
    Delete { id: String },
    /// Re-encode a record's batch
    EditBatch {
        id: String,
        #[arg(long)]
        programme: String,
        #[arg(long)]
        start: String,
        #[arg(long, default_value = "")]
        end: String,
    },
}

/// Fields shared by the join, add and edit forms.
#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    programme: String,
    #[arg(long)]
    start: String,
    #[arg(long, default_value = "")]
    end: String,
    #[arg(long, default_value = "")]
    supervisor: String,
    #[arg(long, default_value = "")]
    position: String,
    #[arg(long, default_value = "")]
    institute: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    interests: String,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long, default_value = "")]
    info: String,
    /// Hosted photo URL
    #[arg(long, requires = "photo_size")]
    photo_url: Option<String>,
    /// Size of the uploaded photo in bytes
    #[arg(long, requires = "photo_url")]
    photo_size: Option<u64>,
}

impl From<FormArgs> for JoinForm {
    fn from(args: FormArgs) -> Self {
        let photo = args.photo_url.zip(args.photo_size).map(|(url, size)| Photo { url, size });
        Self {
            name: args.name,
            programme: args.programme,
            start_year: args.start,
            end_year: args.end,
            supervisor: args.supervisor,
            position: args.position,
            institute: args.institute,
            email: args.email,
            research_interests: args.interests,
            website: args.website,
            additional_info: args.info,
            photo,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ModerationError> {
    let config = DirectoryConfig::load(cli.config.as_deref())?;
    let years = YearRange::current(&config);

    match cli.command {
        Command::Pending => {
            let queue = ModerationQueue::load(&cli.requests)?;
            for request in queue.pending() {
                let kind = match &request.kind {
                    RequestKind::Join => "JOIN".to_string(),
                    RequestKind::Update { original_id } => format!("UPDATE {original_id}"),
                };
                println!(
                    "{}  {}  {}  {}  ({})",
                    request.id,
                    request.submitted_at.format("%Y-%m-%d %H:%M"),
                    kind,
                    request.record.name,
                    request.record.batch
                );
            }
        }
        Command::Join(args) => {
            let request = JoinForm::from(args).into_request(&config, &years, Utc::now())?;
            let mut queue = ModerationQueue::load(&cli.requests)?;
            println!("{}", queue.submit(request).id);
            queue.save(&cli.requests)?;
        }
        Command::Add(args) => {
            let mut records = load_records(&cli.records)?;
            let form = RecordForm::from(args);
            let added = add_record(&mut records, form, &config, &years, Utc::now())?;
            save_records(&cli.records, &records)?;
            println!("{}", added.id.unwrap_or_default());
        }
        Command::Edit { id, form } => {
            let mut records = load_records(&cli.records)?;
            let edited = edit_record(
                &mut records,
                &id,
                RecordForm::from(form),
                &config,
                &years,
                Utc::now(),
            )?;
            save_records(&cli.records, &records)?;
            println!("Updated {} ({})", edited.name, edited.batch);
        }
        Command::Approve { id } => {
            let mut queue = ModerationQueue::load(&cli.requests)?;
            let mut records = load_records(&cli.records)?;
            let stored = queue.approve(&id, &mut records)?;
            save_records(&cli.records, &records)?;
            queue.save(&cli.requests)?;
            println!("Approved {} ({})", stored.name, stored.batch);
        }
        Command::Reject { id } => {
            let mut queue = ModerationQueue::load(&cli.requests)?;
            queue.reject(&id)?;
            queue.save(&cli.requests)?;
            println!("Rejected {id}");
        }
        Command::Delete { id } => {
            let mut records = load_records(&cli.records)?;
            let removed = delete_record(&mut records, &id)?;
            save_records(&cli.records, &records)?;
            println!("Deleted {}", removed.name);
        }
        Command::EditBatch {
            id,
            programme,
            start,
            end,
        } => {
            let form = BatchForm::from_inputs(&programme, &start, &end)?;
            let mut records = load_records(&cli.records)?;
            let batch = edit_batch(&mut records, &id, &form, &years)?;
            save_records(&cli.records, &records)?;
            println!("{batch}");
        }
    }
    Ok(())
}
