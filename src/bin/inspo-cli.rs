use clap::{Args, Parser, Subcommand};

use inspiration_gateway::client::{GatewayClient, GatewayReply};
use inspiration_gateway::models::{FeedPage, ProfileDraft, ProfileList};

#[derive(Parser)]
#[command(name = "inspo-cli")]
#[command(about = "Command-line front-end for the inspiration gateway", long_about = None)]
struct Cli {
    #[arg(short, long, env = "GATEWAY_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Print raw JSON instead of a summary.
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bead feed
    Feed,
    /// Manage inspiration profiles
    #[command(subcommand)]
    Profiles(ProfileCommands),
    /// Work with uploaded documents
    #[command(subcommand)]
    Documents(DocumentCommands),
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List profiles
    List,
    /// Create a profile
    Create(ProfileForm),
    /// Replace a profile
    Update {
        id: String,
        #[command(flatten)]
        form: ProfileForm,
    },
    /// Delete a profile
    Delete { id: String },
    /// Start analysis of a profile's source URLs
    Analyze { id: String },
}

#[derive(Subcommand)]
enum DocumentCommands {
    /// Regenerate scripts for a document with its profile's style
    Regenerate { id: String },
}

#[derive(Args)]
struct ProfileForm {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    hero_image_url: Option<String>,
    /// Source URL; repeat for several
    #[arg(long = "source-url")]
    source_urls: Vec<String>,
    #[arg(long)]
    default: bool,
}

impl ProfileForm {
    fn draft(&self) -> ProfileDraft {
        ProfileDraft::from_form(
            &self.name,
            self.description.as_deref(),
            self.hero_image_url.as_deref(),
            &self.source_urls,
            self.default,
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    match cli.command {
        Commands::Feed => {
            let reply = client.feed().await?;
            if cli.raw || !reply.is_success() {
                print_reply(&reply)?;
            } else {
                print_feed(&reply.json()?);
            }
        }
        Commands::Profiles(ProfileCommands::List) => {
            let reply = client.list_profiles().await?;
            if cli.raw || !reply.is_success() {
                print_reply(&reply)?;
            } else {
                print_profiles(&reply.json()?);
            }
        }
        Commands::Profiles(ProfileCommands::Create(form)) => {
            print_reply(&client.create_profile(&form.draft()).await?)?;
        }
        Commands::Profiles(ProfileCommands::Update { id, form }) => {
            print_reply(&client.update_profile(&id, &form.draft()).await?)?;
        }
        Commands::Profiles(ProfileCommands::Delete { id }) => {
            print_reply(&client.delete_profile(&id).await?)?;
        }
        Commands::Profiles(ProfileCommands::Analyze { id }) => {
            let reply = client.analyze_profile(&id).await?;
            if reply.is_success() && !cli.raw {
                println!("Analysis started");
            } else {
                print_reply(&reply)?;
            }
        }
        Commands::Documents(DocumentCommands::Regenerate { id }) => {
            print_reply(&client.generate_scripts(&id).await?)?;
        }
    }

    Ok(())
}

fn print_reply(reply: &GatewayReply) -> Result<(), Box<dyn std::error::Error>> {
    if !reply.is_success() {
        eprintln!("Error: gateway returned status {}", reply.status);
        eprintln!("Response: {}", reply.body);
        return Ok(());
    }

    match serde_json::from_str::<serde_json::Value>(&reply.body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", reply.body),
    }
    Ok(())
}

fn print_feed(page: &FeedPage) {
    if page.feed.is_empty() {
        println!("(feed is empty)");
    }
    for item in &page.feed {
        let date = item
            .created_at
            .as_deref()
            .and_then(|ts| ts.get(..10))
            .unwrap_or("----------");
        println!("{}  {}", date, item.title);
        if !item.content.is_empty() {
            println!("    {}", item.content.replace('\n', "\n    "));
        }
        if let Some(audio) = &item.audio_url {
            println!("    audio: {}", audio);
        }
    }
}

fn print_profiles(list: &ProfileList) {
    if list.profiles.is_empty() {
        println!("(no profiles)");
    }
    for profile in &list.profiles {
        let marker = if profile.is_default { " (Default)" } else { "" };
        println!("{}  {}{}", profile.id, profile.name, marker);
        if let Some(description) = &profile.description {
            println!("    {}", description);
        }
        if let (Some(sources), Some(beads)) = (profile.source_count, profile.bead_count) {
            println!("    {} sources, {} beads", sources, beads);
        }
    }
}
