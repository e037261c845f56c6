use clap::{Args, Parser, Subcommand};
use investor_match::config::AppConfig;
use investor_match::error::AppError;
use investor_match::matcher::{
    render, ChipStrip, FoundedYearBucket, HttpScoringClient, MatchSession, MultiSelectField,
    Notification, ResultCard, ScoringGateway, StrategyType,
};
use investor_match::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Investor Match Configurator",
    about = "Configure a recommendation query against the scoring service and print the matches",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the selectable filter options
    Catalog,
    /// Configure filters, request recommendations, and print the result cards (default)
    Match(MatchArgs),
}

#[derive(Args, Debug, Default)]
struct MatchArgs {
    /// Industry filter; repeat the flag to select several
    #[arg(long = "industry")]
    industries: Vec<String>,
    /// Funding-stage filter; repeat the flag to select several
    #[arg(long = "stage")]
    stages: Vec<String>,
    /// Strategy: content, collaborative, hybrid, or startup_similarity
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<StrategyType>,
    /// Activity weight in [0, 1] (hybrid only)
    #[arg(long)]
    activity_weight: Option<f64>,
    /// Investment weight in [0, 1] (hybrid only)
    #[arg(long)]
    investment_weight: Option<f64>,
    #[arg(long)]
    team_size: Option<String>,
    /// Company maturity: New, Growing, Established, or Unknown
    #[arg(long, value_parser = parse_bucket)]
    founded_year: Option<FoundedYearBucket>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    business_model: Option<String>,
    #[arg(long)]
    revenue_stage: Option<String>,
    #[arg(long)]
    customer_segment: Option<String>,
}

fn parse_strategy(value: &str) -> Result<StrategyType, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_bucket(value: &str) -> Result<FoundedYearBucket, String> {
    value.parse().map_err(|err| format!("{err}"))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let client = HttpScoringClient::new(config.scoring.clone())?;
    let session = MatchSession::new(client);

    let cli = Cli::parse();
    match cli
        .command
        .unwrap_or_else(|| Command::Match(MatchArgs::default()))
    {
        Command::Catalog => run_catalog(&session).await,
        Command::Match(args) => run_match(&session, args).await,
    }

    Ok(())
}

async fn run_catalog<G: ScoringGateway>(session: &MatchSession<G>) {
    session.load_catalog().await;
    print_notifications(&session.notifications());

    let catalog = session.catalog();
    for (category, values) in catalog.categories() {
        if values.is_empty() {
            println!("{category}: (none)");
        } else {
            println!("{category}: {}", values.join(", "));
        }
    }
}

async fn run_match<G: ScoringGateway>(session: &MatchSession<G>, args: MatchArgs) {
    session.load_catalog().await;

    if let Some(strategy) = args.strategy {
        session.set_strategy(strategy);
    }
    for industry in &args.industries {
        session.toggle(MultiSelectField::Industries, industry);
    }
    for stage in &args.stages {
        session.toggle(MultiSelectField::Stages, stage);
    }
    if let Some(value) = args.team_size {
        session.set_team_size(value);
    }
    if let Some(bucket) = args.founded_year {
        session.set_founded_year(Some(bucket));
    }
    if let Some(value) = args.location {
        session.set_location(value);
    }
    if let Some(value) = args.business_model {
        session.set_business_model(value);
    }
    if let Some(value) = args.revenue_stage {
        session.set_revenue_stage(value);
    }
    if let Some(value) = args.customer_segment {
        session.set_customer_segment(value);
    }
    if let Some(weight) = args.activity_weight {
        session.set_activity_weight(weight);
    }
    if let Some(weight) = args.investment_weight {
        session.set_investment_weight(weight);
    }

    println!("Strategy: {}", session.strategy().label());
    session.submit().await;
    print_notifications(&session.notifications());

    let cards = render(&session.results());
    print_cards(&cards);
}

fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        eprintln!("[{}] {}", notification.kind.label(), notification.message);
    }
}

fn print_cards(cards: &[ResultCard]) {
    if cards.is_empty() {
        println!("No matches.");
        return;
    }

    for (index, card) in cards.iter().enumerate() {
        match card {
            ResultCard::Profile(card) => {
                println!("\n#{} {}", index + 1, card.name);
                println!("  {}", card.location);
                println!("  Bio: {}", card.bio);
                println!("  Investment Stages: {}", chip_line(&card.investment_stages));
                println!(
                    "  Past Investment Types: {}",
                    chip_line(&card.past_investment_types)
                );
                println!("  Score: {}", card.score);
                println!("  Ticket Size: {}", card.ticket_size);
                println!("  Recent Year: {}", card.recent_activity_year);
                println!("  Investments: {}", card.investment_count);
            }
            ResultCard::Similarity(card) => {
                println!("\n#{} {}", index + 1, card.startup_name);
                println!("  Industry: {}", card.industry);
                println!("  Funding Stage: {}", card.funding_stage);
                println!("  Score: {}", card.score);
                println!("  Investor: {}", card.investor);
            }
        }
    }
}

fn chip_line(strip: &ChipStrip) -> String {
    strip
        .chips
        .iter()
        .map(|chip| format!("[{chip}]"))
        .collect::<Vec<_>>()
        .join(" ")
}
