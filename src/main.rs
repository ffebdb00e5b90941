use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use moodtag::classifier::{self, RuleClassifier};
use moodtag::emotion::{Emotion, MOOD_ALIASES};
use moodtag::features::FeatureRecord;
use moodtag::recommend::RankedTrack;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moodtag", version, about = "Music emotion tagger")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmotionArg {
    Happy,
    Sad,
    Energetic,
    Calm,
}

impl From<EmotionArg> for Emotion {
    fn from(arg: EmotionArg) -> Self {
        match arg {
            EmotionArg::Happy => Emotion::Happy,
            EmotionArg::Sad => Emotion::Sad,
            EmotionArg::Energetic => Emotion::Energetic,
            EmotionArg::Calm => Emotion::Calm,
        }
    }
}

/// Audio descriptors; any left out count as 0.
#[derive(Args)]
struct FeatureArgs {
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    valence: f64,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    energy: f64,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    danceability: f64,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    acousticness: f64,
}

impl FeatureArgs {
    fn record(&self) -> FeatureRecord {
        FeatureRecord::new(self.valence, self.energy, self.danceability, self.acousticness)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Tag a track with an emotion and show its match scores
    Classify {
        #[command(flatten)]
        features: FeatureArgs,
    },

    /// Score how well a track matches a target emotion (0-100)
    Score {
        /// Target emotion label (unknown labels score 50)
        target: String,

        #[command(flatten)]
        features: FeatureArgs,
    },

    /// Run the rule classifier against a labeled dataset and report metrics
    Evaluate {
        /// Dataset file (.json, .yaml, .toml); defaults to config, then the built-in fixture
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Number of parallel workers (0 = auto-detect from config)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank candidate tracks by how well they match a target emotion
    Rank {
        /// Target emotion
        #[arg(value_enum)]
        target: EmotionArg,

        /// Track list file (.json, .yaml, .toml)
        tracks: PathBuf,

        /// Number of results (defaults to config, then 20)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Drop tracks scoring below this
        #[arg(long)]
        min_score: Option<f64>,
    },

    /// Map a mood word (joy, angry, relaxed, ...) to a music emotion
    Mood {
        word: String,
    },

    /// List supported emotions and mood aliases
    Emotions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = moodtag::config::AppConfig::load();

    match cli.command {
        Commands::Classify { features } => {
            let record = features.record();
            let rule = classifier::classify_explained(&record);
            println!("Emotion: {}", rule.emotion);
            println!("Rule:    {}", rule);
            println!();
            println!("{:<10} {:>6}", "Target", "Score");
            println!("{}", "-".repeat(17));
            for e in Emotion::ALL {
                println!("{:<10} {:>6.1}", e, classifier::score(&record, e));
            }
        }

        Commands::Score { target, features } => {
            let s = classifier::score_label(&features.record(), &target);
            println!("{:.2}", s);
        }

        Commands::Evaluate { dataset, jobs, json } => {
            let examples = match dataset.or(config.dataset.clone()) {
                Some(path) => moodtag::dataset::load_examples(&path)
                    .with_context(|| format!("Failed to load dataset {}", path.display()))?,
                None => moodtag::dataset::builtin_fixture()
                    .context("Failed to parse built-in fixture")?,
            };

            let workers = if jobs > 0 { jobs } else { config.resolve_workers() };
            let report = moodtag::evaluate::run_parallel(&examples, &RuleClassifier, workers);

            if json {
                let out = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report")?;
                println!("{}", out);
            } else {
                print!("{}", report);
            }
        }

        Commands::Rank { target, tracks, limit, min_score } => {
            let candidates = moodtag::dataset::load_tracks(&tracks)
                .with_context(|| format!("Failed to load tracks {}", tracks.display()))?;

            let mut opts = config.recommend.rank_options();
            if let Some(n) = limit {
                opts.limit = n;
            }
            if let Some(m) = min_score {
                opts.min_score = m;
            }

            let target = Emotion::from(target);
            let ranked = moodtag::recommend::rank(&candidates, target, &opts);

            if ranked.is_empty() {
                println!("No tracks match {} (min score {:.1}).", target, opts.min_score);
                return Ok(());
            }

            println!("Top {} tracks for {}:", ranked.len(), target);
            println!();
            print_ranked_table(&ranked);
        }

        Commands::Mood { word } => {
            println!("{}", Emotion::from_mood(&word));
        }

        Commands::Emotions => {
            println!("Emotions:");
            for e in Emotion::ALL {
                println!("  {}", e);
            }
            println!();
            println!("Mood aliases:");
            for (alias, e) in MOOD_ALIASES {
                println!("  {:<10} -> {}", alias, e);
            }
            println!("  (anything else -> calm)");
        }
    }

    Ok(())
}

/// Print ranked tracks with score and tagged emotion.
fn print_ranked_table(tracks: &[RankedTrack]) {
    println!("{:>3}  {:<30} {:>6}  {:<10}", "#", "Track", "Score", "Tagged");
    println!("{}", "-".repeat(54));

    for (i, t) in tracks.iter().enumerate() {
        // Truncate long names
        let name: String = if t.name.chars().count() > 30 {
            let head: String = t.name.chars().take(27).collect();
            format!("{}...", head)
        } else {
            t.name.clone()
        };

        println!("{:>3}  {:<30} {:>6.1}  {:<10}", i + 1, name, t.score, t.emotion);
    }
}
