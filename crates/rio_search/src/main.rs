//! Event Lookup CLI
//!
//! Prints every event, across all decoded stat files in a directory, that
//! matches the given filters.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use rio_core::index::{BandedDimension, CharacterRole, EventFlag, NumericDimension};
#[cfg(feature = "cli")]
use rio_core::models::CategoricalDimension;
#[cfg(feature = "cli")]
use rio_core::query::{Filter, PlayerRole};
#[cfg(feature = "cli")]
use rio_search::{summarize_filters, CharacterTable, SearchConfig, SearchSession};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "rio_search")]
#[command(version = rio_core::VERSION)]
#[command(about = "Find events matching filters across decoded stat files", long_about = None)]
struct Cli {
    /// Search config JSON
    #[arg(long, default_value = rio_search::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Stat directory, overrides the config
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Character alias CSV, overrides the config
    #[arg(long)]
    chars: Option<PathBuf>,

    /// Evaluate files one at a time
    #[arg(long)]
    sequential: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    // Result of at-bat
    #[arg(long)]
    bunt: bool,
    #[arg(long)]
    sac_fly: bool,
    #[arg(long)]
    strikeout: bool,
    #[arg(long)]
    ground_ball_dp: bool,
    #[arg(long)]
    error_chem: bool,
    #[arg(long)]
    error_input: bool,
    /// Any walk (BB or HBP)
    #[arg(long)]
    walk: bool,
    #[arg(long)]
    walk_hbp: bool,
    #[arg(long)]
    walk_bb: bool,
    /// Any hit (single through HR)
    #[arg(long)]
    hit: bool,
    #[arg(long)]
    single: bool,
    #[arg(long)]
    double: bool,
    #[arg(long)]
    triple: bool,
    #[arg(long)]
    hr: bool,
    /// Result of at-bat by name or group (hit, walk, error)
    #[arg(long)]
    result: Option<String>,

    // Event flags
    #[arg(long)]
    steal: bool,
    #[arg(long)]
    star_pitch: bool,
    #[arg(long)]
    bobble: bool,
    #[arg(long)]
    five_star_dinger: bool,
    #[arg(long)]
    sliding_catch: bool,
    #[arg(long)]
    wall_jump: bool,
    #[arg(long)]
    manual_select: bool,
    #[arg(long)]
    full_count: bool,
    #[arg(long)]
    in_strikezone: bool,
    #[arg(long)]
    star_chance: bool,
    #[arg(long)]
    walkoff: bool,

    // Characters, by any name listed in the character table
    #[arg(long)]
    batter: Option<String>,
    #[arg(long)]
    pitcher: Option<String>,
    #[arg(long)]
    fielder: Option<String>,

    /// First fielder position (P, C, 1B, ... RF)
    #[arg(long)]
    first_fielder_pos: Option<String>,
    #[arg(long)]
    pitch_type: Option<String>,
    #[arg(long)]
    charge_type: Option<String>,
    #[arg(long)]
    swing_type: Option<String>,
    /// Contact quality or group (nice, sour)
    #[arg(long)]
    contact_type: Option<String>,
    #[arg(long)]
    input_direction: Option<String>,

    // Signed-magnitude lists: n exact, -n at least n (at most for stamina)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    balls: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    strikes: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    inning: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    rbi: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    outs: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    chem: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    stamina: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    outs_during_play: Vec<i64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    contact_frame: Vec<i64>,
    /// 0 = bases empty, n = runner on n, -n = runner on n if any
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    runners: Vec<i64>,
    /// 0 = top, 1 = bottom
    #[arg(long)]
    half_inning: Option<i64>,

    /// Human player at bat
    #[arg(long)]
    player_batting: Option<String>,
    /// Human player on the mound
    #[arg(long)]
    player_pitching: Option<String>,

    /// Minimum |ball position in strikezone|
    #[arg(long, allow_negative_numbers = true)]
    min_strikezone_pos: Option<f64>,
    /// Minimum |ball contact position x|
    #[arg(long, allow_negative_numbers = true)]
    min_contact_pos: Option<f64>,
}

#[cfg(feature = "cli")]
impl Cli {
    fn wants_characters(&self) -> bool {
        self.batter.is_some() || self.pitcher.is_some() || self.fielder.is_some()
    }

    /// Filters in command-line order of concern; intersection is commutative
    fn filters(&self, session: &SearchSession) -> rio_core::Result<Vec<Filter>> {
        let mut filters = Vec::new();

        let results = [
            (self.bunt, "Bunt"),
            (self.sac_fly, "SacFly"),
            (self.strikeout, "Strikeout"),
            (self.ground_ball_dp, "Ground ball double Play"),
            (self.error_chem, "Error - Chem"),
            (self.error_input, "Error - Input"),
            (self.walk, "walk"),
            (self.walk_hbp, "Walk (HBP)"),
            (self.walk_bb, "Walk (BB)"),
            (self.hit, "hit"),
            (self.single, "Single"),
            (self.double, "Double"),
            (self.triple, "Triple"),
            (self.hr, "HR"),
        ];
        filters.extend(results.iter().filter(|(on, _)| *on).map(|(_, r)| Filter::result(*r)));
        if let Some(result) = &self.result {
            filters.push(Filter::result(result.as_str()));
        }

        let flags = [
            (self.steal, EventFlag::Steal),
            (self.star_pitch, EventFlag::StarPitch),
            (self.bobble, EventFlag::Bobble),
            (self.five_star_dinger, EventFlag::FiveStarSwing),
            (self.sliding_catch, EventFlag::SlidingCatch),
            (self.wall_jump, EventFlag::WallJump),
            (self.manual_select, EventFlag::ManualFielderSelection),
            (self.full_count, EventFlag::FullCountPitch),
            (self.in_strikezone, EventFlag::InStrikezone),
            (self.star_chance, EventFlag::StarChance),
            (self.walkoff, EventFlag::Walkoff),
        ];
        filters.extend(flags.iter().filter(|(on, _)| *on).map(|(_, f)| Filter::flag(*f)));

        let characters = [
            (&self.batter, CharacterRole::AtBat),
            (&self.pitcher, CharacterRole::Pitching),
            (&self.fielder, CharacterRole::Fielding),
        ];
        for (name, role) in characters {
            if let Some(name) = name {
                filters.push(session.character_filter(role, name)?);
            }
        }

        let categoricals = [
            (&self.first_fielder_pos, CategoricalDimension::FielderPosition),
            (&self.pitch_type, CategoricalDimension::PitchType),
            (&self.charge_type, CategoricalDimension::ChargeType),
            (&self.swing_type, CategoricalDimension::SwingType),
            (&self.contact_type, CategoricalDimension::ContactType),
            (&self.input_direction, CategoricalDimension::InputDirection),
        ];
        for (value, dimension) in categoricals {
            if let Some(value) = value {
                filters.push(Filter::categorical(dimension, value.as_str()));
            }
        }

        let counts = [
            (&self.balls, NumericDimension::Balls),
            (&self.strikes, NumericDimension::Strikes),
            (&self.inning, NumericDimension::Inning),
            (&self.rbi, NumericDimension::Rbi),
            (&self.outs, NumericDimension::Outs),
            (&self.chem, NumericDimension::ChemLinksOnBase),
            (&self.stamina, NumericDimension::PitcherStamina),
            (&self.outs_during_play, NumericDimension::OutsDuringPlay),
            (&self.contact_frame, NumericDimension::ContactFrame),
        ];
        for (values, dimension) in counts {
            if !values.is_empty() {
                filters.push(Filter::counts(dimension, values.clone()));
            }
        }
        if !self.runners.is_empty() {
            filters.push(Filter::runners(self.runners.clone()));
        }
        if let Some(half) = self.half_inning {
            filters.push(Filter::half_inning(half));
        }

        if let Some(name) = &self.player_batting {
            filters.push(Filter::player(PlayerRole::Batting, name.as_str()));
        }
        if let Some(name) = &self.player_pitching {
            filters.push(Filter::player(PlayerRole::Pitching, name.as_str()));
        }

        if let Some(threshold) = self.min_strikezone_pos {
            filters.push(Filter::magnitude_at_least(
                BandedDimension::BallPositionStrikezone,
                threshold,
            ));
        }
        if let Some(threshold) = self.min_contact_pos {
            filters.push(Filter::magnitude_at_least(
                BandedDimension::ContactPositionX,
                threshold,
            ));
        }

        Ok(filters)
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = SearchConfig::load_or_default(&cli.config, cli.dir.as_deref())?;
    if let Some(chars) = &cli.chars {
        config.character_table = chars.clone();
    }
    if cli.sequential {
        config.parallel = false;
    }

    // The alias table is only read when a character name needs resolving
    let session = if cli.wants_characters() {
        SearchSession::open(config)?
    } else {
        SearchSession::new(config, CharacterTable::default())
    };

    let filters = cli.filters(&session)?;
    let summary = summarize_filters(&filters);
    let report = session.run(&filters)?;

    for file in &report.files {
        for block in file.describe(&summary) {
            println!("{}\n", block);
        }
    }

    if !report.skipped.is_empty() {
        eprintln!("{} file(s) skipped, rerun with -v for details", report.skipped.len());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("rio_search CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
