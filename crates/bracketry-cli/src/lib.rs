//! CLI logic for the Bracketry bracket tool.
//!
//! The CLI keeps its drawing surface in a TOML state file. `build` replaces
//! whatever bracket the file holds, `remove` clears it, and `inspect` lists
//! the matches recovered from the file's named regions.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, BuildArgs, Command};

use std::{fmt::Write as _, fs, path::Path};

use log::{debug, info};

use bracketry::{
    BracketError, BracketMaker, builder::BracketVariant, canvas::GridCanvas,
    structure::BracketRegistry,
};

/// Run the Bracketry CLI application
///
/// # Errors
///
/// Returns `BracketError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid participant lists or qualification targets
/// - Unreadable state files
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), BracketError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let maker = BracketMaker::new(app_config);
    let state = Path::new(&args.state);

    match &args.command {
        Command::Build(build) => build_bracket(&maker, state, build),
        Command::Remove => remove_bracket(&maker, state),
        Command::Inspect => {
            let registry = inspect_bracket(&maker, state)?;
            print!("{}", describe(&registry));
            Ok(())
        }
    }
}

/// Reads a participant list: one name per line, in seed order.
///
/// Surrounding whitespace is trimmed and the list ends at the first blank
/// line.
///
/// # Errors
///
/// Returns `BracketError::Io` if the file cannot be read.
pub fn read_participants(path: impl AsRef<Path>) -> Result<Vec<String>, BracketError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_participants(&content))
}

/// Reads the bracket stored in a state file.
///
/// # Errors
///
/// Returns `BracketError::Io` if the state file cannot be read and
/// `BracketError::State` if its contents are not a readable canvas.
pub fn inspect_bracket(maker: &BracketMaker, state: &Path) -> Result<BracketRegistry, BracketError> {
    let canvas = GridCanvas::load(state)?;
    maker.read_bracket(&canvas)
}

fn parse_participants(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_canvas(state: &Path) -> Result<GridCanvas, BracketError> {
    if state.exists() {
        return GridCanvas::load(state);
    }
    debug!(path = state.display().to_string(); "No state file, starting from a blank canvas");
    Ok(GridCanvas::new())
}

fn build_bracket(maker: &BracketMaker, state: &Path, build: &BuildArgs) -> Result<(), BracketError> {
    info!(
        participants_path = build.participants,
        state_path = state.display().to_string();
        "Processing participant list"
    );

    let participants = read_participants(&build.participants)?;
    let variant = match build.qualified {
        Some(qualified) => BracketVariant::Qualification { qualified },
        None => BracketVariant::Standard,
    };

    let mut canvas = load_canvas(state)?;
    let tree = maker.rebuild_bracket(&mut canvas, &participants, build.start_row, variant)?;

    // Render before writing anything so a failed export leaves no partial output.
    let svg = build
        .output
        .as_ref()
        .map(|_| maker.render_svg(&canvas))
        .transpose()?;

    canvas.save(state)?;
    if let (Some(output), Some(svg)) = (&build.output, svg) {
        fs::write(output, svg)?;
        info!(output_file = output; "SVG exported successfully");
    }

    info!(
        matches = tree.match_count(),
        rounds = tree.plan().total_rounds();
        "Bracket saved"
    );
    Ok(())
}

fn remove_bracket(maker: &BracketMaker, state: &Path) -> Result<(), BracketError> {
    if !state.exists() {
        info!(path = state.display().to_string(); "No state file, nothing to remove");
        return Ok(());
    }

    let mut canvas = GridCanvas::load(state)?;
    let removed = maker.remove_bracket(&mut canvas)?;
    canvas.save(state)?;

    info!(removed = removed; "Bracket removed from state file");
    Ok(())
}

fn describe(registry: &BracketRegistry) -> String {
    let mut out = String::new();
    for column in registry.columns() {
        let _ = writeln!(out, "Column {column}");
        for bracket_match in registry.column(column) {
            let rows = bracket_match.rows();
            let _ = writeln!(
                out,
                "  Match {:>2}  round {}  rows {}-{}  middle {}",
                bracket_match.match_index(),
                bracket_match.round(),
                rows.start(),
                rows.end(),
                bracket_match.middle().row(),
            );
        }
    }
    out
}
