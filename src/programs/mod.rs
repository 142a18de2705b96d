use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use tracing::info;

use crate::api::{ApiClient, Exercise, Program, ProgramDraft};
use crate::config::StudioSettings;
use crate::format::{format_date, initials};

/// Prints the program collection in backend order, or the explicit
/// empty-state line.
pub async fn run_list(settings: &StudioSettings) -> Result<()> {
    let client = ApiClient::new(settings.clone());
    let programs = client
        .list_programs()
        .await
        .context("failed to load programs")?;

    if programs.is_empty() {
        println!("No programs yet.");
        return Ok(());
    }

    for program in &programs {
        println!("{}", program_headline(program, &format_date(&program.created_at)));
    }
    Ok(())
}

pub async fn run_show(settings: &StudioSettings, id: &str) -> Result<()> {
    let client = ApiClient::new(settings.clone());
    let program = client
        .get_program(id)
        .await
        .with_context(|| format!("failed to load program `{id}`"))?;

    println!("{}", program_headline(&program, &format_date(&program.created_at)));
    if program.days.is_empty() {
        println!("  no days");
        return Ok(());
    }

    for day in &program.days {
        println!("  {}", day.name);
        for exercise in &day.exercises {
            println!("    {}", exercise_line(exercise));
        }
    }
    Ok(())
}

/// Reads a `ProgramDraft` from a YAML file and posts it to the backend.
pub async fn run_create(settings: &StudioSettings, draft_path: &Path) -> Result<()> {
    let raw = fs::read_to_string(draft_path)
        .with_context(|| format!("failed to read draft file `{}`", draft_path.display()))?;
    let draft: ProgramDraft = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse draft file `{}`", draft_path.display()))?;
    ensure!(!draft.name.trim().is_empty(), "draft name cannot be empty");
    ensure!(
        !draft.shared_by.trim().is_empty(),
        "draft shared_by cannot be empty"
    );

    let client = ApiClient::new(settings.clone());
    let program = client
        .create_program(&draft)
        .await
        .context("failed to create program")?;

    info!(program_id = %program.id, name = %program.name, "program created");
    println!("Created program {} ({})", program.name, program.id);
    Ok(())
}

fn program_headline(program: &Program, formatted_date: &str) -> String {
    let mut headline = format!("[{}] {}", initials(&program.name), program.name);
    let mut notes = Vec::new();
    if !program.shared_by.is_empty() {
        notes.push(format!("shared by {}", program.shared_by));
    }
    if !formatted_date.is_empty() {
        notes.push(formatted_date.to_owned());
    }
    if !notes.is_empty() {
        headline.push_str(&format!(" ({})", notes.join(", ")));
    }
    headline
}

fn exercise_line(exercise: &Exercise) -> String {
    let mut line = format!("{}: {} x {}", exercise.name, exercise.sets, exercise.reps);
    if !exercise.rest.is_empty() {
        line.push_str(&format!(", rest {}", exercise.rest));
    }
    line
}
