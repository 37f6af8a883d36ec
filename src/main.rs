use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use survey_builder::api::{HttpProjectApi, ProjectPayload};
use survey_builder::config::BuilderConfig;
use survey_builder::core::QuestionId;
use survey_builder::runtime::{Effect, FormAction, FormBuilder, NotificationLevel};
use survey_builder::ui::frame_json::lines_to_json;
use survey_builder::ui::span::plain_text;
use survey_builder::widgets::traits::{DrawOutput, Drawable};

#[derive(Parser, Debug)]
#[command(name = "survey-builder", version, about = "Inspect and publish survey documents")]
struct Cli {
    /// Builder config (YAML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the question chain.
    Workflow {
        survey: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Render the preview of a question (the first one by default).
    Preview {
        survey: PathBuf,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the settings panel of a question.
    Settings {
        survey: PathBuf,
        #[arg(long)]
        question: Option<String>,
    },
    /// Print the JSON payload that `save` would send.
    Payload { survey: PathBuf },
    /// Post the survey to the project API.
    Save { survey: PathBuf },
    /// Print a starter survey holding only the welcome screen.
    New {
        #[arg(long)]
        title: Option<String>,
    },
}

fn main() {
    survey_builder::logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => BuilderConfig::load(path)?,
        None => BuilderConfig::default(),
    }
    .with_env_overrides();

    match cli.command {
        Command::Workflow { survey, json } => {
            let builder = open(&config, &survey)?;
            let workflow = builder.workflow();
            emit(workflow.draw(), json);
        }
        Command::Preview {
            survey,
            question,
            json,
        } => {
            let builder = select(open(&config, &survey)?, question)?;
            let preview = builder.preview();
            if json {
                println!("{}", serde_json::to_string_pretty(&preview.to_json())?);
            } else {
                emit(preview.draw(), false);
            }
        }
        Command::Settings { survey, question } => {
            let builder = select(open(&config, &survey)?, question)?;
            match (builder.settings(), builder.store().selected()) {
                (Some(panel), _) => emit(panel.draw(), false),
                (None, Some(question)) => {
                    println!("No settings for `{}` questions", question.kind())
                }
                (None, None) => println!("No question selected"),
            }
        }
        Command::Payload { survey } => {
            let builder = open(&config, &survey)?;
            println!("{}", builder.payload().to_json_string()?);
        }
        Command::Save { survey } => {
            let mut builder = open(&config, &survey)?;
            let api = HttpProjectApi::new(&config.api);
            let mut failed = false;
            for effect in builder.save(&api) {
                if let Effect::Notify(notification) = effect {
                    failed |= notification.level == NotificationLevel::Error;
                    println!("{}", notification.message);
                }
            }
            if failed {
                bail!("save failed");
            }
        }
        Command::New { title } => {
            let mut config = config;
            if let Some(title) = title {
                config.form_name = title;
            }
            let builder = FormBuilder::new(config);
            println!("{}", serde_yaml::to_string(&builder.payload())?);
        }
    }
    Ok(())
}

fn open(config: &BuilderConfig, path: &Path) -> Result<FormBuilder> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let payload = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => ProjectPayload::from_yaml_str(&text)?,
        _ => ProjectPayload::from_json_str(&text)?,
    };
    let builder = FormBuilder::from_payload(config.clone(), payload)
        .with_context(|| format!("invalid survey {}", path.display()))?;
    Ok(builder)
}

fn select(mut builder: FormBuilder, question: Option<String>) -> Result<FormBuilder> {
    if let Some(id) = question {
        for effect in builder.dispatch(FormAction::Select(QuestionId::new(id))) {
            if let Effect::Notify(notification) = effect {
                bail!(notification.message);
            }
        }
    }
    Ok(builder)
}

fn emit(output: DrawOutput, json: bool) {
    if json {
        println!("{}", lines_to_json(&output.lines, None));
        return;
    }
    for line in &output.lines {
        println!("{}", plain_text(line));
    }
}
