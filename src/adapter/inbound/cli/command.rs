//! Command-line interface definitions.
//!
//! Defines the CLI structure for the appraisal application using `clap`.
//! Each record type gets a subcommand group; ids, dates, and choice values are
//! parsed into their domain types before a handler runs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{
    EvaluationId, EvaluationStatus, FeedbackId, GoalId, GoalStatus, QuestionId, QuestionType,
    SectionId, TemplateId, UserId,
};
use crate::domain::calendar;
use crate::domain::error::DomainError;
use crate::infrastructure::config::paths;

/// Employee performance evaluation records
#[derive(Parser, Debug)]
#[command(name = "appraisal")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Path to the SQLite database (overrides config and APPRAISAL_DATABASE)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// `YYYY-MM-DD` within the storable year range.
fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    calendar::parse_date("date", value)
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the appraisal CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create ~/.appraisal, write a default config, and migrate the database
    Init(InitArgs),

    /// Apply pending database migrations
    Migrate,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Manage users
    #[command(subcommand)]
    User(UserCommand),

    /// Manage evaluation templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Manage template sections
    #[command(subcommand)]
    Section(SectionCommand),

    /// Manage section questions
    #[command(subcommand)]
    Question(QuestionCommand),

    /// Manage performance evaluations
    #[command(subcommand)]
    Evaluation(EvaluationCommand),

    /// Record and list evaluation responses
    #[command(subcommand)]
    Response(ResponseCommand),

    /// Manage employee goals
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Give and list feedback
    #[command(subcommand)]
    Feedback(FeedbackCommand),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Subcommands for `appraisal config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults and overrides applied
    Show,
}

/// Skip the confirmation prompt.
#[derive(Args, Debug, Clone, Copy)]
pub struct ConfirmArgs {
    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Subcommands for `appraisal user`.
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Add a user
    Add {
        username: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// List users
    List,
    /// Remove a user and every record that references them
    Remove {
        id: UserId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

/// Subcommands for `appraisal template`.
#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Create a template
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Create the template inactive
        #[arg(long)]
        inactive: bool,
    },
    /// List templates
    List {
        /// Only active templates
        #[arg(long)]
        active: bool,
    },
    /// Show a template with its sections and questions
    Show { id: TemplateId },
    /// Mark a template active
    Activate { id: TemplateId },
    /// Mark a template inactive
    Deactivate { id: TemplateId },
    /// Remove a template with its sections, questions, and evaluations
    Remove {
        id: TemplateId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

/// Subcommands for `appraisal section`.
#[derive(Subcommand, Debug)]
pub enum SectionCommand {
    /// Add a section to a template
    Add {
        template: TemplateId,
        name: String,
        #[arg(long, default_value_t = crate::domain::template::DEFAULT_ORDER)]
        order: i32,
    },
    /// List the sections of a template
    List { template: TemplateId },
    /// Remove a section with its questions
    Remove {
        id: SectionId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

/// Subcommands for `appraisal question`.
#[derive(Subcommand, Debug)]
pub enum QuestionCommand {
    /// Add a question to a section
    Add {
        section: SectionId,
        text: String,
        /// rating, text, or yesno
        #[arg(long = "type", default_value = "rating")]
        question_type: QuestionType,
        #[arg(long, default_value_t = crate::domain::template::DEFAULT_ORDER)]
        order: i32,
    },
    /// List the questions of a section
    List { section: SectionId },
    /// Remove a question with its responses
    Remove {
        id: QuestionId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

/// Subcommands for `appraisal evaluation`.
#[derive(Subcommand, Debug)]
pub enum EvaluationCommand {
    /// Start an evaluation
    Create(EvaluationCreateArgs),
    /// List evaluations
    List(EvaluationListArgs),
    /// Show an evaluation with its responses, feedback, and goals
    Show { id: EvaluationId },
    /// Set the status of an evaluation
    Status {
        id: EvaluationId,
        /// pending, in_progress, completed, or cancelled
        status: EvaluationStatus,
    },
    /// Remove an evaluation with its responses and feedback
    Remove {
        id: EvaluationId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args, Debug)]
pub struct EvaluationCreateArgs {
    #[arg(long)]
    pub employee: UserId,
    #[arg(long)]
    pub manager: UserId,
    #[arg(long)]
    pub template: TemplateId,
    /// First day of the period (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: NaiveDate,
    /// Last day of the period (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end: NaiveDate,
    #[arg(long, default_value = "pending")]
    pub status: EvaluationStatus,
}

#[derive(Args, Debug, Default)]
pub struct EvaluationListArgs {
    #[arg(long)]
    pub employee: Option<UserId>,
    #[arg(long)]
    pub manager: Option<UserId>,
    #[arg(long)]
    pub template: Option<TemplateId>,
    #[arg(long)]
    pub status: Option<EvaluationStatus>,
}

/// Subcommands for `appraisal response`.
#[derive(Subcommand, Debug)]
pub enum ResponseCommand {
    /// Record an answer to a question
    Record {
        evaluation: EvaluationId,
        question: QuestionId,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        rating: Option<i32>,
    },
    /// List the responses of an evaluation
    List { evaluation: EvaluationId },
}

/// Subcommands for `appraisal goal`.
#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// Set a goal for an employee
    Create(GoalCreateArgs),
    /// List goals by end date
    List {
        #[arg(long)]
        employee: Option<UserId>,
        #[arg(long)]
        evaluation: Option<EvaluationId>,
    },
    /// Change status, progress, or evaluation link
    Update(GoalUpdateArgs),
    /// Remove a goal
    Remove {
        id: GoalId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args, Debug)]
pub struct GoalCreateArgs {
    #[arg(long)]
    pub employee: UserId,
    pub text: String,
    #[arg(long, value_parser = parse_date)]
    pub start: NaiveDate,
    #[arg(long, value_parser = parse_date)]
    pub end: NaiveDate,
    #[arg(long)]
    pub evaluation: Option<EvaluationId>,
    #[arg(long, default_value = "not_started")]
    pub status: GoalStatus,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub progress: i32,
}

#[derive(Args, Debug)]
pub struct GoalUpdateArgs {
    pub id: GoalId,
    /// not_started, in_progress, completed, or on_hold
    #[arg(long)]
    pub status: Option<GoalStatus>,
    #[arg(long, allow_negative_numbers = true)]
    pub progress: Option<i32>,
    /// Link the goal to an evaluation
    #[arg(long, conflicts_with = "unlink")]
    pub evaluation: Option<EvaluationId>,
    /// Clear the evaluation link
    #[arg(long)]
    pub unlink: bool,
}

/// Subcommands for `appraisal feedback`.
#[derive(Subcommand, Debug)]
pub enum FeedbackCommand {
    /// Give feedback within an evaluation
    Give {
        #[arg(long)]
        evaluation: EvaluationId,
        #[arg(long = "from")]
        provider: UserId,
        #[arg(long = "to")]
        recipient: UserId,
        text: String,
        /// Mark as 360-degree feedback
        #[arg(long = "three-sixty")]
        three_sixty: bool,
    },
    /// List the feedback of an evaluation
    List { evaluation: EvaluationId },
    /// Remove a feedback entry
    Remove {
        id: FeedbackId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "appraisal");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "appraisal", "--json", "-q", "-vv", "--color", "never", "--db", "/tmp/x.db", "migrate",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(cli.command, Commands::Migrate));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["appraisal", "user", "list", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_question_type_parses_and_defaults() {
        let cli = Cli::try_parse_from(["appraisal", "question", "add", "3", "Ships on time?"])
            .unwrap();
        let Commands::Question(QuestionCommand::Add {
            section,
            question_type,
            order,
            ..
        }) = cli.command
        else {
            panic!("expected question add");
        };
        assert_eq!(section, SectionId::new(3));
        assert_eq!(question_type, QuestionType::Rating);
        assert_eq!(order, 1);

        let cli = Cli::try_parse_from([
            "appraisal", "question", "add", "3", "Again?", "--type", "yesno",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Question(QuestionCommand::Add {
                question_type: QuestionType::YesNo,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_choice_is_rejected() {
        let result = Cli::try_parse_from([
            "appraisal", "question", "add", "3", "Essay?", "--type", "essay",
        ]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["appraisal", "evaluation", "status", "1", "archived"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_evaluation_create_parses_dates() {
        let cli = Cli::try_parse_from([
            "appraisal",
            "evaluation",
            "create",
            "--employee",
            "1",
            "--manager",
            "2",
            "--template",
            "1",
            "--start",
            "2026-01-01",
            "--end",
            "2026-12-31",
        ])
        .unwrap();
        let Commands::Evaluation(EvaluationCommand::Create(args)) = cli.command else {
            panic!("expected evaluation create");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(args.status, EvaluationStatus::Pending);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result = Cli::try_parse_from([
            "appraisal", "goal", "create", "--employee", "1", "x", "--start", "2026-13-01",
            "--end", "2026-12-31",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_goal_update_link_flags_conflict() {
        let result = Cli::try_parse_from([
            "appraisal", "goal", "update", "4", "--evaluation", "1", "--unlink",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_feedback_three_sixty_flag() {
        let cli = Cli::try_parse_from([
            "appraisal", "feedback", "give", "--evaluation", "1", "--from", "2", "--to", "1",
            "Great quarter", "--three-sixty",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Feedback(FeedbackCommand::Give {
                three_sixty: true,
                ..
            })
        ));
    }

    #[test]
    fn test_remove_accepts_yes() {
        let cli = Cli::try_parse_from(["appraisal", "template", "remove", "5", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Template(TemplateCommand::Remove {
                confirm: ConfirmArgs { yes: true },
                ..
            })
        ));
    }

    #[test]
    fn test_dates_outside_four_digit_years_are_rejected() {
        let args = |end: &'static str| {
            [
                "appraisal", "goal", "create", "--employee", "1", "Ship", "--start", "2026-01-01",
                "--end", end,
            ]
        };
        assert!(Cli::try_parse_from(args("9999-12-31")).is_ok());
        assert!(Cli::try_parse_from(args("+10000-01-01")).is_err());
        assert!(Cli::try_parse_from(args("10000-01-01")).is_err());
    }
}
