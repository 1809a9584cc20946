//
//  ship-cli
//  cli/problem.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Problem commands
//!
//! Problems are Ship's issues. These commands view, search, create and
//! update them, and manage their keywords, relationships, comments and
//! watchers.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::{RelationType, Relationship, SearchQuery, ShipClient};
use crate::output::{Column, OutputFormat, OutputWriter};
use crate::util::{read_json_input, truncate};

use super::GlobalOptions;

const PROBLEM_COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("TITLE", "title"),
    Column::new("STATE", "state"),
    Column::new("PRIORITY", "priority"),
    Column::new("ASSIGNEE", "assignee"),
    Column::new("COMPONENT", "component"),
];

const RELATIONSHIP_COLUMNS: &[Column] = &[
    Column::new("TYPE", "type"),
    Column::new("PROBLEM", "problemIdentifier"),
];

const COMMENT_COLUMNS: &[Column] = &[
    Column::new("AUTHOR", "author"),
    Column::new("DATE", "date"),
    Column::new("TEXT", "text"),
];

const WATCHER_COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("NAME", "name"),
    Column::new("EMAIL", "email"),
];

/// Longest title shown in the search table.
const TITLE_WIDTH: usize = 60;

/// View, search and modify problems
#[derive(Args, Debug)]
pub struct ProblemCommand {
    #[command(subcommand)]
    pub command: ProblemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProblemSubcommand {
    /// View a problem
    View(ViewArgs),

    /// Search problems by predicate or saved query
    #[command(visible_alias = "find")]
    Search(SearchArgs),

    /// Create a problem from a JSON document
    Create(DocumentArgs),

    /// Update fields of a problem from a JSON document
    Update(UpdateArgs),

    /// Set or remove keywords
    #[command(subcommand)]
    Keyword(KeywordSubcommand),

    /// List the relationships of a problem
    Relationships(IdArgs),

    /// Link two problems
    Relate(RelateArgs),

    /// Remove a link between two problems
    Unrelate(RelateArgs),

    /// List the comments on a problem
    Comments(IdArgs),

    /// Append a comment to a problem
    Comment(CommentArgs),

    /// List the watchers of a problem
    Watchers(IdArgs),

    /// Add a watcher to a problem
    Watch(WatchArgs),
}

#[derive(Subcommand, Debug)]
pub enum KeywordSubcommand {
    /// Add a keyword, or change its value
    Set(KeywordSetArgs),

    /// Remove a keyword
    #[command(visible_alias = "rm")]
    Delete(KeywordArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Problem identifier
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Problem identifier
    pub id: u64,

    /// Also show comments
    #[arg(long, short = 'c')]
    pub comments: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Ship predicate, e.g. "state.resolved == NO"
    #[arg(long, short = 'q', required_unless_present = "saved_query")]
    pub predicate: Option<String>,

    /// Saved query URL, e.g. ship://Query/2Kk8ww70TvWEyVO3bzYpkQ
    #[arg(long, conflicts_with = "predicate")]
    pub saved_query: Option<String>,
}

#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// JSON document given inline
    #[arg(long, short = 'd', conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the JSON document from a file ('-' for stdin)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Problem identifier
    pub id: u64,

    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Args, Debug)]
pub struct KeywordArgs {
    /// Problem identifier
    pub id: u64,

    /// Keyword name
    pub keyword: String,
}

#[derive(Args, Debug)]
pub struct KeywordSetArgs {
    /// Problem identifier
    pub id: u64,

    /// Keyword name
    pub keyword: String,

    /// Keyword value
    pub value: Option<String>,
}

#[derive(Args, Debug)]
pub struct RelateArgs {
    /// Source problem identifier
    pub id: u64,

    /// Relationship type, e.g. BlockedBy or duplicateof
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: RelationType,

    /// Target problem identifier
    pub other: u64,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Problem identifier
    pub id: u64,

    /// Comment text
    #[arg(long, short = 'b', required_unless_present = "body_file")]
    pub body: Option<String>,

    /// Read the comment text from a file
    #[arg(long, short = 'F', conflicts_with = "body")]
    pub body_file: Option<PathBuf>,

    /// HTML rendition of the comment
    #[arg(long)]
    pub html: Option<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Problem identifier
    pub id: u64,

    /// Email address or user identifier
    pub user: String,
}

impl ProblemCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;

        match &self.command {
            ProblemSubcommand::View(args) => view(&client, &writer, args).await,
            ProblemSubcommand::Search(args) => search(&client, &writer, args).await,
            ProblemSubcommand::Create(args) => create(&client, &writer, args).await,
            ProblemSubcommand::Update(args) => update(&client, &writer, args).await,
            ProblemSubcommand::Keyword(cmd) => keyword(&client, &writer, cmd).await,
            ProblemSubcommand::Relationships(args) => {
                let relationships = client.problem_relationships(args.id).await?;
                writer.write_list(&relationships, RELATIONSHIP_COLUMNS)
            }
            ProblemSubcommand::Relate(args) => {
                client
                    .problem_relationship_add(args.id, args.kind, args.other)
                    .await?;
                report(
                    &client,
                    &writer,
                    &format!("#{} {} #{}", args.id, args.kind, args.other),
                )
            }
            ProblemSubcommand::Unrelate(args) => {
                let relationship = Relationship {
                    kind: args.kind,
                    problem_identifier: args.other,
                };
                client
                    .problem_relationship_delete(args.id, &relationship)
                    .await?;
                report(
                    &client,
                    &writer,
                    &format!("Removed #{} {} #{}", args.id, args.kind, args.other),
                )
            }
            ProblemSubcommand::Comments(args) => {
                let comments = client.problem_comments(args.id).await?;
                writer.write_list(&comments, COMMENT_COLUMNS)
            }
            ProblemSubcommand::Comment(args) => comment(&client, &writer, args).await,
            ProblemSubcommand::Watchers(args) => {
                let watchers = client.problem_watchers(args.id).await?;
                writer.write_list(&watchers, WATCHER_COLUMNS)
            }
            ProblemSubcommand::Watch(args) => {
                client
                    .problem_watchers_add(args.id, args.user.as_str())
                    .await?;
                report(
                    &client,
                    &writer,
                    &format!("{} is watching #{}", args.user, args.id),
                )
            }
        }
    }
}

/// Reports a finished write, or that it was skipped in dry-run mode.
fn report(client: &ShipClient, writer: &OutputWriter, msg: &str) -> Result<()> {
    if client.is_dry_run() {
        writer.write_warning(&format!("Dry run, nothing was sent: {}", msg));
        if writer.format() == OutputFormat::Json {
            crate::output::write_json(&serde_json::json!({
                "success": true,
                "dry_run": true,
                "message": msg,
            }))?;
        }
        Ok(())
    } else {
        writer.write_success(msg)
    }
}

async fn view(client: &ShipClient, writer: &OutputWriter, args: &ViewArgs) -> Result<()> {
    let problem = client.problem(args.id).await?;
    writer.write_value(&problem)?;

    if args.comments && writer.format() == OutputFormat::Table {
        let comments = client.problem_comments(args.id).await?;
        if !comments.is_empty() {
            println!();
            println!("{}", style("Comments").bold());
            writer.write_list(&comments, COMMENT_COLUMNS)?;
        }
    }

    Ok(())
}

async fn search(client: &ShipClient, writer: &OutputWriter, args: &SearchArgs) -> Result<()> {
    let query = SearchQuery::from_parts(args.predicate.clone(), args.saved_query.clone())?;
    let mut problems = client.problem_search(&query).await?;

    if writer.format() == OutputFormat::Table {
        for problem in &mut problems {
            if let Some(text) = problem.get("title").and_then(|t| t.as_str()) {
                let short = truncate(text, TITLE_WIDTH);
                problem["title"] = short.into();
            }
        }
    }

    writer.write_list(&problems, PROBLEM_COLUMNS)
}

async fn create(client: &ShipClient, writer: &OutputWriter, args: &DocumentArgs) -> Result<()> {
    let document = read_json_input(args.data.as_deref(), args.file.as_deref())?;
    let created = client.problem_create(&document).await?;

    if client.is_dry_run() {
        return report(client, writer, "Create problem");
    }
    writer.write_value(&created)
}

async fn update(client: &ShipClient, writer: &OutputWriter, args: &UpdateArgs) -> Result<()> {
    let updates = read_json_input(
        args.document.data.as_deref(),
        args.document.file.as_deref(),
    )?;
    let updated = client.problem_update(args.id, &updates).await?;

    if client.is_dry_run() {
        return report(client, writer, &format!("Update problem #{}", args.id));
    }
    writer.write_value(&updated)
}

async fn keyword(
    client: &ShipClient,
    writer: &OutputWriter,
    cmd: &KeywordSubcommand,
) -> Result<()> {
    match cmd {
        KeywordSubcommand::Set(args) => {
            client
                .problem_keyword_set(args.id, &args.keyword, args.value.as_deref())
                .await?;
            let msg = match &args.value {
                Some(value) => format!("Set {}={} on #{}", args.keyword, value, args.id),
                None => format!("Set {} on #{}", args.keyword, args.id),
            };
            report(client, writer, &msg)
        }
        KeywordSubcommand::Delete(args) => {
            client.problem_keyword_delete(args.id, &args.keyword).await?;
            report(
                client,
                writer,
                &format!("Removed {} from #{}", args.keyword, args.id),
            )
        }
    }
}

async fn comment(client: &ShipClient, writer: &OutputWriter, args: &CommentArgs) -> Result<()> {
    let text = match (&args.body, &args.body_file) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => anyhow::bail!("Comment text is required. Use --body or --body-file."),
    };

    client
        .problem_comments_append(args.id, &text, args.html.as_deref())
        .await?;
    report(client, writer, &format!("Added comment to #{}", args.id))
}
