//! Materials folder inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use coursehub_core::config::{AppConfig, DatabaseBackend};
use coursehub_core::error::AppError;
use coursehub_database::FolderStore;
use coursehub_service::{TreeNode, TreeService};

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show a course's folder tree with file counts
    Tree {
        /// Course ID
        #[arg(short, long)]
        course_id: i64,
    },
    /// Show the breadcrumb from the course root to a folder
    Path {
        /// Folder ID
        #[arg(short, long)]
        folder_id: i64,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: i64,
    /// Indented name
    name: String,
    /// Files directly inside
    files: usize,
}

/// Breadcrumb display row
#[derive(Debug, Serialize, Tabled)]
struct SegmentRow {
    /// Depth below the root
    depth: usize,
    /// Folder ID
    id: i64,
    /// Name
    name: String,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "Folder inspection needs database.backend = \"postgres\"",
        ));
    }

    let pool = super::create_db_pool(config).await?;
    let repos = pool.repositories();
    let tree = TreeService::new(
        repos.folders.clone(),
        repos.files.clone(),
        config.materials.max_tree_depth,
    );

    match &args.command {
        FolderCommand::Tree { course_id } => {
            let root = repos.folders.find_root(*course_id).await?.ok_or_else(|| {
                AppError::not_found(format!("Course {course_id} has no materials yet"))
            })?;
            let node = tree.subtree(root.id).await?;
            match format {
                OutputFormat::Json => output::print_json(&node),
                OutputFormat::Table => {
                    let mut rows = Vec::new();
                    flatten(&node, 0, &mut rows);
                    output::print_list(&rows, format);
                }
            }
        }
        FolderCommand::Path { folder_id } => {
            let rows: Vec<SegmentRow> = tree
                .resolve_path(*folder_id)
                .await?
                .into_iter()
                .enumerate()
                .map(|(depth, segment)| SegmentRow {
                    depth,
                    id: segment.id,
                    name: segment.name,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn flatten(node: &TreeNode, depth: usize, rows: &mut Vec<FolderRow>) {
    rows.push(FolderRow {
        id: node.folder.id,
        name: format!("{}{}", "  ".repeat(depth), node.folder.name),
        files: node.files.len(),
    });
    for child in &node.children {
        flatten(child, depth + 1, rows);
    }
}
