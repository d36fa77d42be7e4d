//! Layout commands implementation.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use clustermap_core::storage::{LayoutStorage, StoredLayout};
use clustermap_core::{Editor, MapView, RenderOutput};

use super::{create_layout_storage, resolve_size};
use crate::cli::{LayoutArgs, LayoutCommands, SizeArgs};
use crate::error::{CliError, StorageError};
use crate::output::{get_formatter, OutputFormatter};

/// Run the layout command
pub async fn run_layout(
    args: LayoutArgs,
    layout_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let storage = create_layout_storage(layout_dir)?;

    match args.command {
        LayoutCommands::Import(args) => {
            run_import(&storage, &args.file, &args.name, formatter.as_ref()).await
        }
        LayoutCommands::List => {
            let layouts = storage.list().await?;
            println!("{}", formatter.format_layouts(&layouts));
            Ok(())
        }
        LayoutCommands::Show(args) => {
            let view = layout_view(&storage, &args.name, &args.size, args.map_image).await?;
            println!("{}", formatter.format_render(&RenderOutput::Map(view)));
            Ok(())
        }
        LayoutCommands::Export(args) => {
            run_export(&storage, &args.name, args.output.as_deref(), formatter.as_ref()).await
        }
        LayoutCommands::Delete(args) => {
            storage.delete(&args.name).await?;
            println!(
                "{}",
                formatter.format_message(&format!("Layout '{}' deleted", args.name))
            );
            Ok(())
        }
    }
}

/// Read a stored layout, treating a missing one as an error.
pub async fn read_layout(storage: &LayoutStorage, name: &str) -> Result<StoredLayout, CliError> {
    storage
        .read(name)
        .await?
        .ok_or_else(|| StorageError::NotFound(name.to_string()).into())
}

async fn run_import(
    storage: &LayoutStorage,
    file: &Path,
    name: &str,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    let content = fs::read_to_string(file).await?;

    let mut editor = Editor::default();
    editor.import(&content)?;
    storage.save(name, editor.model()).await?;

    info!(layout = name, hosts = editor.model().len(), "Layout imported");
    println!(
        "{}",
        formatter.format_message(&format!(
            "Imported {} host(s) into layout '{}'",
            editor.model().len(),
            name
        ))
    );
    Ok(())
}

/// The editor view of a stored layout.
async fn layout_view(
    storage: &LayoutStorage,
    name: &str,
    size: &SizeArgs,
    map_image: Option<String>,
) -> Result<MapView, CliError> {
    let layout = read_layout(storage, name).await?;
    let size = resolve_size(size, None, &layout.model.map_settings);

    let mut editor = Editor::new(layout.model);
    editor.set_background(map_image);
    Ok(editor.view(Some(size)))
}

async fn run_export(
    storage: &LayoutStorage,
    name: &str,
    output: Option<&Path>,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    let layout = read_layout(storage, name).await?;
    let exported = Editor::new(layout.model)
        .export()
        .map_err(StorageError::Serialization)?;

    match output {
        Some(path) => {
            fs::write(path, &exported).await?;
            println!(
                "{}",
                formatter.format_message(&format!(
                    "Layout '{}' exported to {}",
                    name,
                    path.display()
                ))
            );
        }
        // Raw document regardless of --json so it can be redirected.
        None => println!("{}", exported),
    }
    Ok(())
}
