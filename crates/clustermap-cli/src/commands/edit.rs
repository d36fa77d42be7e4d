//! Move command implementation.

use std::path::PathBuf;

use tracing::debug;

use clustermap_core::{Editor, Position};

use super::create_layout_storage;
use super::layout::read_layout;
use crate::cli::{Delta, MoveArgs};
use crate::error::CliError;
use crate::output::get_formatter;

/// Apply one drag gesture to `editor`: start, one move per delta, end.
///
/// Returns the host's position before and after.
pub fn drag_host(
    editor: &mut Editor,
    host: &str,
    deltas: &[Delta],
) -> Result<(Position, Position), CliError> {
    let from = editor
        .model()
        .get(host)
        .map(|h| h.position)
        .ok_or_else(|| CliError::InvalidArgument(format!("Unknown host '{}'", host)))?;

    if !editor.start_drag(host) {
        return Err(CliError::InvalidArgument(format!(
            "Cannot start dragging '{}'",
            host
        )));
    }

    for delta in deltas {
        editor.drag_by(delta.dx, delta.dy);
    }

    let to = editor.end_drag().unwrap_or(from);
    debug!(host, ?from, ?to, "Drag finished");

    Ok((from, to))
}

/// Run the move command
pub async fn run_move(
    args: MoveArgs,
    layout_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let storage = create_layout_storage(layout_dir)?;

    let layout = read_layout(&storage, &args.layout).await?;
    let mut editor = Editor::new(layout.model);

    let (from, to) = drag_host(&mut editor, &args.host, &args.by)?;

    if !args.dry_run {
        storage.save(&args.layout, editor.model()).await?;
    }

    println!(
        "{}",
        formatter.format_move(&args.host, from, to, !args.dry_run)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustermap_core::storage::LayoutStorage;
    use clustermap_core::{Host, HostModel, MapSettings};

    fn model() -> HostModel {
        HostModel::new(
            MapSettings::default(),
            vec![
                Host::new("f1r1s1.codam.nl", Position::new(100, 100)),
                Host::new("f1r1s2.codam.nl", Position::new(200, 100)),
            ],
        )
    }

    #[test]
    fn test_drag_host_accumulates_rounded_deltas() {
        let mut editor = Editor::new(model());
        let deltas = [
            Delta { dx: 0.6, dy: -0.4 },
            Delta { dx: 0.6, dy: -0.4 },
            Delta { dx: -5.0, dy: 12.0 },
        ];

        let (from, to) = drag_host(&mut editor, "f1r1s2.codam.nl", &deltas).unwrap();
        assert_eq!(from, Position::new(200, 100));
        assert_eq!(to, Position::new(197, 112));
        assert_eq!(
            editor.model().hosts()[1].position,
            Position::new(197, 112)
        );
        assert_eq!(editor.model().hosts()[0].position, Position::new(100, 100));
    }

    #[test]
    fn test_drag_unknown_host() {
        let mut editor = Editor::new(model());
        let err = drag_host(&mut editor, "f1r1s1", &[Delta { dx: 1.0, dy: 1.0 }]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert_eq!(editor.model(), &model());
    }

    #[tokio::test]
    async fn test_move_saves_unless_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LayoutStorage::new(dir.path().to_path_buf()).unwrap();
        storage.save("c1", &model()).await.unwrap();

        let args = |dry_run| MoveArgs {
            layout: "c1".to_string(),
            host: "f1r1s1.codam.nl".to_string(),
            by: vec![Delta { dx: 10.0, dy: 0.0 }],
            dry_run,
        };

        run_move(args(true), Some(dir.path().to_path_buf()), true)
            .await
            .unwrap();
        let stored = storage.read("c1").await.unwrap().unwrap();
        assert_eq!(stored.model.hosts()[0].position, Position::new(100, 100));

        run_move(args(false), Some(dir.path().to_path_buf()), true)
            .await
            .unwrap();
        let stored = storage.read("c1").await.unwrap().unwrap();
        assert_eq!(stored.model.hosts()[0].position, Position::new(110, 100));
    }
}
