use std::fmt::Write;

use anyhow::Context;
use serde::Deserialize;
use waypoint_config::Config;
use waypoint_engine::{
    Cmd, PointTrackingMode, Snapshot, TextBuffer, TrackingFidelity, TrackingPoint,
};

/// An edit script: initial text, named points on it and edits to replay
#[derive(Debug, Deserialize)]
pub struct Script {
    pub text: String,
    #[serde(default)]
    pub points: Vec<ScriptPoint>,
    #[serde(default)]
    pub edits: Vec<ScriptEdit>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptPoint {
    pub name: String,
    pub position: usize,
    pub mode: Option<PointTrackingMode>,
    pub fidelity: Option<TrackingFidelity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptEdit {
    Insert { at: usize, text: String },
    Delete { start: usize, end: usize },
    Replace { start: usize, end: usize, text: String },
}

impl From<ScriptEdit> for Cmd {
    fn from(edit: ScriptEdit) -> Self {
        match edit {
            ScriptEdit::Insert { at, text } => Cmd::InsertText { at, text },
            ScriptEdit::Delete { start, end } => Cmd::DeleteRange { range: start..end },
            ScriptEdit::Replace { start, end, text } => Cmd::ReplaceRange {
                range: start..end,
                text,
            },
        }
    }
}

impl Script {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Replay `script` and describe where every point lands at every version
pub fn run(script: &Script, config: &Config) -> anyhow::Result<String> {
    let mut buffer = TextBuffer::new(&script.text);
    let initial = buffer.current_snapshot();

    let points = script
        .points
        .iter()
        .map(|point| {
            let tracking_point = initial
                .create_tracking_point(
                    point.position,
                    point.mode.unwrap_or(config.default_mode),
                    point.fidelity.unwrap_or(config.default_fidelity),
                )
                .with_context(|| format!("Point '{}' cannot be placed", point.name))?;
            Ok((point.name.as_str(), tracking_point))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut report = String::new();
    describe_version(&mut report, &initial, &points)?;

    for (index, edit) in script.edits.iter().enumerate() {
        let snapshot = buffer
            .apply(edit.clone().into())
            .with_context(|| format!("Edit {} ({edit:?}) failed", index + 1))?;
        log::debug!("applied edit {}: {edit:?}", index + 1);
        describe_version(&mut report, &snapshot, &points)?;
    }

    // Resolve the final positions back to the initial text
    let latest = buffer.current_snapshot();
    if latest.version_number() > 0 {
        writeln!(report, "back to v0")?;
        for (name, point) in &points {
            let position = point.position(&latest)?;
            let restored = latest
                .create_tracking_point(position, point.mode(), point.fidelity())?
                .position(&initial)?;
            writeln!(report, "  {name:<10} {position} -> {restored}")?;
        }
    }

    Ok(report)
}

fn describe_version(
    report: &mut String,
    snapshot: &Snapshot,
    points: &[(&str, TrackingPoint)],
) -> anyhow::Result<()> {
    writeln!(
        report,
        "v{} {:?}",
        snapshot.version_number(),
        snapshot.text()
    )?;
    for (name, point) in points {
        let resolved = point.resolve(snapshot)?;
        let character = match resolved.character() {
            Ok(c) => format!("{c:?}"),
            Err(_) => "<end>".to_string(),
        };
        writeln!(report, "  {name:<10} {} {character}", resolved.position())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEMO: &str = r#"
text = "ABCDEF"

[[points]]
name = "caret"
position = 3

[[points]]
name = "anchor"
position = 3
mode = "negative"

[[edits]]
op = "insert"
at = 3
text = "XY"

[[edits]]
op = "delete"
start = 0
end = 2
"#;

    #[test]
    fn test_parse_script() {
        let script = Script::parse(DEMO).unwrap();

        assert_eq!(script.text, "ABCDEF");
        assert_eq!(script.points.len(), 2);
        assert_eq!(script.points[1].mode, Some(PointTrackingMode::Negative));
        assert!(script.points[0].mode.is_none());
        assert_eq!(script.edits.len(), 2);
    }

    #[test]
    fn test_run_demo_script() {
        let script = Script::parse(DEMO).unwrap();
        let report = run(&script, &Config::default()).unwrap();

        let expected = "\
v0 \"ABCDEF\"
  caret      3 'D'
  anchor     3 'D'
v1 \"ABCXYDEF\"
  caret      5 'D'
  anchor     3 'X'
v2 \"CXYDEF\"
  caret      3 'D'
  anchor     1 'X'
back to v0
  caret      3 -> 3
  anchor     1 -> 3
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_config_supplies_default_mode() {
        let script = Script::parse(DEMO).unwrap();
        let config = Config {
            default_mode: PointTrackingMode::Negative,
            ..Config::default()
        };

        let report = run(&script, &config).unwrap();

        assert!(report.contains("v1 \"ABCXYDEF\"\n  caret      3 'X'"));
    }

    #[test]
    fn test_point_outside_text_is_reported() {
        let script = Script::parse("text = \"abc\"\n[[points]]\nname = \"p\"\nposition = 9\n").unwrap();

        let error = run(&script, &Config::default()).unwrap_err();

        assert!(error.to_string().contains("Point 'p' cannot be placed"));
    }

    #[test]
    fn test_invalid_edit_is_reported() {
        let script = Script::parse(
            "text = \"abc\"\n[[edits]]\nop = \"delete\"\nstart = 1\nend = 8\n",
        )
        .unwrap();

        let error = run(&script, &Config::default()).unwrap_err();

        assert!(error.to_string().contains("Edit 1"));
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let result = Script::parse("text = \"abc\"\n[[edits]]\nop = \"shuffle\"\n");
        assert!(result.is_err());
    }
}
