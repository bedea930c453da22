//! サブコマンドの実装
//!
//! 出力は呼び出し側から渡された `Write` に書き、ログは stderr に出す。

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use boardsync_core::position::{BOARD_DUMP_LEN, board_dump_to_text};
use boardsync_core::types::json::{DeltaJson, MoveJson, PositionJson, ReplayJson};
use boardsync_core::{
    BoardFollower, CastleRule, Classification, CompactMove, FollowerOptions, Observation,
    OccupancyDelta, PieceKind, Position, RejectReason, ReplayOptions, Square, candidates,
    classify_with, diff, replay, try_apply,
};
use serde::Serialize;

fn parse_board(text: &str) -> Result<Position> {
    Position::from_board_text(text).with_context(|| format!("invalid board notation: {text}"))
}

/// `classify --json` の出力
#[derive(Debug, Serialize)]
struct ClassifyJson {
    result: &'static str,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    mv: Option<MoveJson>,
    delta: DeltaJson,
}

/// 2つの盤面の差分を分類する
pub fn classify<W: Write>(
    out: &mut W,
    start: &str,
    end: &str,
    rule: CastleRule,
    json: bool,
) -> Result<()> {
    let before = parse_board(start)?;
    let after = parse_board(end)?;
    let delta = diff(&before, &after);
    let classification = classify_with(&delta, start, end, rule);

    if json {
        let (result, mv) = match &classification {
            Classification::Moved(mv) => ("moved", Some(MoveJson::from(mv))),
            Classification::Unchanged => ("unchanged", None),
            Classification::Unclassified => ("unclassified", None),
        };
        let body = ClassifyJson { result, mv, delta: DeltaJson::from(&delta) };
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(());
    }

    match classification {
        Classification::Moved(mv) => writeln!(out, "{mv}")?,
        Classification::Unchanged => writeln!(out, "unchanged")?,
        Classification::Unclassified => {
            writeln!(out, "unclassified{}", describe_delta(&delta))?;
        }
    }
    Ok(())
}

/// 盤面に CompactMove を順に適用し、最終盤面を出力する
pub fn apply<W: Write>(out: &mut W, board: &str, moves: &[String]) -> Result<()> {
    let mut pos = parse_board(board)?;
    for (i, text) in moves.iter().enumerate() {
        let cm: CompactMove = text.parse().with_context(|| format!("move #{}", i + 1))?;
        pos = try_apply(&cm, &pos).with_context(|| format!("move #{} ({text})", i + 1))?;
    }
    writeln!(out, "{pos}")?;
    Ok(())
}

/// 指し手列を再生する
pub fn replay_moves<W: Write>(
    out: &mut W,
    moves: &[String],
    options: &ReplayOptions,
    json: bool,
) -> Result<()> {
    let replay = replay(&moves.join(" "), options);
    if !replay.skipped.is_empty() {
        log::warn!("skipped moves: {}", replay.skipped.join(" "));
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ReplayJson::from(&replay))?)?;
        return Ok(());
    }

    for (i, mv) in replay.moves.iter().enumerate() {
        if i % 2 == 0 {
            write!(out, "{}. {mv}", i / 2 + 1)?;
        } else {
            writeln!(out, " {mv}")?;
        }
    }
    if replay.moves.len() % 2 == 1 {
        writeln!(out)?;
    }
    writeln!(out, "board: {}", replay.final_board)?;
    writeln!(out, "to move: {}", replay.side_to_move)?;
    Ok(())
}

/// 駒種と升から到達候補を出力する
pub fn reach<W: Write>(out: &mut W, kind: &str, square: &str) -> Result<()> {
    let kind: PieceKind = kind.parse().map_err(|e: String| anyhow!(e))?;
    let square: Square = square.parse()?;
    let squares: Vec<String> = candidates(kind, square).iter().map(|s| s.to_string()).collect();
    writeln!(out, "{}", squares.join(" "))?;
    Ok(())
}

/// `follow` の入力1行の解釈
#[derive(Debug, PartialEq, Eq)]
enum FollowInput {
    Board(String),
    Takeback,
    Reset,
    Skip,
}

/// 空行と `#` 以降は無視する。64個の数値はボードダンプとして読む
fn parse_follow_line(line: &str) -> Result<FollowInput> {
    let line = line.split('#').next().unwrap_or("").trim();
    match line {
        "" => return Ok(FollowInput::Skip),
        "takeback" => return Ok(FollowInput::Takeback),
        "reset" => return Ok(FollowInput::Reset),
        _ => {}
    }
    let fields: Vec<&str> =
        line.split(|c: char| c == ',' || c.is_whitespace()).filter(|f| !f.is_empty()).collect();
    if fields.len() == BOARD_DUMP_LEN {
        let payload = fields
            .iter()
            .map(|f| f.parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .with_context(|| format!("invalid board dump: {line}"))?;
        return Ok(FollowInput::Board(board_dump_to_text(&payload)));
    }
    Ok(FollowInput::Board(line.to_string()))
}

fn describe_delta(delta: &OccupancyDelta) -> String {
    if delta.is_empty() {
        return String::new();
    }
    let names = |squares: boardsync_core::SquareSet| {
        squares.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(",")
    };
    let mut text = String::new();
    if !delta.removed.is_empty() {
        text.push_str(&format!(" missing={}", names(delta.removed_squares())));
    }
    if !delta.added.is_empty() {
        text.push_str(&format!(" extra={}", names(delta.added_squares())));
    }
    text
}

/// `follow` の集計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FollowSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// 1行1盤面の読み取りを追従し、受理・却下を出力する
pub fn follow<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    options: FollowerOptions,
    resume: Option<&Path>,
    save_history: Option<&Path>,
) -> Result<FollowSummary> {
    let mut follower = BoardFollower::new(options);
    if let Some(path) = resume {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history {}", path.display()))?;
        follower
            .restore_json(&json)
            .with_context(|| format!("invalid history {}", path.display()))?;
        log::info!("resumed {} moves from {}", follower.moves().len(), path.display());
    }

    let mut summary = FollowSummary::default();
    for (line_no, line) in input.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("line {line_no}: read failed"))?;
        let snapshot = match parse_follow_line(&line).with_context(|| format!("line {line_no}"))? {
            FollowInput::Skip => continue,
            FollowInput::Takeback => {
                match follower.takeback() {
                    Some(mv) => writeln!(out, "takeback {mv}")?,
                    None => writeln!(out, "takeback: no moves")?,
                }
                continue;
            }
            FollowInput::Reset => {
                follower.reset();
                writeln!(out, "reset")?;
                continue;
            }
            FollowInput::Board(board) => board,
        };

        match follower.observe(&snapshot) {
            Observation::Unchanged => log::debug!("line {line_no}: unchanged"),
            Observation::Accepted(mv) => {
                summary.accepted += 1;
                let ply = follower.moves().len();
                writeln!(out, "{ply}. {mv} ({})", CompactMove::from_move(&mv))?;
            }
            Observation::Rejected(reason) => {
                summary.rejected += 1;
                let reason = match reason {
                    RejectReason::Unclassified => {
                        format!("unclassified{}", describe_delta(&follower.out_of_sync(&snapshot)))
                    }
                    RejectReason::OutOfTurn { expected } => {
                        format!("out of turn ({expected} to move)")
                    }
                    RejectReason::Unreachable => "unreachable".to_string(),
                };
                writeln!(out, "rejected: {reason}")?;
            }
        }
    }

    if let Some(path) = save_history {
        let json = follower.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write history {}", path.display()))?;
        log::info!("saved {} moves to {}", follower.moves().len(), path.display());
    }
    let baseline = PositionJson::from(&follower.baseline());
    writeln!(out, "position: {}", serde_json::to_string(&baseline)?)?;
    Ok(summary)
}
